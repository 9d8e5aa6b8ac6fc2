// UniAIMS - core/export.rs
//
// CSV and JSON export of the dashboard's filtered task list.
// Core layer: writes to any Write trait object.

use crate::core::model::Task;
use crate::util::error::ExportError;
use chrono::NaiveDateTime;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
        }
    }
}

/// Write `tasks` to a new file at `dest` in the given format.
pub fn export_tasks_to_file(
    tasks: &[&Task],
    dest: &Path,
    format: ExportFormat,
) -> Result<usize, ExportError> {
    let file = std::fs::File::create(dest).map_err(|e| ExportError::Io {
        path: dest.to_path_buf(),
        source: e,
    })?;
    let writer = std::io::BufWriter::new(file);
    match format {
        ExportFormat::Csv => export_tasks_csv(tasks, writer, dest),
        ExportFormat::Json => export_tasks_json(tasks, writer, dest),
    }
}

/// Suggested file name for an export taken at `now`, e.g. `tasks_20231024_1430.csv`.
pub fn default_file_name(now: NaiveDateTime, extension: &str) -> String {
    format!("tasks_{}.{extension}", now.format("%Y%m%d_%H%M"))
}

/// Export tasks to CSV.
///
/// Writes: id, name, date, items, status, type, model
pub fn export_tasks_csv<W: Write>(
    tasks: &[&Task],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["id", "name", "date", "items", "status", "type", "model"])
        .map_err(csv_err)?;

    let mut count = 0;
    for task in tasks {
        csv_writer
            .write_record([
                task.id.as_str(),
                task.name.as_str(),
                task.date.as_str(),
                &task.items.to_string(),
                task.status.as_str(),
                task.task_type.as_str(),
                task.model.as_str(),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export tasks to JSON (array of objects).
pub fn export_tasks_json<W: Write>(
    tasks: &[&Task],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, tasks).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(tasks.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::repository::{MockRepository, Repository};
    use chrono::NaiveDate;

    #[test]
    fn test_csv_export() {
        let tasks = MockRepository.list_tasks();
        let refs: Vec<&Task> = tasks.iter().collect();
        let mut buf = Vec::new();
        let count = export_tasks_csv(&refs, &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(count, 4);

        let output = String::from_utf8(buf).unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("id,name,date,items,status,type,model"));
        assert_eq!(
            lines.next(),
            Some("T-1029,Graphene Oxide Sample A,2023-10-24,120,completed,particle,v1.1")
        );
    }

    #[test]
    fn test_csv_export_empty_writes_header_only() {
        let mut buf = Vec::new();
        let count = export_tasks_csv(&[], &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(count, 0);
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_json_export() {
        let tasks = MockRepository.list_training_tasks();
        let refs: Vec<&Task> = tasks.iter().collect();
        let mut buf = Vec::new();
        let count = export_tasks_json(&refs, &mut buf, Path::new("out.json")).unwrap();
        assert_eq!(count, 2);

        let parsed: Vec<Task> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed[0].id, "FT-002");
        assert_eq!(parsed[0].date, "Running");
    }

    #[test]
    fn test_default_file_name() {
        let ts = NaiveDate::from_ymd_opt(2023, 10, 24)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(default_file_name(ts, "csv"), "tasks_20231024_1430.csv");
    }
}
