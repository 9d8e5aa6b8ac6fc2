// UniAIMS - app/drafts.rs
//
// Form state for the upload, create-batch and save-to-dataset screens.
// Nothing here is persisted: submitting logs the draft and returns the
// route the UI should open next.

use crate::core::model::Mode;
use crate::core::route::{BatchTab, Route};
use crate::util::constants::{DEFAULT_EXPORT_PATH, NEW_BATCH_ID, NEW_TASK_ID};
use std::path::PathBuf;

/// A selectable analysis mode within a task type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubTaskInfo {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

const PARTICLE_SUBTASKS: &[SubTaskInfo] = &[
    SubTaskInfo {
        id: "default",
        title: "Default Mode",
        description: "Standard segmentation and characterization of individual particles. \
                      Calculates size distribution, sphericity, and morphological \
                      classifications automatically.",
        features: &[
            "Size Distribution (D10, D50, D90)",
            "Shape Factors (Circularity)",
            "Automated Counting",
        ],
    },
    SubTaskInfo {
        id: "crack",
        title: "Crack Analysis",
        description: "Specialized detection of surface cracks and structural defects within \
                      particles. Identifies fracture patterns and integrity issues.",
        features: &["Crack Length & Width", "Defect Density Heatmap", "Integrity Scoring"],
    },
    SubTaskInfo {
        id: "void",
        title: "Void Analysis",
        description: "Analysis of internal voids and pores on particle cross-sections. \
                      Crucial for porosity and material density studies.",
        features: &[
            "Porosity Calculation",
            "Void Size Distribution",
            "Cross-section Mapping",
        ],
    },
    SubTaskInfo {
        id: "tem",
        title: "TEM Overlapping",
        description: "Advanced separation algorithms to distinguish individual particles in \
                      dense, overlapping Transmission Electron Microscopy images.",
        features: &[
            "Overlap Deconvolution",
            "Individual Boundary Detection",
            "Cluster Analysis",
        ],
    },
];

const FIBER_SUBTASKS: &[SubTaskInfo] = &[
    SubTaskInfo {
        id: "coarse",
        title: "Coarse Fiber",
        description: "Optimized for larger diameter fibers, ensuring accurate width \
                      measurement even with surface roughness and variations.",
        features: &["Mean Diameter", "Roughness Tolerance", "Orientation Histogram"],
    },
    SubTaskInfo {
        id: "fine",
        title: "Fine Fiber",
        description: "High-sensitivity detection for nanofibers and complex micro-fiber \
                      networks. Resolves fine structures and entanglements.",
        features: &["Nanofiber Detection", "Pore Size Analysis", "Entanglement Index"],
    },
];

/// Sub-modes offered for an analysis type, first entry is the default.
pub fn subtasks(mode: Mode) -> &'static [SubTaskInfo] {
    match mode {
        Mode::Particle => PARTICLE_SUBTASKS,
        Mode::Fiber => FIBER_SUBTASKS,
    }
}

pub const MODEL_VERSIONS: &[(&str, &str)] = &[
    ("v1.1", "v1.1 (Stable)"),
    ("v1.2-beta", "v1.2 (Beta)"),
    ("v1.0", "v1.0 (Legacy)"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    #[default]
    Gpu,
    Cpu,
}

impl Device {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gpu => "GPU",
            Self::Cpu => "CPU",
        }
    }
}

// =============================================================================
// Upload
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct UploadDraft {
    pub task_name: String,
    task_type: Mode,
    sub_type: &'static str,
    pub model_version: String,
    pub device: Device,
    pub description: String,
    pub files: Vec<PathBuf>,
}

impl Default for UploadDraft {
    fn default() -> Self {
        Self {
            task_name: String::new(),
            task_type: Mode::Particle,
            sub_type: PARTICLE_SUBTASKS[0].id,
            model_version: MODEL_VERSIONS[0].0.to_string(),
            device: Device::Gpu,
            description: String::new(),
            files: Vec::new(),
        }
    }
}

impl UploadDraft {
    pub fn task_type(&self) -> Mode {
        self.task_type
    }

    pub fn sub_type(&self) -> &'static str {
        self.sub_type
    }

    /// Switch analysis type; the sub-mode resets to the type's default.
    pub fn set_task_type(&mut self, mode: Mode) {
        self.task_type = mode;
        self.sub_type = subtasks(mode)[0].id;
    }

    /// Select a sub-mode. Ids not offered for the current type are ignored.
    pub fn set_sub_type(&mut self, id: &str) {
        if let Some(info) = subtasks(self.task_type).iter().find(|s| s.id == id) {
            self.sub_type = info.id;
        }
    }

    pub fn sub_type_info(&self) -> &'static SubTaskInfo {
        subtasks(self.task_type)
            .iter()
            .find(|s| s.id == self.sub_type)
            .unwrap_or(&subtasks(self.task_type)[0])
    }

    /// Queue SEM images for upload, skipping ones already listed.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = PathBuf>) {
        for f in files {
            if !self.files.contains(&f) {
                self.files.push(f);
            }
        }
    }

    /// Start the analysis: returns the workstation to open.
    pub fn start(&self) -> Route {
        tracing::info!(
            task_name = %self.task_name,
            task_type = self.task_type.as_str(),
            sub_type = self.sub_type,
            model = %self.model_version,
            device = self.device.label(),
            files = self.files.len(),
            "Starting analysis task"
        );
        let task_id = NEW_TASK_ID.to_string();
        match self.task_type {
            Mode::Particle => Route::Particles { task_id },
            Mode::Fiber => Route::Fibers { task_id },
        }
    }
}

// =============================================================================
// Create data batch
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchDraft {
    pub title: String,
    pub description: String,
    pub files: Vec<PathBuf>,
}

impl BatchDraft {
    /// Append files, skipping ones already listed.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = PathBuf>) {
        for f in files {
            if !self.files.contains(&f) {
                self.files.push(f);
            }
        }
    }

    pub fn remove_file(&mut self, index: usize) {
        if index < self.files.len() {
            self.files.remove(index);
        }
    }

    /// "Create" the batch. Nothing is stored; the mock overview is opened.
    pub fn submit(&self) -> Route {
        tracing::info!(
            title = %self.title,
            files = self.files.len(),
            created_at = %chrono::Local::now().format("%Y-%m-%d %H:%M"),
            "Creating batch"
        );
        Route::Batch {
            batch_id: NEW_BATCH_ID.to_string(),
            tab: BatchTab::Overview,
        }
    }
}

// =============================================================================
// Save to dataset
// =============================================================================

/// State of the "Save to Dataset" dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDraft {
    pub open: bool,
    /// Path under the `/mnt/` prefix.
    pub path: String,
}

impl Default for ExportDraft {
    fn default() -> Self {
        Self {
            open: false,
            path: DEFAULT_EXPORT_PATH.to_string(),
        }
    }
}

impl ExportDraft {
    pub fn full_path(&self) -> String {
        format!("/mnt/{}", self.path.trim_start_matches('/'))
    }

    pub fn confirm(&mut self) {
        tracing::info!(target_path = %self.full_path(), "Save to dataset confirmed");
        self.open = false;
    }

    pub fn cancel(&mut self) {
        tracing::debug!("Save to dataset cancelled");
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_switch_resets_sub_type() {
        let mut d = UploadDraft::default();
        d.set_sub_type("void");
        assert_eq!(d.sub_type(), "void");
        d.set_task_type(Mode::Fiber);
        assert_eq!(d.sub_type(), "coarse");
        d.set_sub_type("void");
        assert_eq!(d.sub_type(), "coarse");
        d.set_task_type(Mode::Particle);
        assert_eq!(d.sub_type(), "default");
    }

    #[test]
    fn test_start_routes_to_workstation() {
        let mut d = UploadDraft::default();
        assert_eq!(d.start().path(), format!("/{NEW_TASK_ID}/particles"));
        d.set_task_type(Mode::Fiber);
        assert_eq!(d.start().path(), format!("/{NEW_TASK_ID}/fibers"));
    }

    #[test]
    fn test_batch_files_and_submit() {
        let mut d = BatchDraft::default();
        d.add_files(vec![PathBuf::from("a.tif"), PathBuf::from("b.tif")]);
        d.add_files(vec![PathBuf::from("a.tif")]);
        assert_eq!(d.files.len(), 2);
        d.remove_file(0);
        d.remove_file(5);
        assert_eq!(d.files, vec![PathBuf::from("b.tif")]);
        assert_eq!(d.submit().path(), "/data/DB-NEW-001/overview");
    }

    #[test]
    fn test_export_path_under_mnt() {
        let mut d = ExportDraft {
            open: true,
            ..Default::default()
        };
        assert_eq!(d.full_path(), "/mnt/data/datasets/new_batch_01");
        d.confirm();
        assert!(!d.open);
    }
}
