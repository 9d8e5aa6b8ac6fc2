// UniAIMS - core/repository.rs
//
// Read-only data source the views depend on. The only implementation is the
// in-memory mock; a real backend would provide an HTTP-backed implementation
// of the same trait.

use crate::core::model::{
    AnalysisImage, BatchImage, BatchStatus, ComparisonTask, DataBatch, Dataset, ImageStatus,
    LinkedTask, QueueEntry, ResourcePool, Task, TaskStatus, TaskType,
};

/// Read-only access to tasks, batches and the dashboard side data.
pub trait Repository {
    /// Analysis tasks (particle and fiber), most recent first.
    fn list_tasks(&self) -> Vec<Task>;

    /// Fine-tuning jobs.
    fn list_training_tasks(&self) -> Vec<Task>;

    fn list_batches(&self) -> Vec<DataBatch>;

    /// Look up one batch by id.
    fn batch(&self, id: &str) -> Option<DataBatch>;

    fn user_queue(&self) -> Vec<QueueEntry>;

    fn resources(&self) -> Vec<ResourcePool>;

    /// Images of the task currently open in the workstation / analysis views.
    fn analysis_images(&self) -> Vec<AnalysisImage>;

    /// Tasks offered by the task comparison picker.
    fn task_comparison_tasks(&self) -> Vec<ComparisonTask>;

    /// Images belonging to a comparison task (falls back to a default set).
    fn images_for_task(&self, task_id: &str) -> Vec<AnalysisImage>;

    /// Training datasets for the fine-tuning data tab.
    fn datasets(&self) -> Vec<Dataset>;
}

/// Fixed mock arrays standing in for a backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockRepository;

fn task(
    id: &str,
    name: &str,
    date: &str,
    items: u32,
    status: TaskStatus,
    task_type: TaskType,
    model: &str,
) -> Task {
    Task {
        id: id.to_string(),
        name: name.to_string(),
        date: date.to_string(),
        items,
        status,
        task_type,
        model: model.to_string(),
    }
}

fn image(id: &str, status: ImageStatus, count: u32) -> AnalysisImage {
    AnalysisImage {
        id: id.to_string(),
        status,
        count,
    }
}

impl MockRepository {
    /// The single mock batch, re-labelled with `id`.
    ///
    /// Any batch id resolves to this template so freshly "created" batches
    /// (which are never persisted) still open a populated overview.
    pub fn template_batch(id: &str) -> DataBatch {
        DataBatch {
            id: id.to_string(),
            name: "Graphene Oxide Sample Set A".to_string(),
            upload_date: "2023-10-24".to_string(),
            uploader: "Xia Zhiyi".to_string(),
            description: "High resolution SEM images of graphene oxide flakes on silicon \
                          substrate. Taken at 5kV."
                .to_string(),
            tags: vec![
                "graphene".to_string(),
                "2D-material".to_string(),
                "sem".to_string(),
            ],
            image_count: 124,
            images: (1..=20)
                .map(|i| BatchImage {
                    id: format!("IMG-{i}"),
                    name: format!("sample_a_{i}.tif"),
                    size: "4.2 MB".to_string(),
                    date: "2023-10-24 14:30".to_string(),
                })
                .collect(),
            linked_tasks: vec![
                LinkedTask {
                    id: "T-1029".to_string(),
                    name: "Graphene Particle Analysis".to_string(),
                    task_type: TaskType::Particle,
                    status: TaskStatus::Completed,
                    date: "2023-10-25".to_string(),
                },
                LinkedTask {
                    id: "FT-005".to_string(),
                    name: "Graphene Segmentation Finetune".to_string(),
                    task_type: TaskType::Training,
                    status: TaskStatus::Completed,
                    date: "2023-10-26".to_string(),
                },
            ],
            status: BatchStatus::Ready,
        }
    }
}

impl Repository for MockRepository {
    fn list_tasks(&self) -> Vec<Task> {
        use TaskStatus::*;
        use TaskType::*;
        vec![
            task("T-1029", "Graphene Oxide Sample A", "2023-10-24", 120, Completed, Particle, "v1.1"),
            task("T-1028", "Carbon Nanotubes Batch 4", "2023-10-23", 45, Processing, Fiber, "v1.2-beta"),
            task("T-1025", "Unknown Polymer Mix", "2023-10-20", 12, Failed, Particle, "v1.1"),
            task("T-1024", "N95 Filter Layer", "2023-10-18", 850, Completed, Fiber, "v0.9"),
        ]
    }

    fn list_training_tasks(&self) -> Vec<Task> {
        vec![
            task(
                "FT-002",
                "Fiber Model Optimization",
                "Running",
                0,
                TaskStatus::Processing,
                TaskType::Training,
                "Base: v1.1",
            ),
            task(
                "FT-001",
                "Particle v2 Adaptation",
                "2023-10-15",
                0,
                TaskStatus::Completed,
                TaskType::Training,
                "Base: v1.0",
            ),
        ]
    }

    fn list_batches(&self) -> Vec<DataBatch> {
        let mut second = Self::template_batch("DB-2023-002");
        second.name = "Nanofiber Mat Cross-Sections".to_string();
        second.upload_date = "2023-10-19".to_string();
        second.tags = vec!["fiber".to_string(), "sem".to_string()];
        second.image_count = 48;
        second.linked_tasks.clear();
        second.status = BatchStatus::Processing;
        vec![Self::template_batch("DB-2023-001"), second]
    }

    fn batch(&self, id: &str) -> Option<DataBatch> {
        if id.trim().is_empty() {
            return None;
        }
        Some(
            self.list_batches()
                .into_iter()
                .find(|b| b.id == id)
                .unwrap_or_else(|| Self::template_batch(id)),
        )
    }

    fn user_queue(&self) -> Vec<QueueEntry> {
        vec![
            QueueEntry {
                rank: 1,
                id: "T-2045".to_string(),
                name: "Carbon Fiber Stress Test".to_string(),
                task_type: TaskType::Fiber,
                submitted: "5 mins ago".to_string(),
                priority: "High".to_string(),
            },
            QueueEntry {
                rank: 12,
                id: "T-2049".to_string(),
                name: "Nanoparticle Distribution".to_string(),
                task_type: TaskType::Particle,
                submitted: "45 mins ago".to_string(),
                priority: "Normal".to_string(),
            },
        ]
    }

    fn resources(&self) -> Vec<ResourcePool> {
        vec![
            ResourcePool {
                label: "CPU".to_string(),
                total: 128,
                available: 42,
                queued: 8,
                unit: "Cores".to_string(),
            },
            ResourcePool {
                label: "GPU".to_string(),
                total: 8,
                available: 3,
                queued: 14,
                unit: "Units".to_string(),
            },
        ]
    }

    fn analysis_images(&self) -> Vec<AnalysisImage> {
        vec![
            image("Img_001.tif", ImageStatus::Completed, 245),
            image("Img_002.tif", ImageStatus::Completed, 312),
            image("Img_003.tif", ImageStatus::Completed, 156),
            image("Img_004.tif", ImageStatus::Pending, 0),
            image("Img_005.tif", ImageStatus::Pending, 0),
        ]
    }

    fn task_comparison_tasks(&self) -> Vec<ComparisonTask> {
        [
            ("Task-2023-001", "Baseline Analysis", "2023-10-01", 120),
            ("Task-2023-002", "High Temp Batch", "2023-10-05", 156),
            ("Task-2023-003", "Low Pressure Test", "2023-10-12", 89),
            ("Task-2023-004", "Fiber Orientation B", "2023-10-15", 210),
        ]
        .into_iter()
        .map(|(id, name, date, count)| ComparisonTask {
            id: id.to_string(),
            name: name.to_string(),
            date: date.to_string(),
            count,
        })
        .collect()
    }

    fn images_for_task(&self, task_id: &str) -> Vec<AnalysisImage> {
        let done = ImageStatus::Completed;
        match task_id {
            "Task-2023-001" => vec![image("Base_01.tif", done, 100), image("Base_02.tif", done, 20)],
            "Task-2023-002" => vec![
                image("Heat_01.tif", done, 50),
                image("Heat_02.tif", done, 60),
                image("Heat_03.tif", done, 46),
            ],
            "Task-2023-003" => vec![image("LowP_01.tif", done, 89)],
            "Task-2023-004" => vec![image("FibB_01.tif", done, 110), image("FibB_02.tif", done, 100)],
            _ => vec![
                image("Img_001.tif", done, 245),
                image("Img_002.tif", done, 312),
                image("Img_003.tif", done, 156),
            ],
        }
    }

    fn datasets(&self) -> Vec<Dataset> {
        [
            ("DS-001", "Textile Defect 2023", "2.4 GB", 1200, "2 days ago"),
            ("DS-002", "Carbon Nano V1", "1.1 GB", 850, "1 week ago"),
            ("DS-003", "Graphene Oxide - Public", "4.5 GB", 3200, "2 weeks ago"),
        ]
        .into_iter()
        .map(|(id, name, size, items, last_modified)| Dataset {
            id: id.to_string(),
            name: name.to_string(),
            size: size.to_string(),
            items,
            last_modified: last_modified.to_string(),
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_task_ids_unique() {
        let repo = MockRepository;
        let mut all = repo.list_tasks();
        all.extend(repo.list_training_tasks());
        let ids: HashSet<_> = all.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), all.len());
    }

    #[test]
    fn test_unknown_batch_uses_template() {
        let repo = MockRepository;
        let batch = repo.batch("DB-NEW-001").unwrap();
        assert_eq!(batch.id, "DB-NEW-001");
        assert_eq!(batch.image_count, 124);
        assert!(repo.batch("  ").is_none());
    }

    #[test]
    fn test_known_batch_lookup() {
        let repo = MockRepository;
        let batch = repo.batch("DB-2023-002").unwrap();
        assert_eq!(batch.name, "Nanofiber Mat Cross-Sections");
        assert!(batch.linked_tasks.is_empty());
    }

    #[test]
    fn test_images_for_unknown_task_fall_back() {
        let repo = MockRepository;
        assert_eq!(repo.images_for_task("Task-2023-003").len(), 1);
        assert_eq!(repo.images_for_task("nope").len(), 3);
    }
}
