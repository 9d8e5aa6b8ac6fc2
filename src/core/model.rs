// UniAIMS - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// Every record here is transient mock data: constructed by the repository,
// read by the views, never mutated in place.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Tasks
// =============================================================================

/// A mocked analysis or training job shown in the dashboard lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within the list it belongs to (e.g. `T-1029`, `FT-002`).
    pub id: String,

    pub name: String,

    /// ISO date string, or `"Running"` for jobs still in progress.
    pub date: String,

    /// Number of images (or detected items) the task covers.
    pub items: u32,

    pub status: TaskStatus,

    pub task_type: TaskType,

    /// Model version label, e.g. `v1.1` or `Base: v1.0`.
    pub model: String,
}

impl Task {
    /// Route a dashboard card opens: training jobs open the fine-tune
    /// screen, analysis tasks open their own workstation.
    pub fn target_path(&self) -> String {
        match self.task_type {
            TaskType::Training => "/finetune".to_string(),
            TaskType::Particle => format!("/{}/particles", self.id),
            TaskType::Fiber => format!("/{}/fibers", self.id),
        }
    }
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Completed,
    Processing,
    Failed,
}

impl TaskStatus {
    /// Returns all variants in display order.
    pub fn all() -> &'static [TaskStatus] {
        &[Self::Completed, Self::Processing, Self::Failed]
    }

    /// Lowercase key used in filters and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Processing => "processing",
            Self::Failed => "failed",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Processing => "Processing",
            Self::Failed => "Failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "completed" => Some(Self::Completed),
            "processing" => Some(Self::Processing),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Kind of job a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Particle,
    Fiber,
    Training,
}

impl TaskType {
    /// Returns all variants in display order.
    pub fn all() -> &'static [TaskType] {
        &[Self::Particle, Self::Fiber, Self::Training]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Particle => "particle",
            Self::Fiber => "fiber",
            Self::Training => "training",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Particle => "Particle",
            Self::Fiber => "Fiber",
            Self::Training => "Training",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "particle" => Some(Self::Particle),
            "fiber" => Some(Self::Fiber),
            "training" => Some(Self::Training),
            _ => None,
        }
    }

    /// Analysis mode implied by this task type (training tasks have none).
    pub fn mode(&self) -> Option<Mode> {
        match self {
            Self::Particle => Some(Mode::Particle),
            Self::Fiber => Some(Mode::Fiber),
            Self::Training => None,
        }
    }
}

// =============================================================================
// Mode
// =============================================================================

/// The sticky particle-vs-fiber context remembered across navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Particle,
    Fiber,
}

impl Mode {
    /// The exact string persisted in the key-value store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Particle => "particle",
            Self::Fiber => "fiber",
        }
    }

    /// Parse a stored value. Anything other than the two exact keys is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "particle" => Some(Self::Particle),
            "fiber" => Some(Self::Fiber),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Particle => "Particle Analysis",
            Self::Fiber => "Fiber Analysis",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Data batches
// =============================================================================

/// A mocked uploaded image collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataBatch {
    pub id: String,
    pub name: String,
    pub upload_date: String,
    pub uploader: String,
    pub description: String,
    pub tags: Vec<String>,

    /// Total images in the batch; `images` only holds the first page of them.
    pub image_count: u32,
    pub images: Vec<BatchImage>,
    pub linked_tasks: Vec<LinkedTask>,
    pub status: BatchStatus,
}

/// One image file inside a data batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchImage {
    pub id: String,
    pub name: String,
    pub size: String,
    pub date: String,
}

/// A task that consumed a data batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedTask {
    pub id: String,
    pub name: String,
    pub task_type: TaskType,
    pub status: TaskStatus,
    pub date: String,
}

impl LinkedTask {
    /// Route the linked-task row opens: training jobs open the fine-tune
    /// dashboard, analysis jobs open their workstation.
    pub fn target_path(&self) -> String {
        match self.task_type {
            TaskType::Training => "/finetune?tab=training".to_string(),
            TaskType::Particle => format!("/{}/particles", self.id),
            TaskType::Fiber => format!("/{}/fibers", self.id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Ready,
    Processing,
    Archived,
}

impl BatchStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Processing => "Processing",
            Self::Archived => "Archived",
        }
    }
}

// =============================================================================
// Dashboard side data
// =============================================================================

/// A row in the "your queue" list of the resources tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub rank: u32,
    pub id: String,
    pub name: String,
    pub task_type: TaskType,
    pub submitted: String,
    pub priority: String,
}

/// Availability of one compute pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcePool {
    pub label: String,
    pub total: u32,
    pub available: u32,
    pub queued: u32,
    pub unit: String,
}

impl ResourcePool {
    /// Fraction of the pool currently in use, in `0.0..=1.0`.
    pub fn utilisation(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        let used = self.total.saturating_sub(self.available);
        used as f32 / self.total as f32
    }
}

// =============================================================================
// Workstation and analysis data
// =============================================================================

/// Processing state of one image in a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStatus {
    Completed,
    Processing,
    Pending,
}

impl ImageStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Processing => "Processing",
            Self::Pending => "Pending",
        }
    }
}

/// An image participating in a task's analysis, with its detection count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisImage {
    pub id: String,
    pub status: ImageStatus,
    pub count: u32,
}

/// A task row offered by the task-comparison view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTask {
    pub id: String,
    pub name: String,
    pub date: String,
    pub count: u32,
}

/// A training dataset listed by the fine-tuning view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub name: String,
    pub size: String,
    pub items: u32,
    pub last_modified: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_is_exact() {
        assert_eq!(Mode::parse("particle"), Some(Mode::Particle));
        assert_eq!(Mode::parse("fiber"), Some(Mode::Fiber));
        assert_eq!(Mode::parse("Fiber"), None);
        assert_eq!(Mode::parse(""), None);
    }

    #[test]
    fn test_linked_task_target_path() {
        let mut task = LinkedTask {
            id: "T-1029".to_string(),
            name: "Graphene".to_string(),
            task_type: TaskType::Particle,
            status: TaskStatus::Completed,
            date: "2023-10-25".to_string(),
        };
        assert_eq!(task.target_path(), "/T-1029/particles");
        task.task_type = TaskType::Training;
        assert_eq!(task.target_path(), "/finetune?tab=training");
    }

    #[test]
    fn test_task_target_path() {
        let mut task = Task {
            id: "T-1028".to_string(),
            name: "Carbon Fiber Mesh".to_string(),
            date: "2023-10-24".to_string(),
            items: 45,
            status: TaskStatus::Processing,
            task_type: TaskType::Fiber,
            model: "v1.1".to_string(),
        };
        assert_eq!(task.target_path(), "/T-1028/fibers");
        task.task_type = TaskType::Training;
        assert_eq!(task.target_path(), "/finetune");
    }

    #[test]
    fn test_resource_utilisation() {
        let pool = ResourcePool {
            label: "GPU".to_string(),
            total: 8,
            available: 3,
            queued: 14,
            unit: "Units".to_string(),
        };
        assert!((pool.utilisation() - 0.625).abs() < f32::EPSILON);
    }

    #[test]
    fn test_status_parse_round_trip() {
        for status in TaskStatus::all() {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(*status));
        }
        for t in TaskType::all() {
            assert_eq!(TaskType::parse(t.as_str()), Some(*t));
        }
    }
}
