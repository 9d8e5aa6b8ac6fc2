// UniAIMS - app/views.rs
//
// Per-screen UI state. Each struct lives as long as its screen is mounted;
// AppState recreates them on navigation the way a remount would.

use crate::core::analysis::{BinSettings, ChartKind, ImageSelection, YAxisMode};
use crate::core::canvas::{MockOverlay, ViewTransform};
use crate::core::filter::{Pager, TaskFilter};
use crate::core::model::{ComparisonTask, DataBatch, Mode};
use crate::core::repository::Repository;
use crate::util::constants::{MOCK_FIBER_COUNT, MOCK_OVERLAY_SEED, MOCK_PARTICLE_COUNT};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// Dashboard
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Analysis,
    Training,
    Resources,
    Data,
}

impl DashboardTab {
    pub fn all() -> &'static [DashboardTab] {
        &[Self::Analysis, Self::Training, Self::Resources, Self::Data]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Analysis => "Analysis Tasks",
            Self::Training => "Fine-tuning Jobs",
            Self::Resources => "Resources",
            Self::Data => "Data Batches",
        }
    }

    /// Value of the `tab` query parameter.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::Training => "training",
            Self::Resources => "resources",
            Self::Data => "data",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.key() == key)
    }
}

/// Card grid or table, read from the `view` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }

    /// Anything other than `list` shows the grid.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("list") => Self::List,
            _ => Self::Grid,
        }
    }
}

/// A filter and its page cursor for one list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    pub filter: TaskFilter,
    pub pager: Pager,
}

impl ListState {
    pub fn with_page_size(per_page: usize) -> Self {
        Self {
            filter: TaskFilter::default(),
            pager: Pager::new(per_page),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub tab: DashboardTab,
    pub analysis: ListState,
    pub training: ListState,
    pub batches: ListState,
}

impl DashboardState {
    pub fn new(per_page: usize) -> Self {
        Self {
            tab: DashboardTab::default(),
            analysis: ListState::with_page_size(per_page),
            training: ListState::with_page_size(per_page),
            batches: ListState::with_page_size(per_page),
        }
    }
}

// =============================================================================
// Workstation
// =============================================================================

/// Collapsible sections of the workstation side panel. One is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkstationPanel {
    Images,
    Stats,
    ScaleBar,
    Filters,
}

impl WorkstationPanel {
    pub fn all() -> &'static [WorkstationPanel] {
        &[Self::Images, Self::Stats, Self::ScaleBar, Self::Filters]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Images => "Task Images",
            Self::Stats => "Detection Stats",
            Self::ScaleBar => "Scale Bar",
            Self::Filters => "Filters",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkstationState {
    pub mode: Mode,
    pub transform: ViewTransform,
    pub overlay: MockOverlay,
    pub show_overlay: bool,
    /// Index into the task's image list.
    pub image_index: usize,
    pub active_panel: Option<WorkstationPanel>,
    pub sensitivity: f32,
    /// Micrometres per pixel.
    pub scale_bar_um_per_px: f32,
    pub min_diameter_um: f32,
    /// Particle under the pointer, for hover highlighting.
    pub hovered: Option<usize>,
}

impl WorkstationState {
    /// Fresh workstation for a mount: identity transform, static overlay.
    pub fn mount(mode: Mode, task_id: &str) -> Self {
        let seed = MOCK_OVERLAY_SEED ^ crate::core::analysis::seed_for(task_id);
        let overlay = match mode {
            Mode::Particle => MockOverlay::particles(MOCK_PARTICLE_COUNT, seed),
            Mode::Fiber => MockOverlay::fibers(MOCK_FIBER_COUNT, seed),
        };
        Self {
            mode,
            transform: ViewTransform::default(),
            overlay,
            show_overlay: true,
            image_index: 0,
            active_panel: Some(WorkstationPanel::Images),
            sensitivity: 0.5,
            scale_bar_um_per_px: 0.1,
            min_diameter_um: 0.0,
            hovered: None,
        }
    }

    /// Open `panel`, or close it if it is already open.
    pub fn toggle_panel(&mut self, panel: WorkstationPanel) {
        self.active_panel = if self.active_panel == Some(panel) {
            None
        } else {
            Some(panel)
        };
    }

    pub fn next_image(&mut self, total: usize) {
        if self.image_index + 1 < total {
            self.image_index += 1;
        }
    }

    pub fn prev_image(&mut self) {
        self.image_index = self.image_index.saturating_sub(1);
    }
}

// =============================================================================
// Analysis views
// =============================================================================

fn image_ids(repo: &dyn Repository) -> Vec<String> {
    repo.analysis_images().into_iter().map(|i| i.id).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeState {
    pub attribute: String,
    pub images: ImageSelection,
    pub y_axis: YAxisMode,
    pub chart: ChartKind,
    pub bins: BinSettings,
}

impl AttributeState {
    pub fn new(repo: &dyn Repository) -> Self {
        Self {
            attribute: "Diameter".to_string(),
            images: ImageSelection::all_of(image_ids(repo)),
            y_axis: YAxisMode::Count,
            chart: ChartKind::Histogram,
            bins: BinSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationState {
    pub x_attribute: String,
    pub y_attribute: String,
    pub images: ImageSelection,
    pub show_regression: bool,
    pub log_x: bool,
    pub log_y: bool,
}

impl CorrelationState {
    pub fn new(repo: &dyn Repository) -> Self {
        Self {
            x_attribute: "Diameter".to_string(),
            y_attribute: "Circularity".to_string(),
            images: ImageSelection::all_of(image_ids(repo)),
            show_regression: true,
            log_x: false,
            log_y: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonState {
    pub attribute: String,
    pub images: ImageSelection,
    pub log_scale: bool,
}

impl ComparisonState {
    pub fn new(repo: &dyn Repository) -> Self {
        Self {
            attribute: "Diameter".to_string(),
            images: ImageSelection::first_n(image_ids(repo), 3),
            log_scale: false,
        }
    }
}

/// A task column in the task comparison chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareEntry {
    pub id: String,
    pub name: String,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskComparisonState {
    pub attribute: String,
    pub search: String,
    pub dropdown_open: bool,
    pub tasks: Vec<CompareEntry>,
    /// Task whose images are shown in the image strip.
    pub active_task: String,
    pub log_scale: bool,
    selection: BTreeMap<String, BTreeSet<String>>,
}

impl TaskComparisonState {
    /// Start with only the current task in the comparison.
    pub fn new(current_task: &str) -> Self {
        Self {
            attribute: "Diameter".to_string(),
            search: String::new(),
            dropdown_open: false,
            tasks: vec![CompareEntry {
                id: current_task.to_string(),
                name: current_task.to_string(),
                is_current: true,
            }],
            active_task: current_task.to_string(),
            log_scale: false,
            selection: BTreeMap::new(),
        }
    }

    /// Add a task; duplicates are ignored. Closes the picker.
    pub fn add_task(&mut self, task: &ComparisonTask) {
        if !self.tasks.iter().any(|t| t.id == task.id) {
            self.tasks.push(CompareEntry {
                id: task.id.clone(),
                name: task.name.clone(),
                is_current: false,
            });
        }
        self.dropdown_open = false;
    }

    /// Remove a task. If its images were shown, the strip falls back to the
    /// first remaining task.
    pub fn remove_task(&mut self, id: &str) {
        self.tasks.retain(|t| t.id != id);
        self.selection.remove(id);
        if self.active_task == id {
            self.active_task = self.tasks.first().map(|t| t.id.clone()).unwrap_or_default();
        }
    }

    pub fn toggle_image(&mut self, task_id: &str, image_id: &str) {
        let set = self.selection.entry(task_id.to_string()).or_default();
        if !set.remove(image_id) {
            set.insert(image_id.to_string());
        }
    }

    pub fn is_image_selected(&self, task_id: &str, image_id: &str) -> bool {
        self.selection
            .get(task_id)
            .is_some_and(|s| s.contains(image_id))
    }

    /// Tasks the picker offers: not yet compared and matching the search text.
    pub fn candidates<'a>(&self, all: &'a [ComparisonTask]) -> Vec<&'a ComparisonTask> {
        let needle = self.search.to_lowercase();
        all.iter()
            .filter(|t| !self.tasks.iter().any(|c| c.id == t.id))
            .filter(|t| {
                needle.is_empty()
                    || t.name.to_lowercase().contains(&needle)
                    || t.id.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn is_current(&self, task_id: &str) -> bool {
        self.tasks.iter().any(|t| t.id == task_id && t.is_current)
    }
}

/// State for all four analysis screens of one task.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisState {
    pub attribute: AttributeState,
    pub correlation: CorrelationState,
    pub comparison: ComparisonState,
    pub task_comparison: TaskComparisonState,
}

impl AnalysisState {
    pub fn new(repo: &dyn Repository, task_id: &str) -> Self {
        Self {
            attribute: AttributeState::new(repo),
            correlation: CorrelationState::new(repo),
            comparison: ComparisonState::new(repo),
            task_comparison: TaskComparisonState::new(task_id),
        }
    }
}

// =============================================================================
// Fine-tuning, data batch, docs
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinetuneTab {
    #[default]
    Settings,
    Training,
    Data,
    Annotation,
}

impl FinetuneTab {
    /// Missing or unknown `tab` values show the configuration tab.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("training") => Self::Training,
            Some("data") => Self::Data,
            Some("annotation") => Self::Annotation,
            _ => Self::Settings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinetuneState {
    pub job_name: String,
    /// Source task id; empty until chosen.
    pub source_task: String,
    pub base_model: String,
    pub selected_dataset: Option<String>,
}

impl Default for FinetuneState {
    fn default() -> Self {
        Self {
            job_name: "New_FineTune_Job_01".to_string(),
            source_task: String::new(),
            base_model: "v1.1".to_string(),
            selected_dataset: None,
        }
    }
}

/// Editable copy of the batch shown in the data batch screens.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchViewState {
    pub batch: Option<DataBatch>,
    pub edit_name: String,
    pub edit_description: String,
    pub linked: ListState,
    pub images: Pager,
}

impl BatchViewState {
    pub fn load(repo: &dyn Repository, batch_id: &str, per_page: usize) -> Self {
        let batch = repo.batch(batch_id);
        let (edit_name, edit_description) = batch
            .as_ref()
            .map(|b| (b.name.clone(), b.description.clone()))
            .unwrap_or_default();
        Self {
            batch,
            edit_name,
            edit_description,
            linked: ListState::with_page_size(per_page),
            images: Pager::new(per_page),
        }
    }

    pub fn batch_id(&self) -> Option<&str> {
        self.batch.as_ref().map(|b| b.id.as_str())
    }

    /// Whether the edit fields differ from the loaded batch.
    pub fn is_dirty(&self) -> bool {
        self.batch
            .as_ref()
            .is_some_and(|b| b.name != self.edit_name || b.description != self.edit_description)
    }

    /// Apply the edits to the in-memory copy. Nothing is persisted.
    pub fn save(&mut self) {
        if let Some(batch) = self.batch.as_mut() {
            batch.name = self.edit_name.clone();
            batch.description = self.edit_description.clone();
            tracing::info!(batch_id = %batch.id, "Batch details saved");
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsState {
    pub active_page: &'static str,
    pub search: String,
}

impl Default for DocsState {
    fn default() -> Self {
        Self {
            active_page: crate::core::docs::DEFAULT_PAGE,
            search: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::repository::MockRepository;

    #[test]
    fn test_view_mode_from_query() {
        assert_eq!(ViewMode::from_query(None), ViewMode::Grid);
        assert_eq!(ViewMode::from_query(Some("list")), ViewMode::List);
        assert_eq!(ViewMode::from_query(Some("tiles")), ViewMode::Grid);
    }

    #[test]
    fn test_workstation_mount_is_identity() {
        let ws = WorkstationState::mount(Mode::Particle, "T-1029");
        assert_eq!(ws.transform, ViewTransform::default());
        assert_eq!(ws.overlay.particles.len(), MOCK_PARTICLE_COUNT);
        assert_eq!(ws, WorkstationState::mount(Mode::Particle, "T-1029"));
    }

    #[test]
    fn test_panel_toggle_is_exclusive() {
        let mut ws = WorkstationState::mount(Mode::Fiber, "T-1028");
        ws.toggle_panel(WorkstationPanel::Filters);
        assert_eq!(ws.active_panel, Some(WorkstationPanel::Filters));
        ws.toggle_panel(WorkstationPanel::Filters);
        assert_eq!(ws.active_panel, None);
    }

    #[test]
    fn test_image_stepping_stays_in_range() {
        let mut ws = WorkstationState::mount(Mode::Particle, "T-1");
        ws.prev_image();
        assert_eq!(ws.image_index, 0);
        for _ in 0..10 {
            ws.next_image(5);
        }
        assert_eq!(ws.image_index, 4);
    }

    #[test]
    fn test_task_comparison_add_remove() {
        let repo = MockRepository;
        let all = repo.task_comparison_tasks();
        let mut st = TaskComparisonState::new("T-1029");
        assert_eq!(st.candidates(&all).len(), 4);

        st.add_task(&all[1]);
        st.add_task(&all[1]);
        assert_eq!(st.tasks.len(), 2);
        assert_eq!(st.candidates(&all).len(), 3);

        st.active_task = all[1].id.clone();
        st.toggle_image(&all[1].id, "Heat_01.tif");
        assert!(st.is_image_selected(&all[1].id, "Heat_01.tif"));
        st.remove_task(&all[1].id);
        assert_eq!(st.active_task, "T-1029");
        assert!(!st.is_image_selected(&all[1].id, "Heat_01.tif"));
        assert!(st.is_current("T-1029"));
    }

    #[test]
    fn test_candidate_search() {
        let all = MockRepository.task_comparison_tasks();
        let mut st = TaskComparisonState::new("T-1");
        st.search = "temp".to_string();
        let c = st.candidates(&all);
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].id, "Task-2023-002");
    }

    #[test]
    fn test_comparison_defaults_to_first_three_images() {
        let st = ComparisonState::new(&MockRepository);
        assert_eq!(st.images.selected().len(), 3);
        assert!(!st.images.is_all_selected());
    }

    #[test]
    fn test_batch_edit_and_save() {
        let mut st = BatchViewState::load(&MockRepository, "DB-2023-001", 10);
        assert!(!st.is_dirty());
        st.edit_name = "Renamed".to_string();
        assert!(st.is_dirty());
        st.save();
        assert!(!st.is_dirty());
        assert_eq!(st.batch.as_ref().unwrap().name, "Renamed");
    }

    #[test]
    fn test_finetune_tab_default() {
        assert_eq!(FinetuneTab::from_query(None), FinetuneTab::Settings);
        assert_eq!(FinetuneTab::from_query(Some("data")), FinetuneTab::Data);
    }
}
