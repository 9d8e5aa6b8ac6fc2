// UniAIMS - app/state.rs
//
// Application state: the current location, back history, the navigation
// context, and the state of whichever screen is mounted.
// Owned by the eframe::App implementation.

use crate::app::drafts::{BatchDraft, ExportDraft, UploadDraft};
use crate::app::navigation::{ModeStore, NavContext};
use crate::app::views::{
    AnalysisState, BatchViewState, DashboardState, DashboardTab, DocsState, FinetuneState,
    FinetuneTab, ViewMode, WorkstationState,
};
use crate::core::export::{export_tasks_to_file, ExportFormat};
use crate::core::filter::{apply_filters, TaskFilter};
use crate::core::model::{DataBatch, Mode, Task};
use crate::core::report::ReportBuilder;
use crate::core::repository::Repository;
use crate::core::route::{Location, Route};
use crate::util::constants::MAX_HISTORY;
use crate::util::error::ExportError;
use std::path::Path;

/// Top-level application state.
pub struct AppState {
    /// Where the user is.
    pub location: Location,

    /// Previously visited targets, most recent last.
    history: Vec<String>,

    /// Sidebar collapse state and sticky mode.
    pub nav: NavContext,

    repo: Box<dyn Repository>,

    /// Rows per page for newly mounted lists.
    pub page_size: usize,

    pub dark_mode: bool,

    pub font_size: f32,

    // -- Screen state --
    pub dashboard: DashboardState,
    pub upload: UploadDraft,
    pub batch_draft: BatchDraft,
    pub export_draft: ExportDraft,
    pub batch_view: Option<BatchViewState>,
    pub workstation: Option<WorkstationState>,
    pub analysis: Option<AnalysisState>,
    pub finetune: FinetuneState,
    pub docs: DocsState,

    /// Modules collected for the report. Lives for the whole session so
    /// "Add to Report" from any analysis view lands here.
    pub report: ReportBuilder,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings (config validation and the like).
    pub warnings: Vec<String>,

    pub show_about: bool,

    pub show_warnings: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("location", &self.location)
            .field("history", &self.history.len())
            .field("nav", &self.nav)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create the initial state and mount the screen at `start`.
    pub fn new(
        repo: Box<dyn Repository>,
        store: Box<dyn ModeStore>,
        start: &str,
        page_size: usize,
    ) -> Self {
        let location = Location::parse(start);
        let nav = NavContext::new(store, &location.route.path());
        let mut state = Self {
            location: Location::parse("/dashboard"),
            history: Vec::new(),
            nav,
            repo,
            page_size,
            dark_mode: true,
            font_size: crate::util::constants::DEFAULT_FONT_SIZE,
            dashboard: DashboardState::new(page_size),
            upload: UploadDraft::default(),
            batch_draft: BatchDraft::default(),
            export_draft: ExportDraft::default(),
            batch_view: None,
            workstation: None,
            analysis: None,
            finetune: FinetuneState::default(),
            docs: DocsState::default(),
            report: ReportBuilder::with_mock_modules(),
            status_message: "Ready.".to_string(),
            warnings: Vec::new(),
            show_about: false,
            show_warnings: false,
            debug_mode: false,
        };
        let previous = std::mem::replace(&mut state.location, location);
        state.mount(&previous.route, true);
        state
    }

    pub fn repo(&self) -> &dyn Repository {
        self.repo.as_ref()
    }

    pub fn route(&self) -> &Route {
        &self.location.route
    }

    pub fn mode(&self) -> Option<Mode> {
        self.nav.mode()
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Go to `target` (`path?query`), following index redirects.
    pub fn navigate(&mut self, target: &str) {
        self.go(target, true);
    }

    /// Return to the previous location, if any.
    pub fn back(&mut self) {
        if let Some(target) = self.history.pop() {
            self.go(&target, false);
        }
    }

    /// Set a query parameter on the current route.
    pub fn set_query(&mut self, key: &str, value: &str) {
        let mut next = self.location.clone();
        next.set_query(key, value);
        let href = next.href();
        self.go(&href, true);
    }

    fn go(&mut self, target: &str, record: bool) {
        let next = Location::parse(target);
        if next == self.location {
            return;
        }
        if let Route::NotFound(path) = &next.route {
            tracing::warn!(route = %path, "No view for route");
        }

        if record {
            self.history.push(self.location.href());
            if self.history.len() > MAX_HISTORY {
                self.history.remove(0);
            }
        }

        let previous = std::mem::replace(&mut self.location, next);
        tracing::info!(
            from = %previous.href(),
            route = %self.location.href(),
            "Navigate"
        );
        self.nav.on_path_change(&self.location.route.path());
        self.mount(&previous.route, false);
    }

    /// Create or drop per-screen state after the route changed from `previous`.
    ///
    /// Screen state is recreated when its screen is entered from a different
    /// route, which is what a remount does. Query-only changes keep it.
    fn mount(&mut self, previous: &Route, initial: bool) {
        let route = self.location.route.clone();
        let entered = initial || *previous != route;
        let per_page = self.page_size;

        // Leaving the dashboard group drops its filters and drafts.
        if previous.group() != route.group()
            && previous.group() == crate::core::route::RouteGroup::Dashboard
        {
            self.dashboard = DashboardState::new(per_page);
        }
        if *previous == Route::Upload && route != Route::Upload {
            self.upload = UploadDraft::default();
        }
        if *previous == Route::NewBatch && route != Route::NewBatch {
            self.batch_draft = BatchDraft::default();
        }

        if route == Route::Dashboard {
            if let Some(tab) = self.location.query("tab").and_then(DashboardTab::from_key) {
                self.dashboard.tab = tab;
            }
        }

        // Canvas: identity transform on every mount, gone when not shown.
        match &route {
            Route::Particles { task_id } if entered => {
                self.workstation = Some(WorkstationState::mount(Mode::Particle, task_id));
            }
            Route::Fibers { task_id } if entered => {
                self.workstation = Some(WorkstationState::mount(Mode::Fiber, task_id));
            }
            Route::Particles { .. } | Route::Fibers { .. } => {}
            _ => self.workstation = None,
        }

        match &route {
            Route::Analysis { task_id, .. } if entered => {
                self.analysis = Some(AnalysisState::new(self.repo.as_ref(), task_id));
            }
            Route::Analysis { .. } => {}
            _ => self.analysis = None,
        }

        match &route {
            Route::Batch { batch_id, .. } => {
                let loaded = self.batch_view.as_ref().and_then(|b| b.batch_id());
                if loaded != Some(batch_id.as_str()) {
                    self.batch_view =
                        Some(BatchViewState::load(self.repo.as_ref(), batch_id, per_page));
                }
            }
            _ => self.batch_view = None,
        }

        if route == Route::Finetune && entered && *previous != Route::Finetune {
            self.finetune = FinetuneState::default();
        }
        if route == Route::Docs && entered && *previous != Route::Docs {
            self.docs = DocsState::default();
        }
        if !route.has_sidebar() {
            self.export_draft.open = false;
        }
    }

    // =========================================================================
    // Dashboard helpers
    // =========================================================================

    /// Card grid or table for list screens.
    pub fn view_mode(&self) -> ViewMode {
        ViewMode::from_query(self.location.query("view"))
    }

    pub fn finetune_tab(&self) -> FinetuneTab {
        FinetuneTab::from_query(self.location.query("tab"))
    }

    pub fn set_dashboard_tab(&mut self, tab: DashboardTab) {
        self.dashboard.tab = tab;
        tracing::debug!(tab = tab.key(), "Dashboard tab changed");
    }

    fn task_source(&self, tab: DashboardTab) -> (Vec<Task>, &TaskFilter) {
        match tab {
            DashboardTab::Training => (self.repo.list_training_tasks(), &self.dashboard.training.filter),
            _ => (self.repo.list_tasks(), &self.dashboard.analysis.filter),
        }
    }

    /// All tasks of a dashboard list that pass its filter, in list order.
    pub fn filtered_tasks(&self, tab: DashboardTab) -> Vec<Task> {
        let (tasks, filter) = self.task_source(tab);
        let keep = apply_filters(&tasks, filter);
        keep.into_iter()
            .filter_map(|i| tasks.get(i).cloned())
            .collect()
    }

    /// The visible page of a dashboard task list and the filtered total.
    pub fn visible_tasks(&self, tab: DashboardTab) -> (Vec<Task>, usize) {
        let all = self.filtered_tasks(tab);
        let pager = match tab {
            DashboardTab::Training => &self.dashboard.training.pager,
            _ => &self.dashboard.analysis.pager,
        };
        let total = all.len();
        (pager.slice(&all).to_vec(), total)
    }

    /// The visible page of data batches and the filtered total.
    pub fn visible_batches(&self) -> (Vec<DataBatch>, usize) {
        let batches = self.repo.list_batches();
        let keep = apply_filters(&batches, &self.dashboard.batches.filter);
        let all: Vec<DataBatch> = keep
            .into_iter()
            .filter_map(|i| batches.get(i).cloned())
            .collect();
        let total = all.len();
        (self.dashboard.batches.pager.slice(&all).to_vec(), total)
    }

    /// Export the filtered rows of a dashboard task list.
    pub fn export_tasks(
        &mut self,
        tab: DashboardTab,
        dest: &Path,
        format: ExportFormat,
    ) -> Result<usize, ExportError> {
        let tasks = self.filtered_tasks(tab);
        let refs: Vec<&Task> = tasks.iter().collect();
        match export_tasks_to_file(&refs, dest, format) {
            Ok(n) => {
                tracing::info!(rows = n, path = %dest.display(), format = format.label(), "Tasks exported");
                self.status_message = format!("Exported {n} tasks to {}.", format.label());
                Ok(n)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Task export failed");
                self.status_message = format!("{} export failed: {e}", format.label());
                Err(e)
            }
        }
    }

    // =========================================================================
    // Drafts
    // =========================================================================

    /// Start the analysis described by the upload form.
    pub fn start_upload(&mut self) {
        let target = self.upload.start().path();
        self.status_message = "Analysis task queued.".to_string();
        self.navigate(&target);
    }

    /// Create the batch described by the batch form.
    pub fn submit_batch(&mut self) {
        let target = self.batch_draft.submit().path();
        self.status_message = "Data batch created.".to_string();
        self.navigate(&target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::navigation::MemoryStore;
    use crate::core::filter::TimeBucket;
    use crate::core::model::TaskStatus;
    use crate::core::repository::MockRepository;

    fn state_at(start: &str) -> AppState {
        AppState::new(Box::new(MockRepository), Box::new(MemoryStore::new()), start, 10)
    }

    #[test]
    fn test_root_redirects_to_dashboard() {
        let st = state_at("/");
        assert_eq!(*st.route(), Route::Dashboard);
        assert!(!st.can_go_back());
    }

    #[test]
    fn test_navigate_and_back() {
        let mut st = state_at("/dashboard");
        st.navigate("/T-1029/analysis");
        assert_eq!(st.route().path(), "/T-1029/analysis/attribute");
        assert!(st.analysis.is_some());
        st.back();
        assert_eq!(*st.route(), Route::Dashboard);
        assert!(st.analysis.is_none());
        assert!(!st.can_go_back());
    }

    #[test]
    fn test_same_target_is_noop() {
        let mut st = state_at("/dashboard");
        st.navigate("/dashboard");
        assert!(!st.can_go_back());
    }

    #[test]
    fn test_canvas_resets_on_remount_only() {
        let mut st = state_at("/T-1029/particles");
        let ws = st.workstation.as_mut().unwrap();
        ws.transform.zoom(-100.0, true);
        assert_eq!(ws.transform.scale(), 2.0);

        // Query change keeps the mounted canvas.
        st.set_query("view", "grid");
        assert_eq!(st.workstation.as_ref().unwrap().transform.scale(), 2.0);

        st.navigate("/T-1029/reports");
        assert!(st.workstation.is_none());
        st.navigate("/T-1029/particles");
        assert_eq!(st.workstation.as_ref().unwrap().transform.scale(), 1.0);
    }

    #[test]
    fn test_dashboard_filters_reset_when_leaving_group() {
        let mut st = state_at("/dashboard");
        st.dashboard.analysis.filter.search = "carbon".to_string();
        st.navigate("/upload");
        assert_eq!(st.dashboard.analysis.filter.search, "carbon");
        st.navigate("/T-1028/fibers");
        assert!(st.dashboard.analysis.filter.is_empty());
    }

    #[test]
    fn test_dashboard_tab_from_query() {
        let st = state_at("/dashboard?tab=data");
        assert_eq!(st.dashboard.tab, DashboardTab::Data);
    }

    #[test]
    fn test_visible_tasks_filter_and_page() {
        let mut st = state_at("/dashboard");
        st.dashboard.analysis.filter.status = Some(TaskStatus::Completed);
        let (rows, total) = st.visible_tasks(DashboardTab::Analysis);
        assert_eq!(total, 2);
        assert_eq!(rows.len(), 2);

        st.dashboard.training.filter.time = TimeBucket::Today;
        let (rows, _) = st.visible_tasks(DashboardTab::Training);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "FT-002");

        st.dashboard.analysis.filter = TaskFilter::default();
        st.dashboard.analysis.pager.set_per_page(3);
        st.dashboard.analysis.pager.next(4);
        let (rows, total) = st.visible_tasks(DashboardTab::Analysis);
        assert_eq!((rows.len(), total), (1, 4));
    }

    #[test]
    fn test_submit_batch_opens_new_overview() {
        let mut st = state_at("/data/new");
        st.batch_draft.title = "Fresh".to_string();
        st.submit_batch();
        assert_eq!(st.route().path(), "/data/DB-NEW-001/overview");
        assert_eq!(st.batch_draft, BatchDraft::default());
        assert_eq!(st.batch_view.as_ref().unwrap().batch_id(), Some("DB-NEW-001"));
    }

    #[test]
    fn test_start_upload_sets_mode() {
        let mut st = state_at("/upload");
        st.upload.set_task_type(Mode::Fiber);
        st.start_upload();
        assert_eq!(st.mode(), Some(Mode::Fiber));
        assert!(st.workstation.is_some());
    }

    #[test]
    fn test_batch_edits_survive_tab_switch() {
        let mut st = state_at("/data/DB-2023-001");
        st.batch_view.as_mut().unwrap().edit_name = "Edited".to_string();
        st.navigate("/data/DB-2023-001/browser");
        assert_eq!(st.batch_view.as_ref().unwrap().edit_name, "Edited");
        st.navigate("/data/DB-2023-002/overview");
        assert_eq!(
            st.batch_view.as_ref().unwrap().edit_name,
            "Nanofiber Mat Cross-Sections"
        );
    }

    #[test]
    fn test_history_is_capped() {
        let mut st = state_at("/dashboard");
        for i in 0..(MAX_HISTORY + 10) {
            st.navigate(&format!("/T-{i}/reports"));
        }
        assert_eq!(st.history.len(), MAX_HISTORY);
    }
}
