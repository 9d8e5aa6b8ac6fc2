// UniAIMS - tests/e2e_navigation.rs
//
// End-to-end navigation tests against the library crate.
//
// These drive `AppState` the way the GUI does (navigate, back, set_query)
// with the real file-backed preference store in a temporary directory, so
// the sticky analysis mode is checked all the way to disk and back.

use std::path::Path;
use uniaims::app::state::AppState;
use uniaims::app::views::DashboardTab;
use uniaims::core::model::Mode;
use uniaims::core::repository::MockRepository;
use uniaims::core::route::{AnalysisView, BatchTab, Route};
use uniaims::platform::store::{self, FileStore};
use uniaims::util::constants::{DEFAULT_PAGE_SIZE, MODE_STORE_KEY};

// =============================================================================
// Helpers
// =============================================================================

fn state_with_store(store_path: &Path, start: &str) -> AppState {
    AppState::new(
        Box::new(MockRepository),
        Box::new(FileStore::open(store_path)),
        start,
        DEFAULT_PAGE_SIZE,
    )
}

// =============================================================================
// Mode persistence
// =============================================================================

/// Visiting a fiber workstation then the reports page keeps "fiber" stored.
#[test]
fn e2e_fiber_mode_survives_neutral_route() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut state = state_with_store(&path, "/dashboard");
    assert_eq!(state.mode(), None);

    state.navigate("/T-1024/fibers");
    assert_eq!(state.mode(), Some(Mode::Fiber));

    state.navigate("/T-1024/reports");
    assert_eq!(state.mode(), Some(Mode::Fiber));

    let on_disk = store::load(&path).expect("store file written");
    assert_eq!(on_disk.get(MODE_STORE_KEY).map(String::as_str), Some("fiber"));
}

/// A fresh launch on a neutral route picks the mode up from the store.
#[test]
fn e2e_mode_restored_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let mut state = state_with_store(&path, "/dashboard");
        state.navigate("/T-1029/particles");
        state.navigate("/T-1028/fibers");
    }

    let state = state_with_store(&path, "/T-1028/reports");
    assert_eq!(state.mode(), Some(Mode::Fiber));
}

/// A corrupt store file is treated as empty rather than failing startup.
#[test]
fn e2e_corrupt_store_falls_back_to_no_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut state = state_with_store(&path, "/docs");
    assert_eq!(state.mode(), None);

    // The next workstation visit rewrites the file with valid content.
    state.navigate("/T-1029/particles");
    let on_disk = store::load(&path).expect("store rewritten");
    assert_eq!(on_disk.get(MODE_STORE_KEY).map(String::as_str), Some("particle"));
}

// =============================================================================
// Navigation flows
// =============================================================================

/// Dashboard -> workstation -> analysis -> back twice returns to the dashboard.
#[test]
fn e2e_open_task_then_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_with_store(&dir.path().join("store.json"), "/dashboard");

    state.navigate("/T-1029/particles");
    assert!(state.workstation.is_some());
    assert!(state.route().has_sidebar());

    state.navigate("/T-1029/analysis");
    assert_eq!(
        *state.route(),
        Route::Analysis {
            task_id: "T-1029".to_string(),
            view: AnalysisView::Attribute,
        }
    );
    assert!(state.workstation.is_none());
    assert!(state.analysis.is_some());

    state.back();
    assert_eq!(
        *state.route(),
        Route::Particles {
            task_id: "T-1029".to_string()
        }
    );
    state.back();
    assert_eq!(*state.route(), Route::Dashboard);
    assert!(!state.can_go_back());
}

/// Canvas pan/zoom is reset when the workstation is mounted again.
#[test]
fn e2e_canvas_resets_on_remount() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_with_store(&dir.path().join("store.json"), "/T-1029/particles");

    {
        let ws = state.workstation.as_mut().unwrap();
        assert!(ws.transform.zoom(-100.0, true));
        assert!(ws.transform.scale() > 1.0);
    }

    state.navigate("/T-1029/reports");
    state.navigate("/T-1029/particles");
    let ws = state.workstation.as_ref().unwrap();
    assert_eq!(ws.transform.scale(), 1.0);
}

/// The dashboard tab lives in the query and is restored by back().
#[test]
fn e2e_dashboard_tab_from_query() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_with_store(&dir.path().join("store.json"), "/dashboard");

    state.set_query("tab", "data");
    assert_eq!(state.dashboard.tab, DashboardTab::Data);
    assert_eq!(state.location.href(), "/dashboard?tab=data");

    state.navigate("/data/DB-2023-001");
    assert_eq!(
        *state.route(),
        Route::Batch {
            batch_id: "DB-2023-001".to_string(),
            tab: BatchTab::Overview,
        }
    );
    assert!(state.batch_view.is_some());

    state.back();
    assert_eq!(state.dashboard.tab, DashboardTab::Data);
}

/// Submitting the batch form lands on the new batch's overview.
#[test]
fn e2e_create_batch_flow() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_with_store(&dir.path().join("store.json"), "/data/new");

    state.batch_draft.title = "Graphene Oxide Samples Q4".to_string();
    state.submit_batch();

    assert_eq!(state.location.href(), "/data/DB-NEW-001/overview");
    assert_eq!(
        state.batch_view.as_ref().and_then(|v| v.batch_id()),
        Some("DB-NEW-001")
    );
    // Leaving the form discards the draft.
    assert!(state.batch_draft.title.is_empty());
}

/// Starting a fiber upload opens the fiber workstation and sets the mode.
#[test]
fn e2e_upload_fiber_task() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_with_store(&dir.path().join("store.json"), "/upload");

    state.upload.set_task_type(Mode::Fiber);
    state.start_upload();

    assert_eq!(
        *state.route(),
        Route::Fibers {
            task_id: "T-NEW-001".to_string()
        }
    );
    assert_eq!(state.mode(), Some(Mode::Fiber));
}

/// Unknown paths still render (as NotFound) and can be left with back().
#[test]
fn e2e_unknown_route_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_with_store(&dir.path().join("store.json"), "/dashboard");

    state.navigate("/no/such/page/here");
    assert!(matches!(state.route(), Route::NotFound(_)));
    state.back();
    assert_eq!(*state.route(), Route::Dashboard);
}
