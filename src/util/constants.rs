// UniAIMS - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "UniAIMS";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "UniAIMS";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Interactive canvas
// =============================================================================

/// Smallest allowed canvas zoom factor.
pub const MIN_CANVAS_SCALE: f32 = 0.5;

/// Largest allowed canvas zoom factor.
pub const MAX_CANVAS_SCALE: f32 = 5.0;

/// Scale change per unit of vertical wheel delta while the zoom modifier is held.
pub const WHEEL_ZOOM_STEP: f32 = 0.01;

/// Width of the placeholder SEM image block in content pixels.
pub const CANVAS_CONTENT_WIDTH: f32 = 1024.0;

/// Height of the placeholder SEM image block in content pixels.
pub const CANVAS_CONTENT_HEIGHT: f32 = 768.0;

/// Pitch of the decorative dot grid drawn over the placeholder image.
pub const CANVAS_GRID_PITCH: f32 = 20.0;

/// Number of mock particle overlays drawn on the particle canvas.
pub const MOCK_PARTICLE_COUNT: usize = 20;

/// Number of mock fiber overlays drawn on the fiber canvas.
pub const MOCK_FIBER_COUNT: usize = 12;

/// Seed for the mock overlay generator. Fixed so overlays are static per mount.
pub const MOCK_OVERLAY_SEED: u64 = 0x5e3_1a6e;

// =============================================================================
// Lists and pagination
// =============================================================================

/// Fixed reference date used by the coarse "today" time bucket.
pub const REFERENCE_DATE: &str = "2023-10-24";

/// Date value the mock data uses for jobs that are still running.
pub const RUNNING_DATE: &str = "Running";

/// Default rows per page for paginated lists.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the per-page selector.
pub const PAGE_SIZE_CHOICES: &[usize] = &[5, 10, 25, 50];

/// Minimum configurable page size.
pub const MIN_PAGE_SIZE: usize = 1;

/// Maximum configurable page size.
pub const MAX_PAGE_SIZE: usize = 200;

// =============================================================================
// Navigation
// =============================================================================

/// Key under which the sticky analysis mode is stored.
pub const MODE_STORE_KEY: &str = "uniaims_mode";

/// Route opened when nothing else is requested.
pub const DEFAULT_START_ROUTE: &str = "/dashboard";

/// Maximum number of entries kept in the back history.
pub const MAX_HISTORY: usize = 64;

/// Batch id the mock "Create Batch" flow navigates to.
pub const NEW_BATCH_ID: &str = "DB-NEW-001";

/// Task id the mock "Start Analysis" flow opens in the workstation.
pub const NEW_TASK_ID: &str = "T-NEW-001";

/// Default target path in the "Save to Dataset" modal (shown under `/mnt/`).
pub const DEFAULT_EXPORT_PATH: &str = "/data/datasets/new_batch_01";

// =============================================================================
// Analysis
// =============================================================================

/// Number of density steps in a mock violin profile.
pub const VIOLIN_STEPS: usize = 20;

/// Number of segments used to draw a regression line.
pub const REGRESSION_STEPS: usize = 20;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Duration of the dashboard/workstation slide transition in seconds.
pub const ROUTE_TRANSITION_SECS: f32 = 0.5;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Key-value store file name (stored in the platform data directory).
pub const STORE_FILE_NAME: &str = "store.json";
