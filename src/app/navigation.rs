// UniAIMS - app/navigation.rs
//
// Sidebar context: collapse state and the sticky particle/fiber mode,
// plus the menu shown for the current route.
//
// The mode survives navigation to neutral pages (reports, analysis) and
// application restarts through a small key-value port.

use crate::core::model::Mode;
use crate::core::route::Route;
use crate::util::constants::MODE_STORE_KEY;
use std::collections::HashMap;

// =============================================================================
// Key-value port
// =============================================================================

/// Durable string key-value storage for UI preferences.
pub trait ModeStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Non-durable store, used in tests and when no data directory is available.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModeStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

// =============================================================================
// Navigation context
// =============================================================================

/// Application-wide sidebar state. Constructed once at startup and passed
/// to the views that need it.
pub struct NavContext {
    collapsed: bool,
    mode: Option<Mode>,
    store: Box<dyn ModeStore>,
}

impl std::fmt::Debug for NavContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavContext")
            .field("collapsed", &self.collapsed)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl NavContext {
    /// Create the context for the first screen shown.
    ///
    /// The initial mode comes from `initial_path` when it names a workstation,
    /// otherwise from the store.
    pub fn new(store: Box<dyn ModeStore>, initial_path: &str) -> Self {
        let mut ctx = Self {
            collapsed: false,
            mode: None,
            store,
        };
        ctx.on_path_change(initial_path);
        ctx
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Recompute the mode after the route changed.
    ///
    /// A particles/fibers path sets and persists the mode; any other path
    /// falls back to the stored value. Unrecognised stored values are ignored.
    pub fn on_path_change(&mut self, path: &str) {
        let path = path.split('?').next().unwrap_or(path);
        match Route::parse(path).resolve().mode_hint() {
            Some(mode) => {
                if self.mode != Some(mode) {
                    tracing::debug!(route = %path, mode = mode.as_str(), "Mode changed");
                }
                self.mode = Some(mode);
                self.store.set(MODE_STORE_KEY, mode.as_str());
            }
            None => {
                self.mode = self
                    .store
                    .get(MODE_STORE_KEY)
                    .and_then(|stored| Mode::parse(&stored));
            }
        }
    }
}

// =============================================================================
// Sidebar menu
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuIcon {
    Settings,
    Activity,
    Database,
    PenTool,
    Layers,
    BarChart,
    FileText,
}

impl MenuIcon {
    /// Glyph drawn next to the label.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Settings => "\u{2699}",
            Self::Activity => "\u{223f}",
            Self::Database => "\u{26c1}",
            Self::PenTool => "\u{270e}",
            Self::Layers => "\u{25a4}",
            Self::BarChart => "\u{2590}",
            Self::FileText => "\u{1f5b9}",
        }
    }
}

/// What clicking a sidebar item does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuTarget {
    /// Navigate to a path.
    Path(String),
    /// Stay on the route and set a query parameter.
    Query { key: &'static str, value: &'static str },
    /// Open the Save to Dataset dialog.
    OpenExportModal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub icon: MenuIcon,
    pub target: MenuTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection {
    pub title: &'static str,
    pub items: Vec<MenuItem>,
}

fn path_item(label: &'static str, icon: MenuIcon, path: String) -> MenuItem {
    MenuItem {
        label,
        icon,
        target: MenuTarget::Path(path),
    }
}

fn query_item(label: &'static str, icon: MenuIcon, value: &'static str) -> MenuItem {
    MenuItem {
        label,
        icon,
        target: MenuTarget::Query { key: "tab", value },
    }
}

/// Sections shown in the sidebar for `route`.
///
/// Fine-tuning and data batch routes have their own menus; task routes get
/// the workstation menu for `mode` (particle when no mode has been chosen).
/// Routes without a sidebar yield an empty list.
pub fn sidebar_menu(route: &Route, mode: Option<Mode>) -> Vec<MenuSection> {
    use MenuIcon::*;

    if let Route::Finetune = route {
        return vec![
            MenuSection {
                title: "Training",
                items: vec![
                    query_item("Configuration", Settings, "settings"),
                    query_item("Training Dashboard", Activity, "training"),
                ],
            },
            MenuSection {
                title: "Data",
                items: vec![
                    query_item("Data Management", Database, "data"),
                    query_item("Annotation Studio", PenTool, "annotation"),
                ],
            },
        ];
    }

    if let Route::Batch { batch_id, .. } | Route::BatchIndex { batch_id } = route {
        return vec![MenuSection {
            title: "Data Batch",
            items: vec![
                path_item("Overview", Settings, format!("/data/{batch_id}/overview")),
                path_item("Data Browser", Database, format!("/data/{batch_id}/browser")),
                path_item("Linked Tasks", Activity, format!("/data/{batch_id}/tasks")),
            ],
        }];
    }

    let Some(task) = route.task_id() else {
        return Vec::new();
    };

    match mode.unwrap_or(Mode::Particle) {
        Mode::Particle => vec![
            MenuSection {
                title: "Workstation",
                items: vec![path_item(
                    "Particle Recognition",
                    Layers,
                    format!("/{task}/particles"),
                )],
            },
            MenuSection {
                title: "Analysis",
                items: vec![
                    path_item("Attribute", BarChart, format!("/{task}/analysis/attribute")),
                    path_item(
                        "Correlation Analysis",
                        Activity,
                        format!("/{task}/analysis/correlation"),
                    ),
                    path_item(
                        "Image Comparison",
                        BarChart,
                        format!("/{task}/analysis/comparison"),
                    ),
                    path_item(
                        "Task Comparison",
                        BarChart,
                        format!("/{task}/analysis/task_comparison"),
                    ),
                    path_item("Reports", FileText, format!("/{task}/reports")),
                ],
            },
        ],
        Mode::Fiber => vec![
            MenuSection {
                title: "Workstation",
                items: vec![path_item("Fiber Analysis", Activity, format!("/{task}/fibers"))],
            },
            MenuSection {
                title: "Analysis",
                items: vec![
                    path_item("Analysis Hub", BarChart, format!("/{task}/analysis")),
                    path_item("Reports", FileText, format!("/{task}/reports")),
                ],
            },
            MenuSection {
                title: "System",
                items: vec![MenuItem {
                    label: "Save to Dataset",
                    icon: Database,
                    target: MenuTarget::OpenExportModal,
                }],
            },
        ],
    }
}

/// Whether a menu item is highlighted for the current route and query.
pub fn is_item_active(item: &MenuItem, route: &Route, tab: Option<&str>) -> bool {
    match &item.target {
        MenuTarget::Path(path) => {
            let current = route.path();
            match Route::parse(path) {
                // Index targets stay active across their child views.
                Route::AnalysisIndex { .. } => current.starts_with(path.as_str()),
                _ => current == *path,
            }
        }
        MenuTarget::Query { value, .. } => match tab {
            Some(t) => t == *value,
            None => *value == "settings",
        },
        MenuTarget::OpenExportModal => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_at(path: &str) -> NavContext {
        NavContext::new(Box::new(MemoryStore::new()), path)
    }

    #[test]
    fn test_collapse_toggle() {
        let mut ctx = ctx_at("/dashboard");
        assert!(!ctx.collapsed());
        ctx.toggle_collapsed();
        assert!(ctx.collapsed());
        ctx.set_collapsed(false);
        assert!(!ctx.collapsed());
    }

    #[test]
    fn test_mode_sticks_on_neutral_path() {
        let mut ctx = ctx_at("/dashboard");
        assert_eq!(ctx.mode(), None);
        ctx.on_path_change("/T-1028/fibers");
        assert_eq!(ctx.mode(), Some(Mode::Fiber));
        ctx.on_path_change("/T-1028/reports");
        assert_eq!(ctx.mode(), Some(Mode::Fiber));
        ctx.on_path_change("/T-1029/particles?view=grid");
        assert_eq!(ctx.mode(), Some(Mode::Particle));
        ctx.on_path_change("/docs");
        assert_eq!(ctx.mode(), Some(Mode::Particle));
    }

    #[test]
    fn test_initial_mode_from_store() {
        let mut store = MemoryStore::new();
        store.set(MODE_STORE_KEY, "fiber");
        let ctx = NavContext::new(Box::new(store), "/T-1/reports");
        assert_eq!(ctx.mode(), Some(Mode::Fiber));
    }

    #[test]
    fn test_garbage_stored_mode_ignored() {
        let mut store = MemoryStore::new();
        store.set(MODE_STORE_KEY, "Fiber!");
        let ctx = NavContext::new(Box::new(store), "/dashboard");
        assert_eq!(ctx.mode(), None);
    }

    #[test]
    fn test_path_overrides_store() {
        let mut store = MemoryStore::new();
        store.set(MODE_STORE_KEY, "fiber");
        let ctx = NavContext::new(Box::new(store), "/T-1/particles");
        assert_eq!(ctx.mode(), Some(Mode::Particle));
    }

    #[test]
    fn test_menu_expands_task_placeholder() {
        let route = Route::parse("/T-1029/reports");
        let menu = sidebar_menu(&route, Some(Mode::Particle));
        assert_eq!(menu.len(), 2);
        assert_eq!(
            menu[0].items[0].target,
            MenuTarget::Path("/T-1029/particles".to_string())
        );
        assert_eq!(menu[1].items.len(), 5);
    }

    #[test]
    fn test_fiber_menu_has_export_action() {
        let route = Route::parse("/T-1028/fibers");
        let menu = sidebar_menu(&route, Some(Mode::Fiber));
        assert_eq!(menu.last().unwrap().items[0].target, MenuTarget::OpenExportModal);
    }

    #[test]
    fn test_context_specific_menus() {
        let batch = sidebar_menu(&Route::parse("/data/DB-1/browser"), Some(Mode::Fiber));
        assert_eq!(batch[0].title, "Data Batch");
        assert_eq!(
            batch[0].items[1].target,
            MenuTarget::Path("/data/DB-1/browser".to_string())
        );

        let finetune = sidebar_menu(&Route::Finetune, None);
        assert_eq!(finetune[0].items[0].label, "Configuration");

        assert!(sidebar_menu(&Route::Dashboard, Some(Mode::Particle)).is_empty());
    }

    #[test]
    fn test_active_items() {
        let route = Route::parse("/T-1/analysis/correlation");
        let hub = path_item("Hub", MenuIcon::BarChart, "/T-1/analysis".to_string());
        assert!(is_item_active(&hub, &route, None));
        let reports = path_item("Reports", MenuIcon::FileText, "/T-1/reports".to_string());
        assert!(!is_item_active(&reports, &route, None));

        let config = query_item("Configuration", MenuIcon::Settings, "settings");
        assert!(is_item_active(&config, &Route::Finetune, None));
        assert!(!is_item_active(&config, &Route::Finetune, Some("data")));
    }
}
