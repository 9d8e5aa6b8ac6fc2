// UniAIMS - core/route.rs
//
// In-app route table. Maps path strings such as `/T-1029/analysis/attribute`
// to typed routes, renders them back, and answers the questions the shell
// asks of a route: which animation group it belongs to, which analysis mode
// it implies, and where index routes redirect.
//
// Query parameters are not versioned; views read `view`, `tab`, `analysis`
// and `dataset` opportunistically through `Location::query`.

use crate::core::model::Mode;
use crate::util::error::RouteError;
use std::collections::BTreeMap;
use std::fmt;

/// Sub-page of a data batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchTab {
    Overview,
    Browser,
    Tasks,
}

impl BatchTab {
    pub fn all() -> &'static [BatchTab] {
        &[Self::Overview, Self::Browser, Self::Tasks]
    }

    pub fn segment(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Browser => "browser",
            Self::Tasks => "tasks",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Browser => "Data Browser",
            Self::Tasks => "Linked Tasks",
        }
    }

    fn from_segment(s: &str) -> Option<Self> {
        match s {
            "overview" => Some(Self::Overview),
            "browser" => Some(Self::Browser),
            "tasks" => Some(Self::Tasks),
            _ => None,
        }
    }
}

/// Chart page under `/:taskId/analysis/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisView {
    Attribute,
    Correlation,
    Comparison,
    TaskComparison,
}

impl AnalysisView {
    pub fn all() -> &'static [AnalysisView] {
        &[
            Self::Attribute,
            Self::Correlation,
            Self::Comparison,
            Self::TaskComparison,
        ]
    }

    pub fn segment(&self) -> &'static str {
        match self {
            Self::Attribute => "attribute",
            Self::Correlation => "correlation",
            Self::Comparison => "comparison",
            Self::TaskComparison => "task_comparison",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Attribute => "Attribute",
            Self::Correlation => "Correlation Analysis",
            Self::Comparison => "Image Comparison",
            Self::TaskComparison => "Task Comparison",
        }
    }

    fn from_segment(s: &str) -> Option<Self> {
        match s {
            "attribute" => Some(Self::Attribute),
            "correlation" => Some(Self::Correlation),
            "comparison" => Some(Self::Comparison),
            "task_comparison" => Some(Self::TaskComparison),
            _ => None,
        }
    }
}

/// Animation grouping: switching within a group does not re-animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGroup {
    Dashboard,
    Workstation,
}

/// Every screen the application can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Dashboard,
    Upload,
    NewBatch,
    Docs,
    Finetune,
    BatchIndex { batch_id: String },
    Batch { batch_id: String, tab: BatchTab },
    Particles { task_id: String },
    Fibers { task_id: String },
    AnalysisIndex { task_id: String },
    Analysis { task_id: String, view: AnalysisView },
    Reports { task_id: String },
    NotFound(String),
}

impl Route {
    /// Resolve a path (without query string) into a route.
    ///
    /// Unknown paths become `Route::NotFound` so the shell can still render
    /// something; use `Route::try_parse` when the caller needs an error.
    pub fn parse(path: &str) -> Route {
        Self::try_parse(path).unwrap_or_else(|_| Route::NotFound(path.to_string()))
    }

    pub fn try_parse(path: &str) -> Result<Route, RouteError> {
        if !path.starts_with('/') {
            return Err(RouteError::NotAbsolute {
                path: path.to_string(),
            });
        }
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let unknown = || RouteError::Unknown {
            path: path.to_string(),
        };

        let route = match segments.as_slice() {
            [] => Route::Root,
            ["dashboard"] => Route::Dashboard,
            ["upload"] => Route::Upload,
            ["docs"] => Route::Docs,
            ["finetune"] => Route::Finetune,
            ["data", "new"] => Route::NewBatch,
            ["data", id] => Route::BatchIndex {
                batch_id: id.to_string(),
            },
            ["data", id, tab] => Route::Batch {
                batch_id: id.to_string(),
                tab: BatchTab::from_segment(tab).ok_or_else(unknown)?,
            },
            [task, "particles"] => Route::Particles {
                task_id: task.to_string(),
            },
            [task, "fibers"] => Route::Fibers {
                task_id: task.to_string(),
            },
            [task, "analysis"] => Route::AnalysisIndex {
                task_id: task.to_string(),
            },
            [task, "analysis", view] => Route::Analysis {
                task_id: task.to_string(),
                view: AnalysisView::from_segment(view).ok_or_else(unknown)?,
            },
            [task, "reports"] => Route::Reports {
                task_id: task.to_string(),
            },
            _ => return Err(unknown()),
        };
        Ok(route)
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Upload => "/upload".to_string(),
            Route::NewBatch => "/data/new".to_string(),
            Route::Docs => "/docs".to_string(),
            Route::Finetune => "/finetune".to_string(),
            Route::BatchIndex { batch_id } => format!("/data/{batch_id}"),
            Route::Batch { batch_id, tab } => format!("/data/{batch_id}/{}", tab.segment()),
            Route::Particles { task_id } => format!("/{task_id}/particles"),
            Route::Fibers { task_id } => format!("/{task_id}/fibers"),
            Route::AnalysisIndex { task_id } => format!("/{task_id}/analysis"),
            Route::Analysis { task_id, view } => {
                format!("/{task_id}/analysis/{}", view.segment())
            }
            Route::Reports { task_id } => format!("/{task_id}/reports"),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Index routes redirect to a concrete child; everything else is final.
    pub fn redirect(&self) -> Option<Route> {
        match self {
            Route::Root => Some(Route::Dashboard),
            Route::BatchIndex { batch_id } => Some(Route::Batch {
                batch_id: batch_id.clone(),
                tab: BatchTab::Overview,
            }),
            Route::AnalysisIndex { task_id } => Some(Route::Analysis {
                task_id: task_id.clone(),
                view: AnalysisView::Attribute,
            }),
            _ => None,
        }
    }

    /// Follow redirects until a concrete route is reached.
    pub fn resolve(self) -> Route {
        let mut route = self;
        while let Some(next) = route.redirect() {
            route = next;
        }
        route
    }

    pub fn group(&self) -> RouteGroup {
        match self {
            Route::Root | Route::Dashboard | Route::Upload | Route::NewBatch => {
                RouteGroup::Dashboard
            }
            _ => RouteGroup::Workstation,
        }
    }

    /// Analysis mode implied by the route, if it is a recognition workstation.
    pub fn mode_hint(&self) -> Option<Mode> {
        match self {
            Route::Particles { .. } => Some(Mode::Particle),
            Route::Fibers { .. } => Some(Mode::Fiber),
            _ => None,
        }
    }

    /// Task id carried by task-scoped routes.
    pub fn task_id(&self) -> Option<&str> {
        match self {
            Route::Particles { task_id }
            | Route::Fibers { task_id }
            | Route::AnalysisIndex { task_id }
            | Route::Analysis { task_id, .. }
            | Route::Reports { task_id } => Some(task_id),
            _ => None,
        }
    }

    /// Whether the route renders the interactive canvas.
    pub fn has_canvas(&self) -> bool {
        matches!(self, Route::Particles { .. } | Route::Fibers { .. })
    }

    /// Whether the route is rendered inside the workstation layout with a sidebar.
    pub fn has_sidebar(&self) -> bool {
        !matches!(
            self,
            Route::Root
                | Route::Dashboard
                | Route::Upload
                | Route::NewBatch
                | Route::Docs
                | Route::NotFound(_)
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

// =============================================================================
// Location (route + query)
// =============================================================================

/// A resolved route plus its query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub route: Route,
    pub query: BTreeMap<String, String>,
}

impl Location {
    /// Parse `path?key=value&...`, following index redirects.
    pub fn parse(target: &str) -> Location {
        let (path, query_str) = match target.split_once('?') {
            Some((p, q)) => (p, q),
            None => (target, ""),
        };
        let query = query_str
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();
        Location {
            route: Route::parse(path).resolve(),
            query,
        }
    }

    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    pub fn set_query(&mut self, key: &str, value: &str) {
        self.query.insert(key.to_string(), value.to_string());
    }

    /// Full target string, `path` plus `?query` when non-empty.
    pub fn href(&self) -> String {
        let mut out = self.route.path();
        if !self.query.is_empty() {
            let pairs: Vec<String> = self.query.iter().map(|(k, v)| format!("{k}={v}")).collect();
            out.push('?');
            out.push_str(&pairs.join("&"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_documented_routes() {
        let cases = [
            "/dashboard",
            "/upload",
            "/data/new",
            "/data/DB-2023-001/overview",
            "/data/DB-2023-001/browser",
            "/data/DB-2023-001/tasks",
            "/T-1029/particles",
            "/T-1029/fibers",
            "/T-1029/analysis/attribute",
            "/T-1029/analysis/correlation",
            "/T-1029/analysis/comparison",
            "/T-1029/analysis/task_comparison",
            "/finetune",
            "/T-1029/reports",
            "/docs",
        ];
        for path in cases {
            let route = Route::try_parse(path).unwrap();
            assert_eq!(route.path(), path);
            assert!(!matches!(route, Route::NotFound(_)));
        }
    }

    #[test]
    fn test_redirects() {
        assert_eq!(Route::parse("/").resolve(), Route::Dashboard);
        assert_eq!(
            Route::parse("/data/DB-1").resolve().path(),
            "/data/DB-1/overview"
        );
        assert_eq!(
            Route::parse("/T-9/analysis").resolve().path(),
            "/T-9/analysis/attribute"
        );
    }

    #[test]
    fn test_unknown_routes() {
        assert!(matches!(
            Route::try_parse("/T-1/analysis/bogus"),
            Err(RouteError::Unknown { .. })
        ));
        assert!(matches!(
            Route::try_parse("dashboard"),
            Err(RouteError::NotAbsolute { .. })
        ));
        assert_eq!(
            Route::parse("/a/b/c/d"),
            Route::NotFound("/a/b/c/d".to_string())
        );
    }

    #[test]
    fn test_groups() {
        assert_eq!(Route::parse("/").group(), RouteGroup::Dashboard);
        assert_eq!(Route::parse("/upload").group(), RouteGroup::Dashboard);
        assert_eq!(Route::parse("/data/new").group(), RouteGroup::Dashboard);
        assert_eq!(Route::parse("/docs").group(), RouteGroup::Workstation);
        assert_eq!(Route::parse("/T-1/reports").group(), RouteGroup::Workstation);
        assert_eq!(
            Route::parse("/data/X/tasks").group(),
            RouteGroup::Workstation
        );
    }

    #[test]
    fn test_mode_hint() {
        assert_eq!(Route::parse("/T-1/particles").mode_hint(), Some(Mode::Particle));
        assert_eq!(Route::parse("/T-1/fibers").mode_hint(), Some(Mode::Fiber));
        assert_eq!(Route::parse("/T-1/reports").mode_hint(), None);
    }

    #[test]
    fn test_location_query() {
        let loc = Location::parse("/dashboard?view=grid&tab=training");
        assert_eq!(loc.route, Route::Dashboard);
        assert_eq!(loc.query("view"), Some("grid"));
        assert_eq!(loc.query("tab"), Some("training"));
        assert_eq!(loc.query("dataset"), None);
        assert_eq!(loc.href(), "/dashboard?tab=training&view=grid");
    }

    #[test]
    fn test_location_follows_redirect() {
        let loc = Location::parse("/?view=list");
        assert_eq!(loc.route, Route::Dashboard);
        assert_eq!(loc.query("view"), Some("list"));
    }
}
