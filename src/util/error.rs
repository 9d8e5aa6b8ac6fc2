// UniAIMS - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all UniAIMS operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum UniAimsError {
    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// The key-value store could not be read or written.
    Store(StoreError),

    /// Export operation failed.
    Export(ExportError),

    /// A route string could not be resolved.
    Route(RouteError),

    /// A report template could not be (de)serialised.
    Template(TemplateError),
}

impl fmt::Display for UniAimsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Store(e) => write!(f, "Store error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Route(e) => write!(f, "Route error: {e}"),
            Self::Template(e) => write!(f, "Template error: {e}"),
        }
    }
}

impl std::error::Error for UniAimsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Route(e) => Some(e),
            Self::Template(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for UniAimsError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Errors raised by the file-backed key-value store.
#[derive(Debug)]
pub enum StoreError {
    /// The store directory could not be created.
    CreateDir { path: PathBuf, source: io::Error },

    /// The store contents could not be serialised.
    Serialise { source: serde_json::Error },

    /// Writing or renaming the store file failed.
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir { path, source } => write!(
                f,
                "cannot create store directory '{}': {source}",
                path.display()
            ),
            Self::Serialise { source } => write!(f, "failed to serialise store: {source}"),
            Self::Write { path, source } => {
                write!(f, "failed to write store file '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Serialise { source } => Some(source),
            Self::Write { source, .. } => Some(source),
        }
    }
}

impl From<StoreError> for UniAimsError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for UniAimsError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Route errors
// ---------------------------------------------------------------------------

/// Errors raised when a route string is not usable.
#[derive(Debug, PartialEq, Eq)]
pub enum RouteError {
    /// The path did not start with `/`.
    NotAbsolute { path: String },

    /// The path matched no known route.
    Unknown { path: String },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAbsolute { path } => {
                write!(f, "route '{path}' must start with '/'")
            }
            Self::Unknown { path } => write!(f, "no view is registered for '{path}'"),
        }
    }
}

impl std::error::Error for RouteError {}

impl From<RouteError> for UniAimsError {
    fn from(e: RouteError) -> Self {
        Self::Route(e)
    }
}

// ---------------------------------------------------------------------------
// Template errors
// ---------------------------------------------------------------------------

/// Errors related to report template save/load.
#[derive(Debug)]
pub enum TemplateError {
    /// The template JSON could not be produced or parsed.
    Json { source: serde_json::Error },

    /// The template parsed but contained no modules.
    Empty,
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { source } => write!(f, "invalid report template: {source}"),
            Self::Empty => write!(f, "report template contains no modules"),
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source } => Some(source),
            Self::Empty => None,
        }
    }
}

impl From<TemplateError> for UniAimsError {
    fn from(e: TemplateError) -> Self {
        Self::Template(e)
    }
}

/// Convenience type alias for UniAIMS results.
pub type Result<T> = std::result::Result<T, UniAimsError>;
