use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which outcome exporter the process runs with. Selected once at startup;
/// there is no runtime re-selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExporterKind {
    /// Per-post JSON files under the export directory.
    Json,
    /// Discard outcomes (dry runs, tests).
    Null,
}

impl std::fmt::Display for ExporterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExporterKind::Json => write!(f, "json"),
            ExporterKind::Null => write!(f, "null"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// YAML file with banned words and reply templates.
    pub policy_path: PathBuf,
    /// JSON file holding the ignored-author list.
    pub ignored_authors_path: PathBuf,
    /// Root directory for outcome exports.
    pub export_dir: PathBuf,
    pub exporter: ExporterKind,
    /// Maximum characters a generated reply may use before falling back
    /// to the bare status template.
    pub reply_char_budget: usize,
}
