//! Outcome exporters: persist the extracted `data` block per post.

use std::path::{Path, PathBuf};

use tracing::info;

use twiffbot_core::app_config::ExporterKind;
use twiffbot_core::outcome::Outcome;

use crate::StoreError;

/// Persists one classified outcome. Implementations are selected at
/// startup from configuration.
pub trait OutcomeExporter {
    /// Exports the outcome's data block under the post's id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the destination cannot be written.
    fn export(&self, post_id: &str, outcome: &Outcome) -> Result<(), StoreError>;
}

/// Writes `<dir>/<post_id>.json` holding the extracted data block.
pub struct JsonExporter {
    dir: PathBuf,
}

impl JsonExporter {
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }
}

impl OutcomeExporter for JsonExporter {
    fn export(&self, post_id: &str, outcome: &Outcome) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.display().to_string(),
            source,
        })?;
        let path = self.dir.join(format!("{post_id}.json"));
        let content =
            serde_json::to_string_pretty(&outcome.data).map_err(|source| StoreError::Json {
                path: path.display().to_string(),
                source,
            })?;
        std::fs::write(&path, content).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!(post_id, path = %path.display(), "exported outcome data");
        Ok(())
    }
}

/// Discards outcomes. Used for dry runs and tests.
pub struct NullExporter;

impl OutcomeExporter for NullExporter {
    fn export(&self, _post_id: &str, _outcome: &Outcome) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Builds the configured exporter.
#[must_use]
pub fn exporter_for(kind: ExporterKind, dir: &Path) -> Box<dyn OutcomeExporter> {
    match kind {
        ExporterKind::Json => Box::new(JsonExporter::new(dir)),
        ExporterKind::Null => Box::new(NullExporter),
    }
}
