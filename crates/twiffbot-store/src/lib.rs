//! Persistence: the ignored-author store and outcome exporters.

pub mod export;
pub mod ignored;

pub use export::{exporter_for, JsonExporter, NullExporter, OutcomeExporter};
pub use ignored::IgnoredAuthors;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read or write {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
