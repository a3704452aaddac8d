//! Shared domain types and configuration for twiffbot.
//!
//! Holds the raw post/user input shapes (as dumped by the upstream search
//! fetcher), the outcome record consumed by reply/engagement/export
//! collaborators, the env-driven application config, and the YAML policy
//! file (banned words + reply templates).

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod outcome;
pub mod policy;
pub mod post;
pub mod replies;

pub use app_config::{AppConfig, Environment, ExporterKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use outcome::{ErrorCode, Outcome, PostType, ReportData, ResponseStatus};
pub use policy::{load_policy, BannedWords, PolicyFile};
pub use post::{
    handle_for_id, id_for_handle, Entities, RawPost, RawUser, ReferenceKind, ReferencedPost,
    UrlEntity, UserMap,
};
pub use replies::ReplyTemplates;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read policy file {path}: {source}")]
    PolicyFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse policy file: {0}")]
    PolicyFileParse(#[from] serde_yaml::Error),

    #[error("invalid policy: {0}")]
    Validation(String),
}
