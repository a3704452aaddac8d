//! The YAML policy file: banned-word lists and reply templates.
//!
//! Loaded once at startup and handed to the classifier and reply
//! generator. Validation is strict because a malformed entry can ban
//! every post (an empty multi-word phrase matches any text).

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Banned-content word lists.
///
/// `single_words` are matched exactly against whitespace-split tokens of
/// the raw post text. `multi_words` are matched as unanchored substrings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BannedWords {
    #[serde(default)]
    pub single_words: Vec<String>,
    #[serde(default)]
    pub multi_words: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyFile {
    #[serde(default)]
    pub banned_words: BannedWords,
    /// Reply templates keyed `parse-success`, `parse-success-normal`,
    /// `parse-success-quoted`, `parse-failed`, `parse-failed-<error_code>`.
    /// An empty template means "do not reply".
    #[serde(default)]
    pub replies: HashMap<String, String>,
}

/// Load and validate the policy configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_policy(path: &Path) -> Result<PolicyFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PolicyFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let policy: PolicyFile = serde_yaml::from_str(&content)?;

    validate_policy(&policy)?;

    Ok(policy)
}

fn validate_policy(policy: &PolicyFile) -> Result<(), ConfigError> {
    for word in &policy.banned_words.single_words {
        if word.trim().is_empty() {
            return Err(ConfigError::Validation(
                "banned single word must be non-empty".to_string(),
            ));
        }
        if word.split_whitespace().count() > 1 {
            return Err(ConfigError::Validation(format!(
                "banned single word \"{word}\" contains whitespace; move it to multi_words"
            )));
        }
    }

    for phrase in &policy.banned_words.multi_words {
        if phrase.trim().is_empty() {
            return Err(ConfigError::Validation(
                "banned multi-word phrase must be non-empty".to_string(),
            ));
        }
    }

    Ok(())
}
