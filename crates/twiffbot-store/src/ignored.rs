//! The ignored-author list: a JSON object file mapping author id (or,
//! for entries predating id tracking, handle) to handle.
//!
//! The list is process-wide mutable state: looking up an author who is
//! listed under their handle migrates the entry to be keyed by id and
//! rewrites the file. Lookups therefore serialize on an internal lock,
//! and the rewrite goes through a temp file plus rename so an
//! interrupted process cannot leave a half-written list behind.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{error, info};

use twiffbot_core::post::{handle_for_id, UserMap};
use twiffbot_parser::AuthorPolicy;

use crate::StoreError;

pub struct IgnoredAuthors {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl IgnoredAuthors {
    /// Loads the list from `path`. A missing file means an empty list;
    /// any other read or parse failure is an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the file exists but cannot be read or
    /// does not hold a JSON object of strings.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let entries = match std::fs::read_to_string(path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| StoreError::Json {
                    path: path.display().to_string(),
                    source,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        Ok(Self {
            path: path.to_path_buf(),
            entries: Mutex::new(entries),
        })
    }

    /// Number of listed authors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Rewrites the list file atomically (temp file, then rename).
    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Json {
            path: self.path.display().to_string(),
            source,
        })?;
        std::fs::write(&tmp, content).map_err(|source| StoreError::Io {
            path: tmp.display().to_string(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}

impl AuthorPolicy for IgnoredAuthors {
    /// An author is ignored when listed by id, or by handle — the
    /// latter migrates the entry to an id key and rewrites the file.
    /// A failed rewrite is logged but does not clear the verdict; the
    /// in-memory list already holds the migrated entry and the next
    /// successful rewrite catches up.
    fn is_ignored(&self, author_id: &str, users: &UserMap) -> bool {
        let mut entries = self.lock();
        if entries.contains_key(author_id) {
            return true;
        }

        let Some(handle) = handle_for_id(users, author_id) else {
            return false;
        };
        let Some(old_key) = entries
            .iter()
            .find(|(_, listed)| listed.as_str() == handle)
            .map(|(key, _)| key.clone())
        else {
            return false;
        };

        entries.remove(&old_key);
        entries.insert(author_id.to_owned(), handle.to_owned());
        info!(author_id, handle, "migrated ignored-author entry to id key");
        if let Err(e) = self.persist(&entries) {
            error!(error = %e, "failed to rewrite ignored-author list");
        }
        true
    }
}
