//! Policy seams applied on top of extraction.
//!
//! Content and author filtering are pluggable capabilities selected at
//! startup, not baked into the classifier: the classifier takes one
//! implementation of each trait and never knows where the word list or
//! the ignore list lives.

use twiffbot_core::policy::BannedWords;
use twiffbot_core::post::UserMap;

/// Decides whether raw post text contains banned content.
pub trait ContentPolicy {
    fn is_banned(&self, raw_text: &str) -> bool;
}

/// Decides whether an author is on the ignore list. Implementations may
/// mutate their backing store as a side effect (handle-to-id migration).
pub trait AuthorPolicy {
    fn is_ignored(&self, author_id: &str, users: &UserMap) -> bool;
}

/// Word-list content policy: single words match exactly against
/// whitespace-split tokens of the raw text; multi-word phrases match as
/// unanchored substrings.
///
/// The phrase match is a plain substring check against the raw text, so
/// it can false-positive inside larger words. Known latent looseness,
/// kept for parity with the word lists operators already run.
pub struct BannedWordPolicy {
    words: BannedWords,
}

impl BannedWordPolicy {
    #[must_use]
    pub fn new(words: BannedWords) -> Self {
        Self { words }
    }
}

impl ContentPolicy for BannedWordPolicy {
    fn is_banned(&self, raw_text: &str) -> bool {
        if self
            .words
            .single_words
            .iter()
            .any(|word| raw_text.split_whitespace().any(|token| token == word))
        {
            return true;
        }
        self.words
            .multi_words
            .iter()
            .any(|phrase| raw_text.contains(phrase.as_str()))
    }
}

/// Author policy that ignores nobody. Used by the text-debugging path,
/// where no ignore store is loaded.
pub struct PermitAllAuthors;

impl AuthorPolicy for PermitAllAuthors {
    fn is_ignored(&self, _author_id: &str, _users: &UserMap) -> bool {
        false
    }
}
