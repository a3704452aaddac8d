//! Raw post and user records as fetched from the upstream search API.
//!
//! These are decoded from the fetcher's JSON dumps (`tweets/*.json`,
//! `users/*.json`). The core assumes well-formed shapes; malformed upstream
//! JSON is the fetcher's problem, not ours.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Timestamp format the search API uses for `created_at`.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Posts' associated users, keyed by user id.
pub type UserMap = HashMap<String, RawUser>;

/// A post as returned by the search API, reduced to the fields the
/// classifier needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPost {
    /// Numeric post id, kept as a string to avoid precision loss.
    pub id: String,
    pub text: String,
    /// ISO 8601 creation timestamp, e.g. `"2022-04-15T09:30:00.000Z"`.
    pub created_at: String,
    pub author_id: String,
    #[serde(default)]
    pub entities: Entities,
    /// Present only when the post references another post.
    #[serde(default)]
    pub referenced_tweets: Vec<ReferencedPost>,
}

impl RawPost {
    /// The calendar date the post was created on.
    ///
    /// # Errors
    ///
    /// Returns a parse error if `created_at` does not match
    /// [`CREATED_AT_FORMAT`].
    pub fn created_date(&self) -> Result<NaiveDate, chrono::ParseError> {
        chrono::NaiveDateTime::parse_from_str(&self.created_at, CREATED_AT_FORMAT)
            .map(|dt| dt.date())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub urls: Vec<UrlEntity>,
}

/// A URL entity attached to a post. The same link appears in three forms:
/// the `t.co` short form embedded in the text, the expanded target, and
/// the display form shown to readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlEntity {
    /// Shortened form, e.g. `"https://t.co/AbCd123456"`.
    pub url: String,
    /// Full target, e.g. `"https://twitter.com/user/status/123"`.
    pub expanded_url: String,
    /// Reader-facing form, e.g. `"pic.twitter.com/AbCd123456"`.
    pub display_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencedPost {
    #[serde(rename = "type")]
    pub kind: ReferenceKind,
    /// Id of the referenced post.
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Quoted,
    RepliedTo,
    Retweeted,
}

/// A user record from the search API's `includes.users` expansion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawUser {
    pub id: String,
    /// The `@`-handle, without the `@`.
    pub username: String,
    #[serde(default)]
    pub name: String,
}

/// Looks up a user's handle by id.
pub fn handle_for_id<'a>(users: &'a UserMap, id: &str) -> Option<&'a str> {
    users
        .values()
        .find(|u| u.id == id)
        .map(|u| u.username.as_str())
}

/// Reverse lookup: finds a user's id by handle.
pub fn id_for_handle<'a>(users: &'a UserMap, handle: &str) -> Option<&'a str> {
    users
        .values()
        .find(|u| u.username == handle)
        .map(|u| u.id.as_str())
}
