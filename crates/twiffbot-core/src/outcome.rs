//! The outcome record produced for every classified post.
//!
//! Downstream consumers key off three things: the response status (reply
//! template family), the first error code (failure template), and the
//! non-null post ids (like/retweet dispatch). The `data` block is exported
//! to JSON even on failure — extraction is best-effort.

use serde::{Deserialize, Serialize};

/// Whether a usable action report was extracted from the post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Success,
    Failed,
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseStatus::Success => write!(f, "success"),
            ResponseStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Whether the report rides on the post itself or on a quoted post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    Normal,
    Quoted,
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostType::Normal => write!(f, "normal"),
            PostType::Quoted => write!(f, "quoted"),
        }
    }
}

/// Closed taxonomy of classification errors, ordered by the layer that
/// raises them: extraction short-circuits, field validation accumulates,
/// policy filters apply last. Serialized to the legacy snake_case strings
/// so downstream matching keeps working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    HashtagTwiffNotFound,
    TwifftextTooShort,
    NoOrgFound,
    NoCountryFound,
    NoStateFound,
    NoCityFound,
    NoPeopleFound,
    BannedWord,
    IgnoredUser,
}

impl ErrorCode {
    /// The wire string for this code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::HashtagTwiffNotFound => "hashtag_twiff_not_found",
            ErrorCode::TwifftextTooShort => "twifftext_too_short",
            ErrorCode::NoOrgFound => "no_org_found",
            ErrorCode::NoCountryFound => "no_country_found",
            ErrorCode::NoStateFound => "no_state_found",
            ErrorCode::NoCityFound => "no_city_found",
            ErrorCode::NoPeopleFound => "no_people_found",
            ErrorCode::BannedWord => "banned_word",
            ErrorCode::IgnoredUser => "ignored_user",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The extracted report fields in their exported form.
///
/// Populated best-effort even when validation fails, so operators can see
/// what the parser made of the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    /// Participant count; `0` means "not found".
    pub num_people: u32,
    /// Report date formatted `%d-%m-%Y`. Empty until extraction ran.
    pub created_at: String,
    pub organization: String,
    /// Composite `country [state] city` string.
    pub location: String,
    /// Proof URL: explicit from the text, else the quoted post's URL,
    /// else the reporting post's own URL.
    pub url: String,
}

/// Result of classifying one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub response: ResponseStatus,
    pub post_type: PostType,
    /// Id of the post to act on (like/retweet). `None` when a policy
    /// filter redacted it.
    pub primary_post_id: Option<String>,
    /// Id of the quoted post, when present and not redacted.
    pub quoted_post_id: Option<String>,
    pub data: ReportData,
    /// Accumulated error codes in the order they were raised. The first
    /// entry drives failure-reply selection.
    pub errors: Vec<ErrorCode>,
}

impl Outcome {
    /// An outcome that failed before any fields could be extracted.
    #[must_use]
    pub fn failure(code: ErrorCode) -> Self {
        Outcome {
            response: ResponseStatus::Failed,
            post_type: PostType::Normal,
            primary_post_id: None,
            quoted_post_id: None,
            data: ReportData::default(),
            errors: vec![code],
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.response == ResponseStatus::Success
    }

    /// The first-raised error code, which downstream response selection
    /// treats as primary.
    #[must_use]
    pub fn primary_error(&self) -> Option<ErrorCode> {
        self.errors.first().copied()
    }
}
