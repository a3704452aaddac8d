//! Top-level post classification: linkage resolution, extraction, then
//! policy filtering.

use tracing::debug;

use twiffbot_core::outcome::{ErrorCode, Outcome, PostType, ResponseStatus};
use twiffbot_core::post::{handle_for_id, id_for_handle, RawPost, ReferenceKind, UserMap};

use crate::error::ClassifyError;
use crate::extract::extract_report;
use crate::policy::{AuthorPolicy, ContentPolicy};

const POST_URL_BASE: &str = "https://twitter.com";

/// Classifies raw posts into outcomes. Stateless per call; the only
/// mutable state lives behind the [`AuthorPolicy`] implementation.
pub struct PostClassifier<C, A> {
    content: C,
    authors: A,
}

impl<C: ContentPolicy, A: AuthorPolicy> PostClassifier<C, A> {
    pub fn new(content: C, authors: A) -> Self {
        Self { content, authors }
    }

    /// Classifies one post against its user map.
    ///
    /// Bad report text is expressed through the outcome's error codes;
    /// `Err` is reserved for posts that violate the input contract
    /// (author missing from the user map, malformed timestamp).
    pub fn classify_post(&self, post: &RawPost, users: &UserMap) -> Result<Outcome, ClassifyError> {
        let (post_type, quoted_url, quoted_author_id) = resolve_quoted(post, users);

        let author_handle =
            handle_for_id(users, &post.author_id).ok_or_else(|| ClassifyError::UnknownAuthor {
                post_id: post.id.clone(),
                author_id: post.author_id.clone(),
            })?;
        let reporting_url = format!("{POST_URL_BASE}/{author_handle}/status/{}", post.id);

        let post_date = post
            .created_date()
            .map_err(|_| ClassifyError::InvalidTimestamp {
                post_id: post.id.clone(),
                value: post.created_at.clone(),
            })?;

        let mut outcome = extract_report(
            &post.text,
            &post.entities.urls,
            post_date,
            &reporting_url,
            &quoted_url,
        );
        // No marker means the post merely matched the search query. Hand
        // the failure back untouched: attaching ids here would let the
        // like/retweet dispatcher act on an arbitrary post.
        if outcome.primary_error() == Some(ErrorCode::HashtagTwiffNotFound) {
            debug!(post_id = %post.id, "no marker, skipping linkage and policy");
            return Ok(outcome);
        }
        outcome.post_type = post_type;
        outcome.primary_post_id = post_id_from_url(&reporting_url);
        if !quoted_url.is_empty() {
            outcome.quoted_post_id = post_id_from_url(&quoted_url);
        }

        // Content policy runs against the original raw text, not the
        // extracted line, and suppresses all downstream actions.
        if self.content.is_banned(&post.text) {
            debug!(post_id = %post.id, "banned content, redacting action ids");
            outcome.response = ResponseStatus::Failed;
            outcome.errors.push(ErrorCode::BannedWord);
            outcome.primary_post_id = None;
            outcome.quoted_post_id = None;
        }

        if self.authors.is_ignored(&post.author_id, users) {
            debug!(post_id = %post.id, author_id = %post.author_id, "ignored author");
            outcome.errors.push(ErrorCode::IgnoredUser);
            outcome.primary_post_id = None;
        }
        if post_type == PostType::Quoted {
            if let Some(quoted_id) = &quoted_author_id {
                if self.authors.is_ignored(quoted_id, users) {
                    debug!(post_id = %post.id, quoted_author_id = %quoted_id, "ignored quoted author");
                    outcome.errors.push(ErrorCode::IgnoredUser);
                    outcome.quoted_post_id = None;
                }
            }
        }

        Ok(outcome)
    }
}

/// Resolves the quoted-post linkage: the canonical quoted URL (via the
/// URL entity whose expanded form contains the referenced id) and the
/// quoted author's id (via reverse handle lookup on the URL's path).
///
/// A `quoted` reference flips the post type even when no URL entity
/// matches; the quoted URL just stays empty then.
fn resolve_quoted(post: &RawPost, users: &UserMap) -> (PostType, String, Option<String>) {
    let Some(reference) = post
        .referenced_tweets
        .iter()
        .find(|r| r.kind == ReferenceKind::Quoted)
    else {
        return (PostType::Normal, String::new(), None);
    };

    let mut quoted_url = String::new();
    let mut quoted_author_id = None;
    for entity in &post.entities.urls {
        if entity.expanded_url.contains(&reference.id) {
            quoted_url = entity.expanded_url.clone();
            quoted_author_id = quoted_url
                .split('/')
                .nth(3)
                .and_then(|handle| id_for_handle(users, handle))
                .map(str::to_owned);
        }
    }

    (PostType::Quoted, quoted_url, quoted_author_id)
}

/// Pulls the post id out of a canonical status URL
/// (`https://twitter.com/<handle>/status/<id>`), dropping any query
/// string the expanded form carried along.
fn post_id_from_url(url: &str) -> Option<String> {
    url.split('/')
        .nth(5)
        .map(|id| id.split('?').next().unwrap_or(id).to_owned())
}
