use thiserror::Error;

/// Contract violations in the input records. These indicate the upstream
/// fetcher handed us an inconsistent batch, not a bad report text — bad
/// report text is expressed through outcome error codes instead.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("author {author_id} of post {post_id} is missing from the user map")]
    UnknownAuthor { post_id: String, author_id: String },

    #[error("post {post_id} has malformed created_at \"{value}\"")]
    InvalidTimestamp { post_id: String, value: String },
}
