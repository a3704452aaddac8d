//! The twiff micro-parser: recovers structured action reports from
//! adversarial, human-typed post text.
//!
//! Layered bottom-up: [`date`] guesses a calendar date from an ambiguous
//! 10-character string, [`fields`] assigns delimited tokens to typed
//! slots, [`extract`] locates the marker and tokenizes the text, and
//! [`classify`] resolves author/quoted-post linkage and applies content
//! and author policy on top of the extraction.

pub mod classify;
pub mod date;
pub mod error;
pub mod extract;
pub mod fields;
pub mod policy;

pub use classify::PostClassifier;
pub use date::parse_date_only;
pub use error::ClassifyError;
pub use extract::extract_report;
pub use fields::{classify_tokens, finalize_fields, validate_fields, ExtractedFields};
pub use policy::{AuthorPolicy, BannedWordPolicy, ContentPolicy, PermitAllAuthors};
