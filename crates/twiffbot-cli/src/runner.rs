//! Batch classification runner.
//!
//! Consumes a fetched batch directory (`tweets/*.json`, `users/*.json`,
//! one record per file, as the upstream fetcher dumps them), classifies
//! every post, logs the planned engagement (reply/like/retweet targets)
//! and exports the extracted report data.

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use uuid::Uuid;

use twiffbot_core::{
    load_policy, AppConfig, ErrorCode, Outcome, RawPost, RawUser, ReplyTemplates, ResponseStatus,
    UserMap,
};
use twiffbot_parser::{extract_report, BannedWordPolicy, ContentPolicy, PostClassifier};
use twiffbot_store::{exporter_for, IgnoredAuthors, NullExporter, OutcomeExporter};

/// Classifies every post in the batch directory.
pub fn run_batch(config: &AppConfig, input_dir: &Path, dry_run: bool) -> anyhow::Result<()> {
    let run_id = Uuid::new_v4();
    info!(%run_id, input_dir = %input_dir.display(), dry_run, "starting batch run");

    let policy = load_policy(&config.policy_path)
        .with_context(|| format!("loading policy from {}", config.policy_path.display()))?;
    let ignored = IgnoredAuthors::load(&config.ignored_authors_path).with_context(|| {
        format!(
            "loading ignored authors from {}",
            config.ignored_authors_path.display()
        )
    })?;
    info!(ignored_authors = ignored.len(), "policy loaded");

    let templates = ReplyTemplates::new(policy.replies, config.reply_char_budget);
    let classifier = PostClassifier::new(BannedWordPolicy::new(policy.banned_words), ignored);
    let exporter: Box<dyn OutcomeExporter> = if dry_run {
        Box::new(NullExporter)
    } else {
        exporter_for(config.exporter, &config.export_dir.join("parsed"))
    };

    let posts: Vec<RawPost> = load_records(&input_dir.join("tweets"))?;
    let users: Vec<RawUser> = load_records(&input_dir.join("users"))?;
    let users: UserMap = users.into_iter().map(|u| (u.id.clone(), u)).collect();
    info!(posts = posts.len(), users = users.len(), "batch loaded");

    let mut succeeded = 0usize;
    let mut failed = 0usize;
    let mut skipped = 0usize;
    for post in &posts {
        let outcome = match classifier.classify_post(post, &users) {
            Ok(outcome) => outcome,
            // A contract violation in one record must not sink the batch.
            Err(e) => {
                warn!(post_id = %post.id, error = %e, "skipping post");
                skipped += 1;
                continue;
            }
        };

        if outcome.is_success() {
            succeeded += 1;
        } else {
            failed += 1;
        }
        log_engagement_plan(post, &outcome, templates.render(&outcome).as_deref());

        if let Err(e) = exporter.export(&post.id, &outcome) {
            warn!(post_id = %post.id, error = %e, "export failed");
        }
    }

    info!(
        %run_id,
        total = posts.len(),
        succeeded,
        failed,
        skipped,
        "batch run finished"
    );
    Ok(())
}

/// Logs what the (out-of-process) dispatcher would do with this outcome:
/// reply text, like target, retweet target. Redacted ids suppress the
/// corresponding action.
fn log_engagement_plan(post: &RawPost, outcome: &Outcome, reply: Option<&str>) {
    info!(
        post_id = %post.id,
        response = %outcome.response,
        post_type = %outcome.post_type,
        errors = ?outcome.errors,
        "classified"
    );
    match reply {
        Some(text) => info!(post_id = %post.id, reply = text, "reply planned"),
        None => info!(post_id = %post.id, "no reply for this outcome"),
    }
    if let Some(id) = &outcome.primary_post_id {
        info!(target = %id, "like planned");
    }
    if let Some(id) = &outcome.quoted_post_id {
        info!(target = %id, "retweet planned");
    }
}

/// Runs the extractor over a single text and prints the outcome JSON.
/// Author policy does not apply (there is no author); content policy does.
pub fn parse_text(config: &AppConfig, text: &str) -> anyhow::Result<()> {
    let policy = load_policy(&config.policy_path)
        .with_context(|| format!("loading policy from {}", config.policy_path.display()))?;

    let today = chrono::Utc::now().date_naive();
    let mut outcome = extract_report(text, &[], today, "", "");
    if BannedWordPolicy::new(policy.banned_words).is_banned(text) {
        outcome.response = ResponseStatus::Failed;
        outcome.errors.push(ErrorCode::BannedWord);
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

/// Loads every `*.json` record from a directory, in file-name order so
/// runs are deterministic.
fn load_records<T: DeserializeOwned>(dir: &Path) -> anyhow::Result<Vec<T>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading batch directory {}", dir.display()))?;
    let mut paths: Vec<_> = entries
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("listing {}", dir.display()))?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let record = serde_json::from_str(&content)
            .with_context(|| format!("decoding {}", path.display()))?;
        records.push(record);
    }
    Ok(records)
}
