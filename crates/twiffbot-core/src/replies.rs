//! Reply text generation from outcome records.
//!
//! Template selection mirrors what the downstream reply dispatcher keys
//! on: response status plus post type on success, status plus the first
//! error code on failure. An empty template is an explicit "stay silent"
//! for that case.

use std::collections::HashMap;

use crate::outcome::{Outcome, ResponseStatus};

/// Renders reply text for classified posts from configured templates.
///
/// Placeholders: `{count}`, `{person}` (singular/plural of "person"),
/// `{organization}`, `{location}`, `{url}`.
#[derive(Debug, Clone)]
pub struct ReplyTemplates {
    templates: HashMap<String, String>,
    char_budget: usize,
}

impl ReplyTemplates {
    #[must_use]
    pub fn new(templates: HashMap<String, String>, char_budget: usize) -> Self {
        ReplyTemplates {
            templates,
            char_budget,
        }
    }

    /// Selects and renders the reply for an outcome. Returns `None` when
    /// no reply should be sent: the selected template is missing or empty,
    /// or everything renders over the character budget.
    #[must_use]
    pub fn render(&self, outcome: &Outcome) -> Option<String> {
        let specific_key = match outcome.response {
            ResponseStatus::Success => format!("parse-success-{}", outcome.post_type),
            ResponseStatus::Failed => match outcome.primary_error() {
                Some(code) => format!("parse-failed-{code}"),
                None => "parse-failed".to_string(),
            },
        };
        let bare_key = match outcome.response {
            ResponseStatus::Success => "parse-success",
            ResponseStatus::Failed => "parse-failed",
        };

        let template = self
            .templates
            .get(&specific_key)
            .or_else(|| self.templates.get(bare_key))?;
        if template.is_empty() {
            return None;
        }

        let rendered = render_template(template, outcome);
        if rendered.chars().count() <= self.char_budget {
            return Some(rendered);
        }

        // Over budget: fall back to the bare status template, once.
        let bare = self.templates.get(bare_key)?;
        if bare.is_empty() || bare == template {
            return None;
        }
        let rendered = render_template(bare, outcome);
        (rendered.chars().count() <= self.char_budget).then_some(rendered)
    }
}

fn render_template(template: &str, outcome: &Outcome) -> String {
    let person = if outcome.data.num_people == 1 {
        "person"
    } else {
        "people"
    };
    template
        .replace("{count}", &outcome.data.num_people.to_string())
        .replace("{person}", person)
        .replace("{organization}", &outcome.data.organization)
        .replace("{location}", &outcome.data.location)
        .replace("{url}", &outcome.data.url)
}
