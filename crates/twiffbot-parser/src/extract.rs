//! Marker location, noise stripping, delimiter inference and
//! tokenization of the structured report line.

use chrono::NaiveDate;
use tracing::debug;

use twiffbot_core::outcome::{ErrorCode, Outcome, PostType, ReportData, ResponseStatus};
use twiffbot_core::post::UrlEntity;

use crate::fields::{classify_tokens, finalize_fields, validate_fields};

/// Case variants of the marker, scanned in priority order.
const MARKERS: [&str; 3] = ["#twiff", "#Twiff", "#TWIFF"];

/// Length of the marker token; the structured line starts right after it.
const MARKER_LEN: usize = 6;

/// Fixed width of a shortened `t.co` link as it appears in post text.
const SHORT_LINK_LEN: usize = 13;

const SHORT_LINK_PREFIX: &str = "https://t.co/";
const PIC_HOST: &str = "pic.twitter.com/";

/// Report line too short to hold anything useful.
const MIN_USABLE_LEN: usize = 10;

/// Extracts an action report from raw post text.
///
/// Locates the marker, strips trailing noise (picture display URLs,
/// later lines, the shortened proof link), infers the author's field
/// delimiter, tokenizes, and delegates to the field classifier. The
/// returned outcome carries best-effort data even on validation failure;
/// only the two extraction-level errors short-circuit with empty data.
///
/// `quoted_url` is empty when the post quotes nothing; when set it wins
/// over `reporting_url` as the default proof URL.
#[must_use]
pub fn extract_report(
    text: &str,
    urls: &[UrlEntity],
    post_date: NaiveDate,
    reporting_url: &str,
    quoted_url: &str,
) -> Outcome {
    let Some(start) = find_marker(text) else {
        debug!("no marker variant in post text");
        return Outcome::failure(ErrorCode::HashtagTwiffNotFound);
    };
    // Everything before the marker is reporter preamble, not data.
    let mut report = text[start..].to_string();

    // An attached picture leaves a trailing display-URL artifact in the
    // text (shortened link plus display suffix); cut it so it cannot be
    // tokenized as a field.
    for url in urls {
        if let Some(suffix) = url.display_url.strip_prefix(PIC_HOST) {
            let keep = char_len(&report).saturating_sub(char_len(suffix) + SHORT_LINK_LEN);
            report = truncate_chars(&report, keep);
            break;
        }
    }

    // The structured line ends at the first newline; later lines are
    // free-form commentary.
    if let Some(idx) = report.find('\n') {
        report.truncate(idx);
    }

    // The shortened proof link and everything after it would otherwise be
    // split into spurious tokens.
    if let Some(idx) = report.find(SHORT_LINK_PREFIX) {
        report.truncate(idx);
    }

    if char_len(&report) < MIN_USABLE_LEN {
        return Outcome::failure(ErrorCode::TwifftextTooShort);
    }

    let delimiter = detect_delimiter(&report);
    debug!(?delimiter, "inferred field delimiter");

    let mut body: String = report.chars().skip(MARKER_LEN).collect();
    // The quoted-post URL is linkage, not a field; drop it before the
    // split can cut through it.
    if !quoted_url.is_empty() {
        body = body.replace(quoted_url, "");
    }

    let tokens: Vec<String> = match delimiter {
        Some(d) => body.split(d).map(trim_token).collect(),
        // The author never typed a non-alphanumeric separator; the whole
        // remainder is one token.
        None => vec![trim_token(&body)],
    };

    let fields = classify_tokens(&tokens);
    let default_url = if quoted_url.is_empty() {
        reporting_url
    } else {
        quoted_url
    };
    let fields = finalize_fields(fields, post_date, default_url);
    let errors = validate_fields(&fields);

    let mut location = fields.country.clone();
    if !fields.state.is_empty() {
        location.push(' ');
        location.push_str(&fields.state);
    }
    location.push(' ');
    location.push_str(&fields.city);

    Outcome {
        response: if errors.is_empty() {
            ResponseStatus::Success
        } else {
            ResponseStatus::Failed
        },
        post_type: PostType::Normal,
        primary_post_id: None,
        quoted_post_id: None,
        data: ReportData {
            num_people: fields.num_people,
            created_at: fields.date.unwrap_or(post_date).format("%d-%m-%Y").to_string(),
            organization: fields.organization,
            location,
            url: fields.url,
        },
        errors,
    }
}

fn find_marker(text: &str) -> Option<usize> {
    MARKERS.iter().find_map(|marker| text.find(marker))
}

/// Scans past the marker for the author's separator: the first character
/// after index 6 that is neither a space, a digit, nor a letter. Assumes
/// the chosen separator is itself not alphanumeric or whitespace — a
/// deliberate heuristic, not a parser of arbitrary punctuation.
fn detect_delimiter(report: &str) -> Option<char> {
    report
        .chars()
        .skip(MARKER_LEN)
        .find(|c| *c != ' ' && !c.is_numeric() && !c.is_alphabetic())
}

fn trim_token(token: &str) -> String {
    // Some authors wrap fields in brackets or repeat the hash.
    token
        .trim_matches(|c: char| matches!(c, ' ' | '(' | ')' | '[' | ']' | '{' | '}' | '#' | '\n'))
        .to_string()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn truncate_chars(s: &str, keep: usize) -> String {
    s.chars().take(keep).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn extract(text: &str) -> Outcome {
        extract_report(
            text,
            &[],
            day(2022, 4, 15),
            "https://twitter.com/reporter/status/111",
            "",
        )
    }

    fn pic_entity(display_suffix: &str) -> UrlEntity {
        UrlEntity {
            url: "https://t.co/abcdefghij".into(),
            expanded_url: format!("https://pic.twitter.com/{display_suffix}"),
            display_url: format!("pic.twitter.com/{display_suffix}"),
        }
    }

    #[test]
    fn missing_marker_short_circuits() {
        let outcome = extract("just a regular post about lunch");
        assert_eq!(outcome.response, ResponseStatus::Failed);
        assert_eq!(outcome.errors, vec![ErrorCode::HashtagTwiffNotFound]);
        assert_eq!(outcome.data, ReportData::default());
    }

    #[test]
    fn marker_case_variants_accepted() {
        for text in [
            "#twiff 5|Greenpeace|Germany|Berlin",
            "#Twiff 5|Greenpeace|Germany|Berlin",
            "#TWIFF 5|Greenpeace|Germany|Berlin",
        ] {
            let outcome = extract(text);
            assert!(outcome.is_success(), "failed for {text}");
        }
    }

    #[test]
    fn pipe_delimited_report_parses() {
        let outcome = extract("#twiff 5|Greenpeace|Germany|Berlin");
        assert!(outcome.is_success());
        assert_eq!(outcome.data.num_people, 5);
        assert_eq!(outcome.data.organization, "Greenpeace");
        assert_eq!(outcome.data.location, "Germany Berlin");
    }

    #[test]
    fn preamble_before_marker_dropped() {
        let outcome = extract("Great turnout today! #twiff 5|Greenpeace|Germany|Berlin");
        assert!(outcome.is_success());
        assert_eq!(outcome.data.organization, "Greenpeace");
    }

    #[test]
    fn comma_delimiter_inferred_past_leading_count() {
        let outcome = extract("#twiff 250, Fridays for Future, Germany, Hamburg");
        assert!(outcome.is_success());
        assert_eq!(outcome.data.num_people, 250);
        assert_eq!(outcome.data.organization, "Fridays for Future");
        assert_eq!(outcome.data.location, "Germany Hamburg");
    }

    #[test]
    fn short_text_rejected() {
        let outcome = extract("#twiff 5");
        assert_eq!(outcome.errors, vec![ErrorCode::TwifftextTooShort]);
        assert_eq!(outcome.data, ReportData::default());
    }

    #[test]
    fn trailing_lines_ignored() {
        let outcome = extract("#twiff 5|Greenpeace|Germany|Berlin\nsee you all next week!");
        assert!(outcome.is_success());
        assert_eq!(outcome.data.location, "Germany Berlin");
    }

    #[test]
    fn shortened_link_and_tail_cut() {
        let outcome = extract("#twiff 5|Greenpeace|Germany|Berlin|https://t.co/abcdefghij");
        assert!(outcome.is_success());
        // The link is cut before tokenization, so the default proof URL
        // applies.
        assert_eq!(outcome.data.url, "https://twitter.com/reporter/status/111");
    }

    #[test]
    fn picture_display_artifact_cut() {
        let text = "#twiff 5|Greenpeace|Germany|Berlin https://t.co/xyzXYZ123 pic.twitter.com/abc123";
        let outcome = extract_report(
            text,
            &[pic_entity("abc123")],
            day(2022, 4, 15),
            "https://twitter.com/reporter/status/111",
            "",
        );
        assert!(outcome.is_success());
        assert_eq!(outcome.data.location, "Germany Berlin");
    }

    #[test]
    fn explicit_url_token_wins() {
        let outcome = extract("#twiff 5|Greenpeace|Germany|Berlin|https://proof.example/1");
        assert!(outcome.is_success());
        assert_eq!(outcome.data.url, "https://proof.example/1");
    }

    #[test]
    fn quoted_url_removed_and_used_as_default() {
        let outcome = extract_report(
            "#twiff 5|Greenpeace|Germany|Berlin https://twitter.com/other/status/222",
            &[],
            day(2022, 4, 15),
            "https://twitter.com/reporter/status/111",
            "https://twitter.com/other/status/222",
        );
        assert!(outcome.is_success());
        assert_eq!(outcome.data.url, "https://twitter.com/other/status/222");
    }

    #[test]
    fn date_defaults_to_post_date_formatted() {
        let outcome = extract("#twiff 5|Greenpeace|Germany|Berlin");
        assert_eq!(outcome.data.created_at, "15-04-2022");
    }

    #[test]
    fn explicit_date_token_used() {
        let outcome = extract("#twiff 5|Greenpeace|Germany|Berlin|31-12-2021");
        assert_eq!(outcome.data.created_at, "31-12-2021");
    }

    #[test]
    fn bracketed_tokens_trimmed() {
        let outcome = extract("#twiff 5| (Greenpeace) |{Germany}|#Berlin");
        assert!(outcome.is_success());
        assert_eq!(outcome.data.num_people, 5);
        assert_eq!(outcome.data.organization, "Greenpeace");
        assert_eq!(outcome.data.location, "Germany Berlin");
    }

    #[test]
    fn punctuation_right_after_marker_becomes_delimiter() {
        // A bracket before the first field is taken as the separator;
        // the scan trusts the first non-alphanumeric character it sees.
        let outcome = extract("#twiff [5]|Greenpeace|Germany|Berlin");
        assert!(!outcome.is_success());
    }

    #[test]
    fn state_included_in_location() {
        let outcome = extract("#twiff 5|Greenpeace|Germany|Bavaria|Munich");
        assert!(outcome.is_success());
        assert_eq!(outcome.data.location, "Germany Bavaria Munich");
    }

    #[test]
    fn no_delimiter_means_one_token() {
        // Only spaces and alphanumerics after the marker: nothing to
        // split on, so the whole line is one organization token.
        let outcome = extract("#twiff Greenpeace Germany Berlin");
        assert_eq!(outcome.data.organization, "Greenpeace Germany Berlin");
        assert!(outcome.errors.contains(&ErrorCode::NoCountryFound));
        assert!(outcome.errors.contains(&ErrorCode::NoPeopleFound));
    }

    #[test]
    fn failed_validation_keeps_best_effort_data() {
        let outcome = extract("#twiff 0|Greenpeace|Germany|Berlin");
        assert_eq!(outcome.response, ResponseStatus::Failed);
        assert_eq!(outcome.errors, vec![ErrorCode::NoPeopleFound]);
        assert_eq!(outcome.data.organization, "Greenpeace");
        assert_eq!(outcome.data.location, "Germany Berlin");
    }
}
