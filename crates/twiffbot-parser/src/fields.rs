//! Token-to-field classification.
//!
//! Humans type the report fields in a loose order with a delimiter of
//! their choosing, so assignment is rule-based and first-match-wins per
//! token, with positional fallback for plain text. Order matters: the
//! first purely-numeric token is the participant count, every later
//! date-shaped token overwrites the date, and text tokens fill
//! organization → country → state → city in that fixed priority.

use chrono::NaiveDate;

use twiffbot_core::outcome::ErrorCode;

use crate::date::parse_date_only;

/// Working record produced by one classification pass over the tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    /// Participant count; `0` means "not found".
    pub num_people: u32,
    pub organization: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub date: Option<NaiveDate>,
    pub url: String,
}

/// Assigns each token to a field. Pure; repairs and validation are
/// separate passes ([`finalize_fields`], [`validate_fields`]).
#[must_use]
pub fn classify_tokens(tokens: &[String]) -> ExtractedFields {
    let mut fields = ExtractedFields::default();

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        // A purely numeric token is the participant count, but only the
        // first one. Later numeric tokens fall through to the date rule
        // below, where they fail to parse and clear the date — a known
        // quirk of the canonical rule order (last date-shaped token wins,
        // parse failures included).
        if token.chars().all(|c| c.is_ascii_digit()) && fields.num_people == 0 {
            // Counts that overflow u32 are nobody's honest report; treat
            // them as "not found".
            fields.num_people = token.parse().unwrap_or(0);
            continue;
        }

        // Starts with two digits: a date attempt, successful or not.
        if leading_two_digits(token) {
            fields.date = parse_date_only(token);
            continue;
        }

        if token.starts_with("http") {
            fields.url = token.clone();
            continue;
        }

        // Plain text: first unfilled slot in priority order. Tokens left
        // over once all four slots are filled are dropped.
        let slot = if fields.organization.is_empty() {
            &mut fields.organization
        } else if fields.country.is_empty() {
            &mut fields.country
        } else if fields.state.is_empty() {
            &mut fields.state
        } else if fields.city.is_empty() {
            &mut fields.city
        } else {
            continue;
        };
        slot.clone_from(token);
    }

    fields
}

/// Post-pass repairs: fills defaults and fixes the common "city omitted"
/// mistake.
#[must_use]
pub fn finalize_fields(
    mut fields: ExtractedFields,
    post_date: NaiveDate,
    default_url: &str,
) -> ExtractedFields {
    // City is required, state is optional. When only the state slot got a
    // value the author most likely skipped the state, so shift it down.
    if !fields.state.is_empty() && fields.city.is_empty() {
        fields.city = std::mem::take(&mut fields.state);
    }

    if fields.date.is_none() {
        fields.date = Some(post_date);
    }

    if fields.url.is_empty() {
        fields.url = default_url.to_owned();
    }

    // People end sentences after the location ("Germany." artifacts).
    strip_from_dot(&mut fields.country);
    strip_from_dot(&mut fields.state);
    strip_from_dot(&mut fields.city);

    fields
}

fn strip_from_dot(value: &mut String) {
    if let Some(idx) = value.find('.') {
        value.truncate(idx);
    }
}

/// Soft validation: appends error codes without discarding the data, so
/// downstream still sees the best-effort field values.
///
/// Bounds count characters, not bytes.
#[must_use]
pub fn validate_fields(fields: &ExtractedFields) -> Vec<ErrorCode> {
    let mut errors = Vec::new();

    let org_len = fields.organization.chars().count();
    if !(3..=50).contains(&org_len) || fields.organization.contains("http") {
        errors.push(ErrorCode::NoOrgFound);
    }

    let country_len = fields.country.chars().count();
    if !(2..=35).contains(&country_len) || fields.country.contains("http") {
        errors.push(ErrorCode::NoCountryFound);
    }

    if fields.state.chars().count() > 35 || fields.state.contains("http") {
        errors.push(ErrorCode::NoStateFound);
    }

    if fields.city.chars().count() > 60 || fields.city.contains("http") {
        errors.push(ErrorCode::NoCityFound);
    }

    if fields.num_people == 0 {
        errors.push(ErrorCode::NoPeopleFound);
    }

    errors
}

fn leading_two_digits(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(a), Some(b)) if a.is_ascii_digit() && b.is_ascii_digit()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -----------------------------------------------------------------------
    // classify_tokens
    // -----------------------------------------------------------------------

    #[test]
    fn well_formed_report_fills_all_slots() {
        let fields = classify_tokens(&tokens(&[
            "50",
            "Greenpeace",
            "Germany",
            "Berlin",
            "31-12-2021",
            "https://example.org/proof",
        ]));
        assert_eq!(fields.num_people, 50);
        assert_eq!(fields.organization, "Greenpeace");
        assert_eq!(fields.country, "Germany");
        assert_eq!(fields.state, "Berlin");
        assert!(fields.city.is_empty());
        assert_eq!(fields.date, Some(day(2021, 12, 31)));
        assert_eq!(fields.url, "https://example.org/proof");
    }

    #[test]
    fn empty_tokens_skipped() {
        let fields = classify_tokens(&tokens(&["", "7", "", "Org Name"]));
        assert_eq!(fields.num_people, 7);
        assert_eq!(fields.organization, "Org Name");
    }

    #[test]
    fn only_first_numeric_token_is_count() {
        let fields = classify_tokens(&tokens(&["50", "Greenpeace", "200"]));
        assert_eq!(fields.num_people, 50);
        // "200" is not reinterpreted as count; it hit the date rule and
        // failed to parse.
        assert_eq!(fields.date, None);
    }

    #[test]
    fn later_numeric_token_clears_parsed_date() {
        let fields = classify_tokens(&tokens(&["50", "31-12-2021", "200"]));
        assert_eq!(fields.date, None);
    }

    #[test]
    fn last_date_shaped_token_wins() {
        let fields = classify_tokens(&tokens(&["31-12-2021", "01-01-2022"]));
        assert_eq!(fields.date, Some(day(2022, 1, 1)));
    }

    #[test]
    fn last_url_wins() {
        let fields = classify_tokens(&tokens(&[
            "https://a.example/1",
            "https://b.example/2",
        ]));
        assert_eq!(fields.url, "https://b.example/2");
    }

    #[test]
    fn text_tokens_fill_priority_order() {
        let fields = classify_tokens(&tokens(&["Org", "Country", "State", "City"]));
        assert_eq!(fields.organization, "Org");
        assert_eq!(fields.country, "Country");
        assert_eq!(fields.state, "State");
        assert_eq!(fields.city, "City");
    }

    #[test]
    fn excess_text_tokens_dropped() {
        let fields = classify_tokens(&tokens(&["A1", "B2x", "Cc", "Dd", "Ee", "Ff"]));
        assert_eq!(fields.city, "Dd");
    }

    #[test]
    fn huge_count_treated_as_not_found() {
        let fields = classify_tokens(&tokens(&["99999999999999999999"]));
        assert_eq!(fields.num_people, 0);
    }

    // -----------------------------------------------------------------------
    // finalize_fields
    // -----------------------------------------------------------------------

    #[test]
    fn state_shifts_into_empty_city() {
        let mut fields = ExtractedFields::default();
        fields.state = "Berlin".into();
        let fields = finalize_fields(fields, day(2022, 4, 15), "https://p/");
        assert_eq!(fields.city, "Berlin");
        assert!(fields.state.is_empty());
    }

    #[test]
    fn state_kept_when_city_present() {
        let mut fields = ExtractedFields::default();
        fields.state = "Bavaria".into();
        fields.city = "Munich".into();
        let fields = finalize_fields(fields, day(2022, 4, 15), "https://p/");
        assert_eq!(fields.state, "Bavaria");
        assert_eq!(fields.city, "Munich");
    }

    #[test]
    fn missing_date_defaults_to_post_date() {
        let fields = finalize_fields(ExtractedFields::default(), day(2022, 4, 15), "https://p/");
        assert_eq!(fields.date, Some(day(2022, 4, 15)));
    }

    #[test]
    fn missing_url_defaults_to_resolved_proof() {
        let fields = finalize_fields(ExtractedFields::default(), day(2022, 4, 15), "https://p/1");
        assert_eq!(fields.url, "https://p/1");
    }

    #[test]
    fn explicit_url_not_overwritten() {
        let mut fields = ExtractedFields::default();
        fields.url = "https://explicit/".into();
        let fields = finalize_fields(fields, day(2022, 4, 15), "https://p/1");
        assert_eq!(fields.url, "https://explicit/");
    }

    #[test]
    fn trailing_sentence_dot_stripped_from_locations() {
        let mut fields = ExtractedFields::default();
        fields.country = "Germany.".into();
        fields.state = "N.R.W".into();
        fields.city = "Berlin.".into();
        let fields = finalize_fields(fields, day(2022, 4, 15), "https://p/");
        assert_eq!(fields.country, "Germany");
        // Cut at the first dot, as the legacy parser did.
        assert_eq!(fields.state, "N");
        assert_eq!(fields.city, "Berlin");
    }

    // -----------------------------------------------------------------------
    // validate_fields
    // -----------------------------------------------------------------------

    fn valid_fields() -> ExtractedFields {
        ExtractedFields {
            num_people: 50,
            organization: "Greenpeace".into(),
            country: "Germany".into(),
            state: String::new(),
            city: "Berlin".into(),
            date: Some(day(2022, 4, 15)),
            url: "https://p/1".into(),
        }
    }

    #[test]
    fn valid_fields_produce_no_errors() {
        assert!(validate_fields(&valid_fields()).is_empty());
    }

    #[test]
    fn org_length_bounds() {
        let mut fields = valid_fields();
        fields.organization = "ab".into();
        assert_eq!(validate_fields(&fields), vec![ErrorCode::NoOrgFound]);

        fields.organization = "abc".into();
        assert!(validate_fields(&fields).is_empty());

        fields.organization = "x".repeat(50);
        assert!(validate_fields(&fields).is_empty());

        fields.organization = "x".repeat(51);
        assert_eq!(validate_fields(&fields), vec![ErrorCode::NoOrgFound]);
    }

    #[test]
    fn org_with_embedded_link_rejected() {
        let mut fields = valid_fields();
        fields.organization = "see https://org.example".into();
        assert_eq!(validate_fields(&fields), vec![ErrorCode::NoOrgFound]);
    }

    #[test]
    fn country_length_bounds() {
        let mut fields = valid_fields();
        fields.country = "D".into();
        assert_eq!(validate_fields(&fields), vec![ErrorCode::NoCountryFound]);

        fields.country = "DE".into();
        assert!(validate_fields(&fields).is_empty());

        fields.country = "x".repeat(36);
        assert_eq!(validate_fields(&fields), vec![ErrorCode::NoCountryFound]);
    }

    #[test]
    fn empty_state_is_fine_but_long_state_is_not() {
        let mut fields = valid_fields();
        assert!(validate_fields(&fields).is_empty());

        fields.state = "x".repeat(36);
        assert_eq!(validate_fields(&fields), vec![ErrorCode::NoStateFound]);
    }

    #[test]
    fn city_has_no_lower_bound() {
        let mut fields = valid_fields();
        fields.city = "A".into();
        assert!(validate_fields(&fields).is_empty());

        fields.city = "x".repeat(61);
        assert_eq!(validate_fields(&fields), vec![ErrorCode::NoCityFound]);
    }

    #[test]
    fn zero_people_reported() {
        let mut fields = valid_fields();
        fields.num_people = 0;
        assert_eq!(validate_fields(&fields), vec![ErrorCode::NoPeopleFound]);
    }

    #[test]
    fn length_bounds_count_chars_not_bytes() {
        let mut fields = valid_fields();
        // 3 chars, 6+ bytes.
        fields.organization = "Öko".into();
        assert!(validate_fields(&fields).is_empty());
    }

    #[test]
    fn errors_accumulate_in_field_order() {
        let fields = ExtractedFields::default();
        assert_eq!(
            validate_fields(&fields),
            vec![
                ErrorCode::NoOrgFound,
                ErrorCode::NoCountryFound,
                ErrorCode::NoPeopleFound,
            ]
        );
    }
}
