//! Date guessing for ambiguous human-typed 10-character date strings.

use chrono::NaiveDate;

/// Parses a 10-character date string, guessing between US and EU
/// conventions and between year-first/day-first orderings.
///
/// Delimiter detection: if the character at index 4 is a digit the year
/// trails and the delimiter sits at index 2 (`"31-12-2000"`,
/// `"12/31/2000"`); otherwise the year leads and the delimiter sits at
/// index 4 (`"2000-12-31"`). A `/` delimiter on year-trailing input means
/// US order (month before day); any other delimiter means EU order (day
/// before month). Year-leading input is read as year-month-day for every
/// delimiter.
///
/// This is a heuristic, not a guarantee: `"01-02-2000"` is genuinely
/// ambiguous and is read EU (1 February). Inputs that are not exactly 10
/// characters, or whose numeric groups do not form a real calendar date,
/// return `None`.
#[must_use]
pub fn parse_date_only(s: &str) -> Option<NaiveDate> {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() != 10 {
        return None;
    }

    // A digit at index 4 means a two-digit day or month group leads, so
    // the year trails and the delimiter sits at index 2; otherwise a
    // four-digit year leads with the delimiter at index 4.
    let (delimiter, year_first) = if chars[4].is_ascii_digit() {
        (chars[2], false)
    } else {
        (chars[4], true)
    };

    let mut groups = s.split(delimiter);
    let (a, b, c) = (groups.next()?, groups.next()?, groups.next()?);
    if groups.next().is_some() {
        return None;
    }

    let (day, month, year) = if year_first {
        (c, b, a)
    } else if delimiter == '/' {
        (b, a, c)
    } else {
        (a, b, c)
    };

    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
