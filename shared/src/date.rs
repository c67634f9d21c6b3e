//! Date display helpers.
//!
//! The API sends timestamps as RFC 3339 / ISO 8601 strings; the portal shows
//! them in long form ("January 5, 2026"). Parsing failures fall back to the
//! raw string rather than erroring a whole page render.

use chrono::{DateTime, NaiveDate};

/// Render an API date string in long form. Accepts a full RFC 3339
/// timestamp or a bare `YYYY-MM-DD` date; anything else passes through.
pub fn long_date(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return format_long(ts.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return format_long(date);
    }
    raw.to_string()
}

fn format_long(date: NaiveDate) -> String {
    // %-d is not portable; strip the leading zero by hand.
    let day = date.format("%d").to_string();
    let day = day.trim_start_matches('0');
    format!("{} {}, {}", date.format("%B"), day, date.format("%Y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_rfc3339_and_bare_dates() {
        assert_eq!(long_date("2026-01-05T10:30:00Z"), "January 5, 2026");
        assert_eq!(long_date("2025-12-24"), "December 24, 2025");
    }

    #[test]
    fn passes_through_unparsable_input() {
        assert_eq!(long_date("last Tuesday"), "last Tuesday");
        assert_eq!(long_date(""), "");
    }
}
