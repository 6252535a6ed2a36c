//! Shared date helpers used by the transformer, the config validator and the chart builder.

use chrono::NaiveDate;

/// Canonical date layout used throughout the pipeline.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date; unpadded month/day (`2020-1-22`) is accepted.
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}

/// Formats a date in canonical `YYYY-MM-DD` form.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// True when `value` is already in canonical, zero-padded form.
pub fn is_canonical_date(value: &str) -> bool {
    parse_date(value).is_ok_and(|date| format_date(date) == value)
}

/// Upper-case three letter month name, e.g. `FEB`.
pub fn month_abbrev(date: NaiveDate) -> String {
    date.format("%b").to_string().to_uppercase()
}

/// `MM-DD` label used on the x axis.
pub fn month_day(date: NaiveDate) -> String {
    date.format("%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unpadded_date() {
        let date = parse_date("2020-1-22").unwrap();
        assert_eq!(format_date(date), "2020-01-22");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date("2020/01/22").is_err());
        assert!(parse_date("2020-13-01").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_is_canonical_date() {
        assert!(is_canonical_date("2020-04-07"));
        assert!(!is_canonical_date("2020-4-7"));
        assert!(!is_canonical_date("07-04-2020"));
    }

    #[test]
    fn test_labels() {
        let date = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
        assert_eq!(month_abbrev(date), "FEB");
        assert_eq!(month_day(date), "02-01");
    }
}
