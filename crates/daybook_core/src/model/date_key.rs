//! `YYYY-MM-DD` date keys.
//!
//! Date keys identify one calendar date in the persisted mapping and in any
//! identifier passed between the view layer and the core.

use chrono::NaiveDate;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Formats `date` as a zero-padded `YYYY-MM-DD` key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parses a canonical date key.
///
/// Returns `None` for malformed input and for non-canonical spellings such as
/// `2024-3-1`, so every date maps to exactly one key.
pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, DATE_KEY_FORMAT).ok()?;
    if date_key(date) != value {
        return None;
    }
    Some(date)
}

#[cfg(test)]
mod tests {
    use super::{date_key, parse_date_key};
    use chrono::NaiveDate;

    #[test]
    fn date_key_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(date_key(date), "2024-03-01");
    }

    #[test]
    fn parse_rejects_non_canonical_keys() {
        assert_eq!(
            parse_date_key("2024-03-01"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(parse_date_key("2024-3-1"), None);
        assert_eq!(parse_date_key("2024-02-30"), None);
        assert_eq!(parse_date_key(" 2024-03-01"), None);
        assert_eq!(parse_date_key(""), None);
    }
}
