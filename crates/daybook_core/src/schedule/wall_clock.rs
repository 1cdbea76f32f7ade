//! Wall-clock (`HH:MM`) input handling.
//!
//! Times are combined with the event's own calendar date as zone-naive
//! values. No time zone is consulted, so an event never moves to a different
//! day on either the create or the edit path.

use crate::model::event::EventValidationError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const WALL_CLOCK_FORMAT: &str = "%H:%M";

/// Parses a `HH:MM` wall-clock time (24-hour clock).
pub fn parse_wall_clock(value: &str) -> Result<NaiveTime, EventValidationError> {
    NaiveTime::parse_from_str(value.trim(), WALL_CLOCK_FORMAT)
        .map_err(|_| EventValidationError::InvalidWallClock(value.to_string()))
}

/// Combines `date` with a `HH:MM` wall-clock time.
pub fn anchor_wall_clock(
    date: NaiveDate,
    value: &str,
) -> Result<NaiveDateTime, EventValidationError> {
    Ok(date.and_time(parse_wall_clock(value)?))
}

/// Formats the time-of-day part of `timestamp` as `HH:MM`.
pub fn format_wall_clock(timestamp: NaiveDateTime) -> String {
    timestamp.format(WALL_CLOCK_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::{anchor_wall_clock, format_wall_clock, parse_wall_clock};
    use crate::model::event::EventValidationError;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn parses_padded_and_trimmed_input() {
        assert_eq!(
            parse_wall_clock("09:05").unwrap(),
            NaiveTime::from_hms_opt(9, 5, 0).unwrap()
        );
        assert_eq!(
            parse_wall_clock(" 23:59 ").unwrap(),
            NaiveTime::from_hms_opt(23, 59, 0).unwrap()
        );
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        for input in ["24:00", "12:60", "noon", ""] {
            assert_eq!(
                parse_wall_clock(input).unwrap_err(),
                EventValidationError::InvalidWallClock(input.to_string()),
                "input `{input}` should be rejected"
            );
        }
    }

    #[test]
    fn anchoring_keeps_the_calendar_date() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let late = anchor_wall_clock(date, "23:30").unwrap();
        assert_eq!(late.date(), date);
        assert_eq!(format_wall_clock(late), "23:30");
    }
}
