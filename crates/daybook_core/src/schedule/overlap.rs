//! Half-open interval overlap rules.

use crate::model::event::{Event, EventId};
use chrono::NaiveDateTime;

/// Returns whether `[a_start, a_end)` and `[b_start, b_end)` overlap.
///
/// Back-to-back windows (`a_end == b_start`) do not overlap.
pub fn windows_overlap(
    (a_start, a_end): (NaiveDateTime, NaiveDateTime),
    (b_start, b_end): (NaiveDateTime, NaiveDateTime),
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Finds the first event in `events` whose window overlaps `window`.
///
/// `exclude` skips one id so an edited event is not checked against itself.
pub fn find_conflict<'a>(
    events: &'a [Event],
    window: (NaiveDateTime, NaiveDateTime),
    exclude: Option<EventId>,
) -> Option<&'a Event> {
    events
        .iter()
        .filter(|event| Some(event.id) != exclude)
        .find(|event| windows_overlap(event.window(), window))
}

#[cfg(test)]
mod tests {
    use super::{find_conflict, windows_overlap};
    use crate::model::event::{Event, EventDraft};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn event(title: &str, start: (u32, u32), end: (u32, u32)) -> Event {
        Event::from_draft(EventDraft::new(
            title,
            at(start.0, start.1),
            at(end.0, end.1),
        ))
    }

    #[test]
    fn back_to_back_windows_do_not_overlap() {
        assert!(!windows_overlap((at(10, 0), at(11, 0)), (at(11, 0), at(12, 0))));
        assert!(!windows_overlap((at(11, 0), at(12, 0)), (at(10, 0), at(11, 0))));
    }

    #[test]
    fn contained_and_partial_windows_overlap() {
        let base = (at(10, 0), at(11, 0));
        assert!(windows_overlap(base, (at(10, 30), at(10, 45))));
        assert!(windows_overlap(base, (at(9, 30), at(10, 30))));
        assert!(windows_overlap(base, (at(10, 59), at(12, 0))));
        assert!(windows_overlap(base, (at(9, 0), at(12, 0))));
        assert!(windows_overlap(base, base));
    }

    #[test]
    fn find_conflict_returns_first_colliding_event_and_honors_exclusion() {
        let morning = event("standup", (9, 0), (9, 15));
        let review = event("review", (10, 0), (11, 0));
        let events = vec![morning.clone(), review.clone()];

        let hit = find_conflict(&events, (at(10, 30), at(12, 0)), None).unwrap();
        assert_eq!(hit.id, review.id);

        assert!(find_conflict(&events, review.window(), Some(review.id)).is_none());
        assert!(find_conflict(&events, (at(9, 15), at(10, 0)), None).is_none());
    }
}
