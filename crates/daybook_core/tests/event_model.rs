use chrono::{NaiveDate, NaiveDateTime};
use daybook_core::{date_key, parse_date_key, Event, EventDraft, EventValidationError};
use uuid::Uuid;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    day().and_hms_opt(hour, minute, 0).unwrap()
}

#[test]
fn from_draft_assigns_fresh_non_nil_ids() {
    let draft = EventDraft::new("standup", at(9, 0), at(9, 15));
    let first = Event::from_draft(draft.clone());
    let second = Event::from_draft(draft);

    assert!(!first.id.is_nil());
    assert_ne!(first.id, second.id);
    assert_eq!(first.title, "standup");
    assert_eq!(first.description, None);
    first.validate_on(day()).unwrap();
}

#[test]
fn with_id_rejects_nil_uuid() {
    let draft = EventDraft::new("standup", at(9, 0), at(9, 15));
    let err = Event::with_id(Uuid::nil(), draft).unwrap_err();
    assert_eq!(err, EventValidationError::NilId);
}

#[test]
fn validate_rejects_blank_title_and_empty_or_reversed_window() {
    let blank = Event::from_draft(EventDraft::new("   ", at(9, 0), at(10, 0)));
    assert_eq!(blank.validate().unwrap_err(), EventValidationError::EmptyTitle);

    let empty_window = Event::from_draft(EventDraft::new("x", at(10, 0), at(10, 0)));
    assert_eq!(
        empty_window.validate().unwrap_err(),
        EventValidationError::InvalidWindow {
            start: at(10, 0),
            end: at(10, 0),
        }
    );

    let reversed = Event::from_draft(EventDraft::new("x", at(11, 0), at(10, 0)));
    assert!(matches!(
        reversed.validate().unwrap_err(),
        EventValidationError::InvalidWindow { .. }
    ));
}

#[test]
fn validate_on_requires_both_times_on_the_date() {
    let next_day = day().succ_opt().unwrap();
    let event = Event::from_draft(EventDraft::new(
        "late",
        at(23, 0),
        next_day.and_hms_opt(0, 30, 0).unwrap(),
    ));

    assert_eq!(
        event.validate_on(day()).unwrap_err(),
        EventValidationError::OffDate {
            date: day(),
            timestamp: next_day.and_hms_opt(0, 30, 0).unwrap(),
        }
    );
}

#[test]
fn wall_clock_draft_anchors_to_the_given_date() {
    let draft = EventDraft::at_wall_clock(day(), "review", "10:00", "11:30")
        .unwrap()
        .with_description("quarterly numbers");

    assert_eq!(draft.start_time, at(10, 0));
    assert_eq!(draft.end_time, at(11, 30));
    assert_eq!(draft.description.as_deref(), Some("quarterly numbers"));

    let err = EventDraft::at_wall_clock(day(), "review", "10:00", "25:00").unwrap_err();
    assert_eq!(err, EventValidationError::InvalidWallClock("25:00".to_string()));
}

#[test]
fn blank_description_is_dropped() {
    let draft = EventDraft::new("x", at(9, 0), at(10, 0)).with_description("  ");
    assert_eq!(draft.description, None);
}

#[test]
fn event_serialization_uses_camel_case_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let event = Event::with_id(
        id,
        EventDraft::new("review", at(10, 0), at(11, 0)).with_description("notes"),
    )
    .unwrap();

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["title"], "review");
    assert_eq!(json["startTime"], "2024-03-15T10:00:00");
    assert_eq!(json["endTime"], "2024-03-15T11:00:00");
    assert_eq!(json["description"], "notes");

    let decoded: Event = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, event);
}

#[test]
fn missing_description_is_omitted_from_the_wire() {
    let event = Event::from_draft(EventDraft::new("x", at(9, 0), at(10, 0)));
    let json = serde_json::to_value(&event).unwrap();
    assert!(json.get("description").is_none());

    let decoded: Event = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.description, None);
}

#[test]
fn date_keys_round_trip_canonically() {
    assert_eq!(date_key(day()), "2024-03-15");
    assert_eq!(parse_date_key("2024-03-15"), Some(day()));
    assert_eq!(parse_date_key("15/03/2024"), None);
}

#[test]
fn validation_messages_are_user_facing() {
    assert_eq!(
        EventValidationError::EmptyTitle.to_string(),
        "event title must not be empty"
    );
    let window = EventValidationError::InvalidWindow {
        start: at(11, 0),
        end: at(10, 0),
    };
    assert_eq!(window.to_string(), "event end (10:00) must be after start (11:00)");
}
