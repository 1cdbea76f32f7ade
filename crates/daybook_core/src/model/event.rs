//! Event domain model.
//!
//! # Responsibility
//! - Define the canonical record stored per calendar date.
//! - Validate titles, windows and date anchoring before any write.
//!
//! # Invariants
//! - `id` is stable and never reused for another event.
//! - `start_time < end_time`, strictly.
//! - Both timestamps fall on the calendar date the event is stored under.
//! - Timestamps are zone-naive wall-clock values; no offset is ever applied.

use crate::model::date_key::date_key;
use crate::schedule::wall_clock::anchor_wall_clock;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a scheduled event.
pub type EventId = Uuid;

/// Validation failure for event input or persisted event state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    /// The nil UUID is reserved and never identifies an event.
    NilId,
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// `start >= end`.
    InvalidWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// A timestamp is not on the date the event belongs to.
    OffDate {
        date: NaiveDate,
        timestamp: NaiveDateTime,
    },
    /// Wall-clock input is not a valid `HH:MM` time.
    InvalidWallClock(String),
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "event id must not be nil"),
            Self::EmptyTitle => write!(f, "event title must not be empty"),
            Self::InvalidWindow { start, end } => write!(
                f,
                "event end ({}) must be after start ({})",
                end.format("%H:%M"),
                start.format("%H:%M")
            ),
            Self::OffDate { date, timestamp } => write!(
                f,
                "event time {} is not on {}",
                timestamp.format("%Y-%m-%d %H:%M"),
                date_key(*date)
            ),
            Self::InvalidWallClock(value) => {
                write!(f, "invalid time `{value}`; expected HH:MM")
            }
        }
    }
}

impl Error for EventValidationError {}

/// Input for creating an event; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub description: Option<String>,
}

impl EventDraft {
    pub fn new(
        title: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Self {
        Self {
            title: title.into(),
            start_time,
            end_time,
            description: None,
        }
    }

    /// Builds a draft from `HH:MM` wall-clock inputs on `date`.
    ///
    /// # Errors
    /// - `InvalidWallClock` when either time does not parse.
    pub fn at_wall_clock(
        date: NaiveDate,
        title: impl Into<String>,
        start: &str,
        end: &str,
    ) -> Result<Self, EventValidationError> {
        Ok(Self::new(
            title,
            anchor_wall_clock(date, start)?,
            anchor_wall_clock(date, end)?,
        ))
    }

    /// Sets the description; blank text is stored as no description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_description(description.into());
        self
    }
}

/// A scheduled item on one calendar date.
///
/// Serialized with camelCase field names to match the persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Event {
    /// Creates an event from `draft` with a freshly generated id.
    ///
    /// Does not validate; the store validates before storing.
    pub fn from_draft(draft: EventDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            start_time: draft.start_time,
            end_time: draft.end_time,
            description: draft.description,
        }
    }

    /// Creates an event with a caller-provided id.
    ///
    /// # Errors
    /// - `NilId` when `id` is the nil UUID.
    pub fn with_id(id: EventId, draft: EventDraft) -> Result<Self, EventValidationError> {
        if id.is_nil() {
            return Err(EventValidationError::NilId);
        }
        Ok(Self {
            id,
            ..Self::from_draft(draft)
        })
    }

    /// Checks id, title and window invariants.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.id.is_nil() {
            return Err(EventValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        if self.start_time >= self.end_time {
            return Err(EventValidationError::InvalidWindow {
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok(())
    }

    /// Checks `validate()` plus anchoring of both timestamps to `date`.
    pub fn validate_on(&self, date: NaiveDate) -> Result<(), EventValidationError> {
        self.validate()?;
        for timestamp in [self.start_time, self.end_time] {
            if timestamp.date() != date {
                return Err(EventValidationError::OffDate { date, timestamp });
            }
        }
        Ok(())
    }

    /// Returns the half-open `[start, end)` window.
    pub fn window(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.start_time, self.end_time)
    }
}

fn normalize_description(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
