//! Per-day event store.
//!
//! # Responsibility
//! - Own the `EventsByDate` mapping for the process.
//! - Enforce title, window and overlap rules on every mutation.
//! - Flush the whole mapping to the injected persistence after each change.
//!
//! # Invariants
//! - For each date, stored events have pairwise non-overlapping windows.
//! - Mutations update memory first, then persist; a failed write keeps the
//!   change in memory and reports `Persistence` carrying the applied event.
//! - After a failed load nothing is written until the caller calls
//!   `discard_unreadable`, so unreadable data is never silently replaced.
//! - This service returns typed outcomes only; it never logs or renders.

use crate::calendar::grid::DayCell;
use crate::model::date_key::date_key;
use crate::model::event::{Event, EventDraft, EventId, EventValidationError};
use crate::repo::event_repo::{EventPersistence, PersistenceError};
use crate::repo::events_by_date::EventsByDate;
use crate::schedule::overlap::find_conflict;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, EventStoreError>;

/// Typed outcome of a failed event store operation.
///
/// Every variant is recoverable; callers translate them into user messages.
#[derive(Debug)]
pub enum EventStoreError {
    /// Input must be corrected by the user.
    Validation(EventValidationError),
    /// The window overlaps `existing` on the same date.
    Conflict { date: NaiveDate, existing: Event },
    /// No event with `id` is stored under `date`.
    NotFound { date: NaiveDate, id: EventId },
    /// The change is applied in memory but was not written.
    ///
    /// `applied` is the created or updated event, or the deleted one.
    Persistence {
        applied: Event,
        source: PersistenceError,
    },
}

impl Display for EventStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Conflict { date, existing } => write!(
                f,
                "overlaps `{}` ({}-{}) on {}",
                existing.title,
                existing.start_time.format("%H:%M"),
                existing.end_time.format("%H:%M"),
                date_key(*date)
            ),
            Self::NotFound { date, id } => {
                write!(f, "event {id} not found on {}", date_key(*date))
            }
            Self::Persistence { source, .. } => {
                write!(f, "change kept in memory but not saved: {source}")
            }
        }
    }
}

impl Error for EventStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence { source, .. } => Some(source),
            Self::Conflict { .. } | Self::NotFound { .. } => None,
        }
    }
}

impl From<EventValidationError> for EventStoreError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Event store over an injected persistence collaborator.
pub struct EventStore<P: EventPersistence> {
    persistence: P,
    events: EventsByDate,
    load_warning: Option<PersistenceError>,
    writes_suspended: bool,
}

impl<P: EventPersistence> EventStore<P> {
    /// Loads the stored mapping and builds the store.
    ///
    /// Never fails: unreadable or corrupt data yields an empty, memory-only
    /// store and the failure is kept as `load_warning()`.
    pub fn open(persistence: P) -> Self {
        let (events, load_warning) = match persistence.load() {
            Ok(stored) => (stored.unwrap_or_default(), None),
            Err(err) => (EventsByDate::new(), Some(err)),
        };
        let writes_suspended = load_warning.is_some();
        Self {
            persistence,
            events,
            load_warning,
            writes_suspended,
        }
    }

    /// Load failure observed by `open`, if any.
    pub fn load_warning(&self) -> Option<&PersistenceError> {
        self.load_warning.as_ref()
    }

    /// Whether mutations are held in memory only.
    pub fn is_memory_only(&self) -> bool {
        self.writes_suspended
    }

    /// Gives up on the unreadable stored document and resumes writing.
    ///
    /// Immediately replaces the stored document with the in-memory mapping.
    /// No-op when the load succeeded.
    pub fn discard_unreadable(&mut self) -> Result<(), PersistenceError> {
        if !self.writes_suspended {
            return Ok(());
        }
        self.persistence.save(&self.events)?;
        self.writes_suspended = false;
        self.load_warning = None;
        Ok(())
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Full in-memory mapping.
    pub fn events(&self) -> &EventsByDate {
        &self.events
    }

    /// Creates an event on `date` and appends it after existing events.
    ///
    /// # Errors
    /// - `Validation` for an empty title, `start >= end`, or a timestamp off
    ///   `date`. State is unchanged.
    /// - `Conflict` when the window overlaps an event on `date`. State is
    ///   unchanged.
    /// - `Persistence` when the write fails or writes are suspended; the
    ///   event stays in memory and is returned in the error.
    pub fn create_event(&mut self, date: NaiveDate, draft: EventDraft) -> StoreResult<Event> {
        let event = Event::from_draft(draft);
        event.validate_on(date)?;
        self.ensure_window_free(date, &event, None)?;

        self.events.push(date, event.clone());
        self.flush(event)
    }

    /// Replaces the stored event with `updated.id` under `date`, in place.
    ///
    /// The edited event is excluded from its own overlap check.
    ///
    /// # Errors
    /// - `NotFound` when `updated.id` is not stored under `date`.
    /// - `Validation`, `Conflict` and `Persistence` as for `create_event`.
    pub fn edit_event(&mut self, date: NaiveDate, updated: Event) -> StoreResult<Event> {
        if self.events.get(date, updated.id).is_none() {
            return Err(EventStoreError::NotFound {
                date,
                id: updated.id,
            });
        }
        updated.validate_on(date)?;
        self.ensure_window_free(date, &updated, Some(updated.id))?;

        self.events.replace(date, updated.clone());
        self.flush(updated)
    }

    /// Deletes the event with `id` under `date`.
    ///
    /// Idempotent: an absent id is a no-op and nothing is written.
    pub fn delete_event(&mut self, date: NaiveDate, id: EventId) -> StoreResult<()> {
        if let Some(removed) = self.events.remove(date, id) {
            self.flush(removed)?;
        }
        Ok(())
    }

    /// Events on `date` in insertion order.
    pub fn list_events(&self, date: NaiveDate) -> &[Event] {
        self.events.events_on(date)
    }

    pub fn count_events(&self, date: NaiveDate) -> usize {
        self.list_events(date).len()
    }

    pub fn get_event(&self, date: NaiveDate, id: EventId) -> Option<&Event> {
        self.events.get(date, id)
    }

    /// Badge counts for a rendered grid, index-aligned with `cells`.
    pub fn count_events_in(&self, cells: &[DayCell]) -> Vec<usize> {
        cells
            .iter()
            .map(|cell| self.count_events(cell.date))
            .collect()
    }

    fn ensure_window_free(
        &self,
        date: NaiveDate,
        candidate: &Event,
        exclude: Option<EventId>,
    ) -> StoreResult<()> {
        match find_conflict(self.events.events_on(date), candidate.window(), exclude) {
            Some(existing) => Err(EventStoreError::Conflict {
                date,
                existing: existing.clone(),
            }),
            None => Ok(()),
        }
    }

    fn flush(&self, applied: Event) -> StoreResult<Event> {
        let saved = if self.writes_suspended {
            Err(PersistenceError::Suspended)
        } else {
            self.persistence.save(&self.events)
        };
        match saved {
            Ok(()) => Ok(applied),
            Err(source) => Err(EventStoreError::Persistence { applied, source }),
        }
    }
}
