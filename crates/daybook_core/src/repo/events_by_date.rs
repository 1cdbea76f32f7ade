//! In-memory date → events mapping.

use crate::model::event::{Event, EventId};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Events grouped by calendar date, each date in insertion order.
///
/// # Invariants
/// - No date maps to an empty sequence; removing the last event of a date
///   removes the date, so "empty" and "absent" compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventsByDate {
    dates: BTreeMap<NaiveDate, Vec<Event>>,
}

impl EventsByDate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events stored under `date`, or an empty slice.
    pub fn events_on(&self, date: NaiveDate) -> &[Event] {
        self.dates.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Looks up one event by id under `date`.
    pub fn get(&self, date: NaiveDate, id: EventId) -> Option<&Event> {
        self.events_on(date).iter().find(|event| event.id == id)
    }

    /// Appends `event` as the last event of `date`.
    pub fn push(&mut self, date: NaiveDate, event: Event) {
        self.dates.entry(date).or_default().push(event);
    }

    /// Replaces the event with the same id under `date`, keeping its position.
    ///
    /// Returns the previous record, or `None` (and leaves the mapping
    /// untouched) when no such event exists.
    pub fn replace(&mut self, date: NaiveDate, event: Event) -> Option<Event> {
        let slot = self
            .dates
            .get_mut(&date)?
            .iter_mut()
            .find(|existing| existing.id == event.id)?;
        Some(std::mem::replace(slot, event))
    }

    /// Removes the event with `id` under `date`.
    pub fn remove(&mut self, date: NaiveDate, id: EventId) -> Option<Event> {
        let events = self.dates.get_mut(&date)?;
        let index = events.iter().position(|event| event.id == id)?;
        let removed = events.remove(index);
        if events.is_empty() {
            self.dates.remove(&date);
        }
        Some(removed)
    }

    /// Dates that hold at least one event, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[Event])> {
        self.dates
            .iter()
            .map(|(date, events)| (*date, events.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Total number of events across all dates.
    pub fn event_count(&self) -> usize {
        self.dates.values().map(Vec::len).sum()
    }
}
