//! Core domain logic for Daybook.
//! This crate is the single source of truth for calendar grid and event
//! scheduling invariants.

pub mod calendar;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;

pub use calendar::grid::{
    generate_grid, generate_grid_for_today, weeks, DayCell, WEEKDAY_LABELS,
};
pub use calendar::month::{CalendarMonth, MonthParseError};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::date_key::{date_key, parse_date_key};
pub use model::event::{Event, EventDraft, EventId, EventValidationError};
pub use repo::event_repo::{
    decode_events, encode_events, EventPersistence, MemoryEventPersistence, PersistResult,
    PersistenceError, SqliteEventPersistence, DEFAULT_STORAGE_KEY,
};
pub use repo::events_by_date::EventsByDate;
pub use schedule::overlap::{find_conflict, windows_overlap};
pub use schedule::wall_clock::{anchor_wall_clock, format_wall_clock, parse_wall_clock};
pub use service::event_store::{EventStore, EventStoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
