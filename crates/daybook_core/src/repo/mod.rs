//! Event persistence contracts and adapters.
//!
//! # Responsibility
//! - Define the load/save contract the event store writes through.
//! - Keep JSON and SQLite details inside the persistence boundary.
//!
//! # Invariants
//! - The whole `EventsByDate` mapping is read and written as one document.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod event_repo;
pub mod events_by_date;
