//! Event domain model.
//!
//! # Responsibility
//! - Define the canonical event record and its creation input.
//! - Own calendar date key formatting shared by storage and views.
//!
//! # Invariants
//! - Every event is identified by a stable, non-nil `EventId`.
//! - Event windows are half-open and anchored to one calendar date.

pub mod date_key;
pub mod event;
