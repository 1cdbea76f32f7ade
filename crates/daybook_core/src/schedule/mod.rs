//! Pure scheduling rules shared by the event store and its callers.
//!
//! # Responsibility
//! - Decide whether two half-open windows collide.
//! - Turn `HH:MM` wall-clock input into timestamps on a fixed date.
//!
//! # Invariants
//! - Nothing in this module performs I/O or reads the clock.

pub mod overlap;
pub mod wall_clock;
