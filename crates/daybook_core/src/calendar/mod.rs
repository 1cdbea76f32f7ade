//! Month view calendar model.
//!
//! # Responsibility
//! - Describe a displayed month and navigate between months.
//! - Generate the Sunday-first day grid rendered by the view layer.
//!
//! # Invariants
//! - Grids always hold whole weeks, from a Sunday to a Saturday.
//! - Generation is pure given the reference date and "today".

pub mod grid;
pub mod month;
