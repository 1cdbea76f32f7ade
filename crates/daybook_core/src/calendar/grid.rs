//! Month grid generation.
//!
//! # Invariants
//! - The first cell is the Sunday on or before the first of the month.
//! - The last cell is the Saturday on or after the last of the month.
//! - Cells are consecutive ascending dates, so the length is 28, 35 or 42.

use crate::calendar::month::CalendarMonth;
use chrono::{Datelike, Days, Local, NaiveDate};

/// Weekday header labels, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const DAYS_PER_WEEK: usize = 7;

/// One displayed day of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// True iff `date` lies in the reference month.
    pub in_current_month: bool,
    /// True iff `date` equals "today" at generation time.
    pub is_today: bool,
}

/// Generates the Sunday-first grid for the month containing `reference`.
///
/// Only the year and month of `reference` are significant. The result is
/// deterministic for the same `(reference, today)` pair.
pub fn generate_grid(reference: NaiveDate, today: NaiveDate) -> Vec<DayCell> {
    let month = CalendarMonth::from_date(reference);
    let first_of_month = month.first_day();
    let last_of_month = month.last_day();

    let leading = u64::from(first_of_month.weekday().num_days_from_sunday());
    let trailing = 6 - u64::from(last_of_month.weekday().num_days_from_sunday());

    // Only the first and last representable months can fail these; their
    // grids are clipped to the month itself.
    let first_cell = first_of_month
        .checked_sub_days(Days::new(leading))
        .unwrap_or(first_of_month);
    let last_cell = last_of_month
        .checked_add_days(Days::new(trailing))
        .unwrap_or(last_of_month);

    first_cell
        .iter_days()
        .take_while(|date| *date <= last_cell)
        .map(|date| DayCell {
            date,
            in_current_month: month.contains(date),
            is_today: date == today,
        })
        .collect()
}

/// Generates the grid for `reference`, reading "today" from the local clock.
pub fn generate_grid_for_today(reference: NaiveDate) -> Vec<DayCell> {
    generate_grid(reference, Local::now().date_naive())
}

/// Splits a grid into week rows.
pub fn weeks(cells: &[DayCell]) -> impl Iterator<Item = &[DayCell]> {
    cells.chunks(DAYS_PER_WEEK)
}
