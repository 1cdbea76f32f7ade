//! Calendar month value type and navigation.

use chrono::{Datelike, Days, Months, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::calendar::grid::{generate_grid, DayCell};

/// A displayed `(year, month)` pair.
///
/// Stored as the first day of the month so every value is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    first: NaiveDate,
}

/// Error for month input that is not `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthParseError(String);

impl Display for MonthParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid month `{}`; expected YYYY-MM", self.0)
    }
}

impl Error for MonthParseError {}

impl CalendarMonth {
    /// Returns `None` when `month` is outside 1-12 or the year is out of range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// Returns the month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Month after this one; saturates at the last supported month.
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(Self::from_date)
            .unwrap_or(*self)
    }

    /// Month before this one; saturates at the first supported month.
    pub fn previous(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(Self::from_date)
            .unwrap_or(*self)
    }

    /// Header text such as `March 2024`.
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    /// Day grid for this month with `today` highlighted.
    pub fn grid(&self, today: NaiveDate) -> Vec<DayCell> {
        generate_grid(self.first, today)
    }
}

impl Display for CalendarMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for CalendarMonth {
    type Err = MonthParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| MonthParseError(value.to_string()))?;
        if year.len() != 4 || month.len() != 2 {
            return Err(MonthParseError(value.to_string()));
        }
        let year = year
            .parse::<i32>()
            .map_err(|_| MonthParseError(value.to_string()))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| MonthParseError(value.to_string()))?;
        Self::new(year, month).ok_or_else(|| MonthParseError(value.to_string()))
    }
}
