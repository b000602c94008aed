//! Report period and query range models.
//!
//! This module contains the [`ReportPeriod`] (the month a report covers) and
//! the [`DateRange`] handed to a row source.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{LaborError, LaborResult};

/// Earliest year a report period may name.
const MIN_YEAR: i32 = 1900;

/// Latest year a report period may name.
const MAX_YEAR: i32 = 9999;

/// The calendar month a report covers.
///
/// # Example
///
/// ```
/// use labor_summary::models::ReportPeriod;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
/// let period = ReportPeriod::prior_to(today);
/// assert_eq!(period.month(), 3);
/// assert_eq!(period.year(), 2024);
/// assert_eq!(period.label(), "March 2024");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReportPeriod {
    first_day: NaiveDate,
}

impl ReportPeriod {
    /// Creates a period for the given month (1-12) and year.
    pub fn new(month: u32, year: i32) -> LaborResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(LaborError::InvalidPeriod { month, year });
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or(LaborError::InvalidPeriod { month, year })
    }

    /// Returns the calendar month before the one containing `today`.
    pub fn prior_to(today: NaiveDate) -> Self {
        let first_of_month = today - Days::new(u64::from(today.day0()));
        Self {
            first_day: first_of_month - Months::new(1),
        }
    }

    /// Returns the month number (1-12).
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// Returns the first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Returns the last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.first_day + Months::new(1) - Days::new(1)
    }

    /// Checks whether `date` falls in this month and year.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month() == self.month() && date.year() == self.year()
    }

    /// Returns a display label such as `"March 2024"`.
    pub fn label(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }

    /// Returns the query range for this period.
    ///
    /// The range runs from `lookback_days` before the first of the month at
    /// midnight to the last second of the month's final day, so that in-scope
    /// hulls carry their earlier history into the report.
    ///
    /// Fails with [`LaborError::InvalidLookback`] when the lookback reaches
    /// past the earliest representable date.
    pub fn query_range(&self, lookback_days: u32) -> LaborResult<DateRange> {
        let start = self
            .first_day
            .checked_sub_days(Days::new(u64::from(lookback_days)))
            .ok_or(LaborError::InvalidLookback { lookback_days })?;
        Ok(DateRange::from_dates(start, self.last_day()))
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// An inclusive, second-precision timestamp range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// The first instant of the range (inclusive).
    pub start: NaiveDateTime,
    /// The last instant of the range (inclusive).
    pub finish: NaiveDateTime,
}

impl DateRange {
    /// Creates a range from midnight on `start` to `23:59:59` on `finish`.
    pub fn from_dates(start: NaiveDate, finish: NaiveDate) -> Self {
        Self {
            start: start.and_time(NaiveTime::MIN),
            finish: end_of_day(finish),
        }
    }

    /// Checks whether `instant` falls within the range (inclusive).
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.finish
    }
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN))
}
