//! Punch record model.
//!
//! This module defines [`PunchRecord`], one observed time-clock event as
//! returned by a row source, and the quarter-hour quantization the sources
//! apply to raw working-punch durations.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single time-clock punch.
///
/// Records are immutable once sourced. The hull identifier is the job name
/// and is empty for punches that were not booked against a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchRecord {
    /// First three characters of the department name.
    pub department_code: String,
    /// The job the punch was booked against, if any.
    pub job_id: Option<i64>,
    /// The hull (job name); empty when the punch has no job.
    pub hull: String,
    /// The employee identifier.
    pub employee_id: i64,
    /// The employee's last name.
    pub last_name: String,
    /// The employee's first name.
    pub first_name: String,
    /// When the employee punched in.
    pub punch_in: NaiveDateTime,
    /// The raw working-punch duration as a time of day.
    pub working_duration: Option<NaiveTime>,
    /// Hours worked, quantized to quarter hours by the source.
    pub work_time: Option<Decimal>,
    /// The working-punch identifier.
    pub working_punch_id: i64,
    /// The punch-direction (in/out) code.
    pub punch_direction: Option<i32>,
    /// The task (labor category) the punch was attributed to.
    pub task_name: String,
    /// The task identifier.
    pub task_id: Option<i64>,
}

impl PunchRecord {
    /// Returns the employee display name as `"last, first"`.
    ///
    /// # Example
    ///
    /// ```
    /// use labor_summary::models::PunchRecord;
    /// use chrono::NaiveDate;
    ///
    /// let punch = PunchRecord::new(
    ///     "5001",
    ///     "1 Boat Builder",
    ///     "Doe",
    ///     "Jane",
    ///     NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(7, 0, 0).unwrap(),
    ///     None,
    /// );
    /// assert_eq!(punch.employee_name(), "Doe, Jane");
    /// ```
    pub fn employee_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    /// Returns the department key the report groups by (the task name).
    pub fn department(&self) -> &str {
        &self.task_name
    }

    /// Returns the calendar date of the punch.
    pub fn punch_date(&self) -> NaiveDate {
        self.punch_in.date()
    }

    /// Returns the work time, treating a missing value as zero.
    pub fn quantity(&self) -> Decimal {
        self.work_time.unwrap_or(Decimal::ZERO)
    }

    /// Creates a record carrying only the fields the report reads.
    ///
    /// Identifiers default to zero or `None`; the department code is taken
    /// from the first three characters of the task name.
    pub fn new(
        hull: &str,
        task_name: &str,
        last_name: &str,
        first_name: &str,
        punch_in: NaiveDateTime,
        work_time: Option<Decimal>,
    ) -> Self {
        Self {
            department_code: task_name.chars().take(3).collect(),
            job_id: None,
            hull: hull.to_string(),
            employee_id: 0,
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            punch_in,
            working_duration: None,
            work_time,
            working_punch_id: 0,
            punch_direction: None,
            task_name: task_name.to_string(),
            task_id: None,
        }
    }
}

/// Quantizes a working-punch duration to decimal hours.
///
/// Durations are recorded as a time of day whose hour is the whole hours
/// worked. Minutes of 0, 15, 30 and 45 map to `.00`, `.25`, `.50` and `.75`;
/// any other minute value has no quarter-hour meaning and yields `None`.
///
/// # Example
///
/// ```
/// use labor_summary::models::quantize_work_time;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let duration = NaiveTime::from_hms_opt(7, 45, 0).unwrap();
/// assert_eq!(quantize_work_time(duration), Some(Decimal::new(775, 2)));
///
/// let odd = NaiveTime::from_hms_opt(7, 40, 0).unwrap();
/// assert_eq!(quantize_work_time(odd), None);
/// ```
pub fn quantize_work_time(duration: NaiveTime) -> Option<Decimal> {
    let fraction = match duration.minute() {
        0 => Decimal::ZERO,
        15 => Decimal::new(25, 2),
        30 => Decimal::new(5, 1),
        45 => Decimal::new(75, 2),
        _ => return None,
    };
    Some(Decimal::from(duration.hour()) + fraction)
}
