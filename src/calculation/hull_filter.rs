//! Hull selection.
//!
//! This module decides which hulls appear in a monthly report: those with
//! punch activity in the target month whose identifier marks them as a
//! production hull.

use std::collections::BTreeSet;

use crate::models::{PunchRecord, ReportPeriod};

/// Production hull identifiers sort strictly before this character.
///
/// Identifiers starting at or above it are internal and administrative job
/// codes. The rule compares characters, not hull numbers.
pub const PRODUCTION_HULL_CEILING: char = '6';

/// The set of hulls a report covers.
pub type HullSet = BTreeSet<String>;

/// Checks whether a hull identifier names a production hull.
///
/// Empty identifiers denote non-hull work and never qualify.
///
/// # Example
///
/// ```
/// use labor_summary::calculation::is_production_hull;
///
/// assert!(is_production_hull("5999"));
/// assert!(!is_production_hull("6100"));
/// assert!(!is_production_hull("7001"));
/// assert!(!is_production_hull(""));
/// ```
pub fn is_production_hull(hull: &str) -> bool {
    hull.chars()
        .next()
        .is_some_and(|first| first < PRODUCTION_HULL_CEILING)
}

/// Selects the distinct production hulls with a punch in `period`.
///
/// The decision is made per record: a hull qualifies only through a record
/// dated in the target month and year, regardless of any activity it has in
/// other months.
///
/// # Example
///
/// ```
/// use labor_summary::calculation::select_hulls;
/// use labor_summary::models::{PunchRecord, ReportPeriod};
/// use chrono::NaiveDate;
///
/// let at = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(7, 0, 0).unwrap();
/// let records = vec![
///     PunchRecord::new("5001", "4 Paint", "Doe", "J", at(2024, 3, 5), None),
///     PunchRecord::new("5002", "4 Paint", "Doe", "J", at(2024, 2, 5), None),
/// ];
///
/// let hulls = select_hulls(&records, ReportPeriod::new(3, 2024).unwrap());
/// assert_eq!(hulls.into_iter().collect::<Vec<_>>(), vec!["5001".to_string()]);
/// ```
pub fn select_hulls(records: &[PunchRecord], period: ReportPeriod) -> HullSet {
    records
        .iter()
        .filter(|record| period.contains(record.punch_date()) && is_production_hull(&record.hull))
        .map(|record| record.hull.clone())
        .collect()
}
