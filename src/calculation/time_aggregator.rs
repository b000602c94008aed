//! Time aggregation.
//!
//! This module folds punch records into the hull → department → employee
//! [`LaborSummary`] that the report renders.

use rust_decimal::Decimal;

use crate::models::{LaborSummary, PunchRecord};

use super::hull_filter::HullSet;

/// Work time value the time clock uses to mark a correction entry.
///
/// A correction is indistinguishable from a genuine one-hour punch; the
/// quarter-hour rounding upstream is trusted never to produce one.
pub const CORRECTION_SENTINEL: Decimal = Decimal::ONE;

/// Returns the amount a punch contributes to the totals.
///
/// A quantity exactly equal to [`CORRECTION_SENTINEL`] is a reversal and is
/// negated; every other quantity, including zero, counts as given.
///
/// # Example
///
/// ```
/// use labor_summary::calculation::signed_quantity;
/// use rust_decimal::Decimal;
///
/// assert_eq!(signed_quantity(Decimal::ONE), Decimal::NEGATIVE_ONE);
/// assert_eq!(signed_quantity(Decimal::new(125, 2)), Decimal::new(125, 2));
/// ```
pub fn signed_quantity(quantity: Decimal) -> Decimal {
    if quantity == CORRECTION_SENTINEL {
        -quantity
    } else {
        quantity
    }
}

/// Builds the labor summary for the hulls in `hulls`.
///
/// Records are processed in input order. Records whose hull is not in
/// `hulls` are skipped without re-checking the selection rule, so no hull
/// outside the set ever appears in the result. Missing work time counts as
/// zero.
///
/// # Example
///
/// ```
/// use labor_summary::calculation::{build_time, select_hulls};
/// use labor_summary::models::{PunchRecord, ReportPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let at = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap().and_hms_opt(7, 0, 0).unwrap();
/// let records = vec![
///     PunchRecord::new("5001", "Fab", "Doe", "J", at(5), Some(Decimal::new(8, 0))),
///     PunchRecord::new("5001", "Fab", "Doe", "J", at(6), Some(Decimal::ONE)),
/// ];
///
/// let hulls = select_hulls(&records, ReportPeriod::new(3, 2024).unwrap());
/// let summary = build_time(&records, &hulls);
///
/// assert_eq!(summary.total, Decimal::new(7, 0));
/// assert_eq!(summary.employee_hours("5001", "Fab", "Doe, J"), Some(Decimal::new(7, 0)));
/// ```
pub fn build_time(records: &[PunchRecord], hulls: &HullSet) -> LaborSummary {
    let mut summary = LaborSummary::default();

    for record in records {
        if !hulls.contains(&record.hull) {
            continue;
        }
        summary.record(
            &record.hull,
            record.department(),
            &record.employee_name(),
            signed_quantity(record.quantity()),
        );
    }

    summary
}
