//! Labor summary aggregate.
//!
//! This module contains the nested totals produced by the time aggregator:
//! a [`LaborSummary`] owns one [`HullTotals`] per hull, each owning one
//! [`DepartmentTotals`] per department, each owning employee hours.
//! All maps are ordered so that the renderer can iterate them sorted.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hours recorded against one department on one hull.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentTotals {
    /// Sum of the employee hours below.
    pub total: Decimal,
    /// Hours per employee display name.
    pub employees: BTreeMap<String, Decimal>,
}

impl DepartmentTotals {
    /// Returns the number of employees with hours in this department.
    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }
}

/// Hours recorded against one hull.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HullTotals {
    /// Sum of the department totals below.
    pub total: Decimal,
    /// Totals per department (task name).
    pub departments: BTreeMap<String, DepartmentTotals>,
}

impl HullTotals {
    /// Returns the number of (department, employee) rows this hull renders.
    pub fn row_count(&self) -> usize {
        self.departments
            .values()
            .map(DepartmentTotals::employee_count)
            .sum()
    }
}

/// The complete hull → department → employee aggregate.
///
/// Every `total` equals the sum of its children after each call to
/// [`LaborSummary::record`].
///
/// # Example
///
/// ```
/// use labor_summary::models::LaborSummary;
/// use rust_decimal::Decimal;
///
/// let mut summary = LaborSummary::default();
/// summary.record("5001", "1 Boat Builder", "Doe, J", Decimal::new(8, 0));
/// summary.record("5001", "1 Boat Builder", "Doe, J", Decimal::new(-1, 0));
///
/// assert_eq!(summary.total, Decimal::new(7, 0));
/// assert_eq!(summary.hulls["5001"].total, Decimal::new(7, 0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborSummary {
    /// Sum of all hull totals.
    pub total: Decimal,
    /// Totals per hull identifier.
    pub hulls: BTreeMap<String, HullTotals>,
}

impl LaborSummary {
    /// Adds `amount` to the employee, department, hull and global totals.
    ///
    /// Entries are created (zeroed) the first time they are seen. `amount`
    /// is applied as given; sign handling is the caller's concern.
    pub fn record(&mut self, hull: &str, department: &str, employee: &str, amount: Decimal) {
        let hull_totals = self.hulls.entry(hull.to_string()).or_default();
        let department_totals = hull_totals
            .departments
            .entry(department.to_string())
            .or_default();
        let hours = department_totals
            .employees
            .entry(employee.to_string())
            .or_default();

        *hours += amount;
        department_totals.total += amount;
        hull_totals.total += amount;
        self.total += amount;
    }

    /// Returns the hours recorded for one employee, if any.
    pub fn employee_hours(&self, hull: &str, department: &str, employee: &str) -> Option<Decimal> {
        self.hulls
            .get(hull)?
            .departments
            .get(department)?
            .employees
            .get(employee)
            .copied()
    }

    /// Returns true when no hull has been recorded.
    pub fn is_empty(&self) -> bool {
        self.hulls.is_empty()
    }

    /// Checks that every total equals the sum of its children.
    pub fn is_consistent(&self) -> bool {
        let hulls_sum: Decimal = self.hulls.values().map(|h| h.total).sum();
        hulls_sum == self.total
            && self.hulls.values().all(|hull| {
                let departments_sum: Decimal = hull.departments.values().map(|d| d.total).sum();
                departments_sum == hull.total
                    && hull
                        .departments
                        .values()
                        .all(|dept| dept.employees.values().copied().sum::<Decimal>() == dept.total)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_record_creates_nested_entries() {
        let mut summary = LaborSummary::default();
        summary.record("5001", "4 Paint", "Doe, J", dec("2.5"));

        assert_eq!(summary.total, dec("2.5"));
        assert_eq!(summary.hulls["5001"].total, dec("2.5"));
        assert_eq!(summary.hulls["5001"].departments["4 Paint"].total, dec("2.5"));
        assert_eq!(
            summary.employee_hours("5001", "4 Paint", "Doe, J"),
            Some(dec("2.5"))
        );
    }

    #[test]
    fn test_record_accumulates_across_levels() {
        let mut summary = LaborSummary::default();
        summary.record("5001", "4 Paint", "Doe, J", dec("2"));
        summary.record("5001", "4 Paint", "Roe, K", dec("3"));
        summary.record("5001", "1 Boat Builder", "Doe, J", dec("4"));
        summary.record("5002", "4 Paint", "Doe, J", dec("1.25"));

        assert_eq!(summary.total, dec("10.25"));
        assert_eq!(summary.hulls["5001"].total, dec("9"));
        assert_eq!(summary.hulls["5001"].departments["4 Paint"].total, dec("5"));
        assert_eq!(summary.hulls["5002"].total, dec("1.25"));
        assert!(summary.is_consistent());
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut summary = LaborSummary::default();
        summary.record("5010", "4 Paint", "Zed, A", dec("1"));
        summary.record("5002", "4 Paint", "Abe, B", dec("1"));
        summary.record("5002", "1 Boat Builder", "Moe, C", dec("1"));

        let hulls: Vec<&str> = summary.hulls.keys().map(String::as_str).collect();
        assert_eq!(hulls, vec!["5002", "5010"]);

        let departments: Vec<&str> = summary.hulls["5002"]
            .departments
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(departments, vec!["1 Boat Builder", "4 Paint"]);
    }

    #[test]
    fn test_row_count_counts_department_employee_pairs() {
        let mut summary = LaborSummary::default();
        summary.record("5001", "4 Paint", "Doe, J", dec("1"));
        summary.record("5001", "4 Paint", "Doe, J", dec("1"));
        summary.record("5001", "4 Paint", "Roe, K", dec("1"));
        summary.record("5001", "1 Boat Builder", "Doe, J", dec("1"));

        assert_eq!(summary.hulls["5001"].row_count(), 3);
    }

    #[test]
    fn test_employee_hours_missing_is_none() {
        let summary = LaborSummary::default();
        assert!(summary.is_empty());
        assert_eq!(summary.employee_hours("5001", "4 Paint", "Doe, J"), None);
    }

    #[test]
    fn test_is_consistent_detects_tampering() {
        let mut summary = LaborSummary::default();
        summary.record("5001", "4 Paint", "Doe, J", dec("1"));
        summary.total = dec("2");
        assert!(!summary.is_consistent());
    }

    #[test]
    fn test_summary_serializes_decimals_as_strings() {
        let mut summary = LaborSummary::default();
        summary.record("5001", "4 Paint", "Doe, J", dec("7.75"));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total"], "7.75");
        assert_eq!(json["hulls"]["5001"]["departments"]["4 Paint"]["employees"]["Doe, J"], "7.75");
    }
}
