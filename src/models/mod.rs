//! Core data models for the labor summary report.
//!
//! This module contains the punch records read from a row source, the report
//! period, and the nested aggregate handed to the renderer.

mod period;
mod punch;
mod summary;

pub use period::{DateRange, ReportPeriod};
pub use punch::{PunchRecord, quantize_work_time};
pub use summary::{DepartmentTotals, HullTotals, LaborSummary};
