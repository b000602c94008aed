//! Calculation logic for the labor summary report.
//!
//! This module contains hull selection for a target month and the time
//! aggregation that folds punch records into per-hull, per-department and
//! per-employee totals.

mod hull_filter;
mod time_aggregator;

pub use hull_filter::{HullSet, PRODUCTION_HULL_CEILING, is_production_hull, select_hulls};
pub use time_aggregator::{CORRECTION_SENTINEL, build_time, signed_quantity};
