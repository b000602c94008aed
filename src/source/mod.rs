//! Row sources for punch records.
//!
//! A row source answers one question: which punches fall in a date range.
//! The calculation code only sees the [`RowSource`] trait, so backends can be
//! swapped without touching it.

mod csv_export;
mod sqlite;

pub use csv_export::CsvRowSource;
pub use sqlite::{SCHEMA, SqliteRowSource, init_schema};

use crate::error::LaborResult;
use crate::models::{DateRange, PunchRecord};

/// A supplier of punch records.
pub trait RowSource {
    /// Returns the punches whose punch-in time falls within `range`
    /// (inclusive), in source order.
    fn fetch(&self, range: &DateRange) -> LaborResult<Vec<PunchRecord>>;
}
