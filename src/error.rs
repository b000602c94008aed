//! Error types for the labor summary report.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure a report run can hit. The aggregation core itself never
//! fails; errors come from configuration, the row sources and the renderer.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the labor summary report.
///
/// # Example
///
/// ```
/// use labor_summary::error::LaborError;
///
/// let error = LaborError::ConfigNotFound {
///     path: "/missing/labor_summary.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/labor_summary.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum LaborError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but describes an unusable report layout.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What made the configuration unusable.
        message: String,
    },

    /// The time-clock database could not be opened or queried.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A CSV export could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A punch record could not be interpreted.
    #[error("Invalid punch record at line {line}: {message}")]
    InvalidRecord {
        /// The 1-based line or row number of the record.
        line: u64,
        /// A description of what made the record invalid.
        message: String,
    },

    /// A month/year pair does not name a calendar month.
    #[error("Invalid report period: month {month}, year {year}")]
    InvalidPeriod {
        /// The requested month.
        month: u32,
        /// The requested year.
        year: i32,
    },

    /// A query range ends before it starts.
    #[error("Invalid query range: {start} is after {finish}")]
    InvalidRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested finish date.
        finish: NaiveDate,
    },

    /// A lookback reaches past the earliest representable date.
    #[error("Invalid lookback: {lookback_days} days before the report month")]
    InvalidLookback {
        /// The configured lookback in days.
        lookback_days: u32,
    },

    /// Neither a database nor a CSV export was given to read punches from.
    #[error("No row source configured: pass --database or --csv")]
    NoRowSource,

    /// The spreadsheet could not be assembled or saved.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// A filesystem operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A type alias for Results that return LaborError.
pub type LaborResult<T> = Result<T, LaborError>;
