//! Configuration loading and management for the labor summary report.
//!
//! This module provides the immutable [`ReportConfig`] that describes the
//! worksheet layout (column titles, widths, number formats and the mapping of
//! task names to summary columns) and the query lookback, plus the
//! [`ConfigLoader`] that reads an override from YAML.
//!
//! # Example
//!
//! ```no_run
//! use labor_summary::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/labor_summary.yaml").unwrap();
//! println!("Font: {}", config.config().font_name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ColumnSpec, DETAIL_COLUMN_COUNT, EMPLOYEE_COLUMN, HOURS_COLUMN, HULL_COLUMN, ReportConfig,
    TASK_COLUMN,
};
