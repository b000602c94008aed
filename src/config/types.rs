//! Configuration types for the labor summary report.
//!
//! This module contains the strongly-typed report configuration that is
//! deserialized from YAML, together with the built-in default layout.

use serde::{Deserialize, Serialize};

/// Worksheet column holding the employee display name.
pub const EMPLOYEE_COLUMN: u16 = 0;
/// Worksheet column holding the hull (job name).
pub const HULL_COLUMN: u16 = 1;
/// Worksheet column holding the department (task name).
pub const TASK_COLUMN: u16 = 2;
/// Worksheet column holding each employee's hours.
pub const HOURS_COLUMN: u16 = 3;
/// Number of detail columns before the department summary columns.
pub const DETAIL_COLUMN_COUNT: usize = 4;

/// One worksheet column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// The title written in the header row.
    pub title: String,
    /// The column width in character units.
    pub width: f64,
    /// The Excel number format applied to values in this column.
    #[serde(default = "default_number_format")]
    pub number_format: String,
    /// The task name whose subtotal this column carries, for summary columns.
    #[serde(default)]
    pub task: Option<String>,
}

impl ColumnSpec {
    fn detail(title: &str, width: f64, number_format: &str) -> Self {
        Self {
            title: title.to_string(),
            width,
            number_format: number_format.to_string(),
            task: None,
        }
    }

    fn summary(title: &str, task: &str) -> Self {
        Self {
            title: title.to_string(),
            width: 12.0,
            number_format: HOURS_FORMAT.to_string(),
            task: Some(task.to_string()),
        }
    }
}

const HOURS_FORMAT: &str = "0.00";

fn default_number_format() -> String {
    "General".to_string()
}

fn default_font_name() -> String {
    "Calibri".to_string()
}

fn default_font_size() -> f64 {
    11.0
}

fn default_lookback_days() -> u32 {
    365
}

fn default_file_stem() -> String {
    "labor-summary".to_string()
}

fn default_grand_total_width() -> f64 {
    12.0
}

/// The report layout and query settings.
///
/// A `ReportConfig` is immutable once loaded and is passed explicitly to the
/// renderer and the row sources.
///
/// # Example
///
/// ```
/// use labor_summary::config::ReportConfig;
///
/// let config = ReportConfig::default();
/// assert_eq!(config.columns[0].title, "Employee Name");
/// assert_eq!(config.summary_column("4 Paint"), Some(5));
/// assert_eq!(config.summary_column("9 Shipping"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Font family for every cell.
    #[serde(default = "default_font_name")]
    pub font_name: String,
    /// Font size for every cell.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Days of history queried before the first of the report month.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Stem of the default output file name.
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
    /// Width of the grand-total column beside the summary columns.
    #[serde(default = "default_grand_total_width")]
    pub grand_total_width: f64,
    /// Worksheet columns, detail columns first.
    pub columns: Vec<ColumnSpec>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            font_name: default_font_name(),
            font_size: default_font_size(),
            lookback_days: default_lookback_days(),
            file_stem: default_file_stem(),
            grand_total_width: default_grand_total_width(),
            columns: vec![
                ColumnSpec::detail("Employee Name", 26.0, "General"),
                ColumnSpec::detail("Job Name", 11.0, "General"),
                ColumnSpec::detail("Task Name", 24.0, "General"),
                ColumnSpec::detail("Total Hours", 12.0, HOURS_FORMAT),
                ColumnSpec::summary("Fab", "1 Boat Builder"),
                ColumnSpec::summary("Paint", "4 Paint"),
                ColumnSpec::summary("Canvas", "2 Canvas and Upholstery"),
                ColumnSpec::summary("Floor Boards", "5 Outfitting - Floorboard"),
                ColumnSpec::summary("Outfitting", "5 Outfitting"),
            ],
        }
    }
}

impl ReportConfig {
    /// Returns the worksheet column carrying the subtotal for `task`.
    pub fn summary_column(&self, task: &str) -> Option<u16> {
        self.columns
            .iter()
            .position(|column| column.task.as_deref() == Some(task))
            .and_then(|index| u16::try_from(index).ok())
    }

    /// Returns the summary columns with their worksheet column numbers.
    pub fn summary_columns(&self) -> impl Iterator<Item = (u16, &ColumnSpec)> {
        self.columns
            .iter()
            .enumerate()
            .skip(DETAIL_COLUMN_COUNT)
            .filter_map(|(index, column)| u16::try_from(index).ok().map(|c| (c, column)))
    }

    /// Returns the task names that have a summary column, in column order.
    pub fn tasks(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter_map(|column| column.task.clone())
            .collect()
    }

    /// Returns the worksheet column holding the grand total.
    pub fn grand_total_column(&self) -> u16 {
        u16::try_from(self.columns.len()).unwrap_or(u16::MAX)
    }

    /// Returns the number format for values in `column`.
    pub fn number_format(&self, column: u16) -> &str {
        self.columns
            .get(usize::from(column))
            .map(|spec| spec.number_format.as_str())
            .unwrap_or(HOURS_FORMAT)
    }
}
