//! Worksheet layout.
//!
//! This module turns a [`LaborSummary`] into a [`SheetPlan`]: the list of
//! cells to write, with subtotal and total formulas already placed. Keeping
//! the layout as plain data lets it be checked without opening a workbook.

use rust_decimal::Decimal;

use crate::config::{EMPLOYEE_COLUMN, HOURS_COLUMN, HULL_COLUMN, ReportConfig, TASK_COLUMN};
use crate::models::{HullTotals, LaborSummary};

/// Title written in the first column of the totals row.
pub const TOTALS_LABEL: &str = "Totals";

/// The content of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Literal text.
    Text(String),
    /// A literal number.
    Number(Decimal),
    /// A spreadsheet formula, including the leading `=`.
    Formula(String),
}

/// How a cell is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStyle {
    /// Header row: bold title font.
    Header,
    /// Detail rows: body font.
    Body,
    /// Totals row: bold title font.
    Total,
}

/// One cell of the plan, addressed by zero-based row and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Zero-based row.
    pub row: u32,
    /// Zero-based column.
    pub col: u16,
    /// The cell content.
    pub value: CellValue,
    /// The cell style.
    pub style: CellStyle,
}

/// The complete layout of the report worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetPlan {
    /// Cells in the order they are written.
    pub cells: Vec<Cell>,
    /// Zero-based row of the totals row.
    pub totals_row: u32,
    /// Number of employee detail rows.
    pub detail_rows: usize,
}

/// Returns the spreadsheet column name for a zero-based column (`0` → `A`).
///
/// # Example
///
/// ```
/// use labor_summary::render::column_name;
///
/// assert_eq!(column_name(0), "A");
/// assert_eq!(column_name(9), "J");
/// assert_eq!(column_name(26), "AA");
/// ```
pub fn column_name(col: u16) -> String {
    let mut n = u32::from(col) + 1;
    let mut name = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        name.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    name.iter().rev().collect()
}

/// Returns an A1-style reference for zero-based coordinates.
fn cell_ref(row: u32, col: u16) -> String {
    format!("{}{}", column_name(col), row + 1)
}

fn sum_formula(col: u16, first_row: u32, last_row: u32) -> String {
    format!("=SUM({}:{})", cell_ref(first_row, col), cell_ref(last_row, col))
}

impl SheetPlan {
    /// Lays out `summary` using the columns in `config`.
    ///
    /// Hulls, departments and employees are written in ascending order with
    /// a blank row after each hull. Each department's subtotal formula sits
    /// in its summary column on the department's last employee row. The
    /// totals row sums the hours and summary columns over all detail rows and
    /// adds a grand total across the summary columns.
    pub fn build(summary: &LaborSummary, config: &ReportConfig) -> Self {
        let detail_rows: usize = summary.hulls.values().map(HullTotals::row_count).sum();
        let mut cells = Vec::with_capacity(config.columns.len() * (detail_rows + 2));

        for (col, column) in config.columns.iter().enumerate() {
            cells.push(Cell {
                row: 0,
                col: col as u16,
                value: CellValue::Text(column.title.clone()),
                style: CellStyle::Header,
            });
        }

        let mut row: u32 = 1;
        let mut last_detail_row = None;

        for (hull, hull_totals) in &summary.hulls {
            for (department, department_totals) in &hull_totals.departments {
                let first_row = row;
                for (employee, hours) in &department_totals.employees {
                    let body = |col, value| Cell {
                        row,
                        col,
                        value,
                        style: CellStyle::Body,
                    };
                    cells.push(body(EMPLOYEE_COLUMN, CellValue::Text(employee.clone())));
                    cells.push(body(HULL_COLUMN, CellValue::Text(hull.clone())));
                    cells.push(body(TASK_COLUMN, CellValue::Text(department.clone())));
                    cells.push(body(HOURS_COLUMN, CellValue::Number(*hours)));
                    last_detail_row = Some(row);
                    row += 1;
                }

                if row > first_row {
                    if let Some(col) = config.summary_column(department) {
                        let last_row = row - 1;
                        let subtotal = sum_formula(HOURS_COLUMN, first_row, last_row);
                        cells.push(Cell {
                            row: last_row,
                            col,
                            value: CellValue::Formula(subtotal),
                            style: CellStyle::Body,
                        });
                    }
                }
            }
            row += 1;
        }

        let totals_row = row;
        cells.push(Cell {
            row: totals_row,
            col: EMPLOYEE_COLUMN,
            value: CellValue::Text(TOTALS_LABEL.to_string()),
            style: CellStyle::Total,
        });

        let summary_cols: Vec<u16> = config.summary_columns().map(|(col, _)| col).collect();
        let total_value = |col: u16| match last_detail_row {
            Some(last) => CellValue::Formula(sum_formula(col, 1, last)),
            None => CellValue::Number(Decimal::ZERO),
        };

        for col in std::iter::once(HOURS_COLUMN).chain(summary_cols.iter().copied()) {
            cells.push(Cell {
                row: totals_row,
                col,
                value: total_value(col),
                style: CellStyle::Total,
            });
        }

        if let (Some(first), Some(last)) = (summary_cols.first(), summary_cols.last()) {
            let value = match last_detail_row {
                Some(_) => CellValue::Formula(format!(
                    "=SUM({}:{})",
                    cell_ref(totals_row, *first),
                    cell_ref(totals_row, *last)
                )),
                None => CellValue::Number(Decimal::ZERO),
            };
            cells.push(Cell {
                row: totals_row,
                col: config.grand_total_column(),
                value,
                style: CellStyle::Total,
            });
        }

        Self {
            cells,
            totals_row,
            detail_rows,
        }
    }

    /// Returns the cell at zero-based coordinates, if one is planned.
    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }

    /// Returns the value at an A1-style reference such as `"E4"`.
    pub fn value_at(&self, reference: &str) -> Option<&CellValue> {
        let split = reference.find(|c: char| c.is_ascii_digit())?;
        let (letters, digits) = reference.split_at(split);
        let row: u32 = digits.parse().ok()?;
        let col = letters.bytes().try_fold(0u32, |acc, b| {
            b.is_ascii_uppercase().then(|| acc * 26 + u32::from(b - b'A') + 1)
        })?;
        let cell = self.cell(row.checked_sub(1)?, u16::try_from(col.checked_sub(1)?).ok()?)?;
        Some(&cell.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn formula(s: &str) -> CellValue {
        CellValue::Formula(s.to_string())
    }

    fn sample_summary() -> LaborSummary {
        let mut summary = LaborSummary::default();
        summary.record("5002", "4 Paint", "Roe, K", dec("3"));
        summary.record("5001", "4 Paint", "Doe, J", dec("2.5"));
        summary.record("5001", "1 Boat Builder", "Roe, K", dec("7"));
        summary.record("5001", "1 Boat Builder", "Doe, J", dec("8"));
        summary.record("5001", "9 Admin", "Doe, J", dec("1.25"));
        summary
    }

    #[test]
    fn test_column_names() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(3), "D");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }

    #[test]
    fn test_header_row_uses_titles() {
        let plan = SheetPlan::build(&LaborSummary::default(), &ReportConfig::default());
        assert_eq!(plan.value_at("A1"), Some(&text("Employee Name")));
        assert_eq!(plan.value_at("D1"), Some(&text("Total Hours")));
        assert_eq!(plan.value_at("I1"), Some(&text("Outfitting")));
        assert_eq!(plan.cell(0, 0).unwrap().style, CellStyle::Header);
    }

    #[test]
    fn test_detail_rows_sorted_by_hull_department_employee() {
        let plan = SheetPlan::build(&sample_summary(), &ReportConfig::default());

        let rows: Vec<(CellValue, CellValue, CellValue)> = (2..=7)
            .filter_map(|r| {
                Some((
                    plan.value_at(&format!("A{}", r))?.clone(),
                    plan.value_at(&format!("B{}", r))?.clone(),
                    plan.value_at(&format!("C{}", r))?.clone(),
                ))
            })
            .collect();

        assert_eq!(
            rows,
            vec![
                (text("Doe, J"), text("5001"), text("1 Boat Builder")),
                (text("Roe, K"), text("5001"), text("1 Boat Builder")),
                (text("Doe, J"), text("5001"), text("4 Paint")),
                (text("Doe, J"), text("5001"), text("9 Admin")),
                (text("Roe, K"), text("5002"), text("4 Paint")),
            ]
        );
        assert_eq!(plan.detail_rows, 5);
    }

    #[test]
    fn test_blank_row_separates_hulls() {
        let plan = SheetPlan::build(&sample_summary(), &ReportConfig::default());
        // 5001 occupies rows 2-5, row 6 is blank, 5002 starts on row 7.
        assert!(plan.value_at("A6").is_none());
        assert_eq!(plan.value_at("B7"), Some(&text("5002")));
    }

    #[test]
    fn test_hours_written_as_numbers() {
        let plan = SheetPlan::build(&sample_summary(), &ReportConfig::default());
        assert_eq!(plan.value_at("D2"), Some(&CellValue::Number(dec("8"))));
        assert_eq!(plan.value_at("D4"), Some(&CellValue::Number(dec("2.5"))));
    }

    #[test]
    fn test_department_subtotal_on_last_row_of_block() {
        let plan = SheetPlan::build(&sample_summary(), &ReportConfig::default());

        // Boat Builder rows 2-3 → Fab column E on row 3.
        assert_eq!(plan.value_at("E3"), Some(&formula("=SUM(D2:D3)")));
        assert!(plan.value_at("E2").is_none());
        // Paint row 4 → Paint column F.
        assert_eq!(plan.value_at("F4"), Some(&formula("=SUM(D4:D4)")));
        // Hull 5002 Paint row 7.
        assert_eq!(plan.value_at("F7"), Some(&formula("=SUM(D7:D7)")));
    }

    #[test]
    fn test_unmapped_department_gets_no_subtotal() {
        let plan = SheetPlan::build(&sample_summary(), &ReportConfig::default());
        for col in ["E", "F", "G", "H", "I"] {
            assert!(plan.value_at(&format!("{}5", col)).is_none());
        }
    }

    #[test]
    fn test_outfitting_subtotals_follow_sorted_blocks() {
        let mut summary = LaborSummary::default();
        summary.record("5001", "5 Outfitting - Floorboard", "Doe, J", dec("2"));
        summary.record("5001", "5 Outfitting", "Doe, J", dec("3"));
        summary.record("5001", "5 Outfitting", "Roe, K", dec("4"));

        let plan = SheetPlan::build(&summary, &ReportConfig::default());
        // "5 Outfitting" sorts first: rows 2-3 → Outfitting column I.
        assert_eq!(plan.value_at("C2"), Some(&text("5 Outfitting")));
        assert_eq!(plan.value_at("I3"), Some(&formula("=SUM(D2:D3)")));
        // Floorboard row 4 → Floor Boards column H.
        assert_eq!(plan.value_at("H4"), Some(&formula("=SUM(D4:D4)")));
    }

    #[test]
    fn test_totals_row_sums_all_detail_rows() {
        let plan = SheetPlan::build(&sample_summary(), &ReportConfig::default());

        // Last detail row is 7, blank row 8, totals on row 9.
        assert_eq!(plan.totals_row, 8);
        assert_eq!(plan.value_at("A9"), Some(&text("Totals")));
        assert_eq!(plan.value_at("D9"), Some(&formula("=SUM(D2:D7)")));
        assert_eq!(plan.value_at("E9"), Some(&formula("=SUM(E2:E7)")));
        assert_eq!(plan.value_at("I9"), Some(&formula("=SUM(I2:I7)")));
        assert_eq!(plan.value_at("J9"), Some(&formula("=SUM(E9:I9)")));
        assert_eq!(plan.cell(8, 9).unwrap().style, CellStyle::Total);
    }

    #[test]
    fn test_empty_summary_writes_zero_totals() {
        let plan = SheetPlan::build(&LaborSummary::default(), &ReportConfig::default());
        assert_eq!(plan.totals_row, 1);
        assert_eq!(plan.detail_rows, 0);
        assert_eq!(plan.value_at("A2"), Some(&text("Totals")));
        assert_eq!(plan.value_at("D2"), Some(&CellValue::Number(Decimal::ZERO)));
        assert_eq!(plan.value_at("J2"), Some(&CellValue::Number(Decimal::ZERO)));
    }

    #[test]
    fn test_value_at_rejects_bad_references() {
        let plan = SheetPlan::build(&LaborSummary::default(), &ReportConfig::default());
        assert!(plan.value_at("A0").is_none());
        assert!(plan.value_at("1A").is_none());
        assert!(plan.value_at("a1").is_none());
        assert!(plan.value_at("").is_none());
    }
}
