//! Report rendering.
//!
//! [`SheetPlan`] lays a labor summary out as worksheet cells and
//! [`XlsxRenderer`] writes that layout to an `.xlsx` workbook.

mod plan;
mod xlsx;

pub use plan::{Cell, CellStyle, CellValue, SheetPlan, TOTALS_LABEL, column_name};
pub use xlsx::XlsxRenderer;
