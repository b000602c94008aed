//! XLSX output.
//!
//! Writes a [`SheetPlan`] to a workbook with `rust_xlsxwriter`. The workbook
//! is assembled in memory and saved once, so a failed run leaves no file.

use std::fs;
use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::info;

use crate::config::ReportConfig;
use crate::error::LaborResult;
use crate::models::LaborSummary;

use super::plan::{Cell, CellStyle, CellValue, SheetPlan};

/// Renders labor summaries as XLSX workbooks.
///
/// # Example
///
/// ```no_run
/// use labor_summary::config::ReportConfig;
/// use labor_summary::models::LaborSummary;
/// use labor_summary::render::XlsxRenderer;
///
/// let config = ReportConfig::default();
/// let renderer = XlsxRenderer::new(&config).sheet_name("March 2024");
/// renderer.render_to_file(&LaborSummary::default(), "labor-summary-2024-03.xlsx")?;
/// # Ok::<(), labor_summary::error::LaborError>(())
/// ```
#[derive(Debug, Clone)]
pub struct XlsxRenderer<'a> {
    config: &'a ReportConfig,
    sheet_name: Option<String>,
}

impl<'a> XlsxRenderer<'a> {
    /// Creates a renderer using the layout in `config`.
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            config,
            sheet_name: None,
        }
    }

    /// Sets the worksheet name.
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }

    /// Renders `summary` and returns the workbook bytes.
    pub fn render_to_buffer(&self, summary: &LaborSummary) -> LaborResult<Vec<u8>> {
        let mut workbook = self.build_workbook(summary)?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Renders `summary` and saves it at `path`, creating parent directories.
    pub fn render_to_file<P: AsRef<Path>>(
        &self,
        summary: &LaborSummary,
        path: P,
    ) -> LaborResult<()> {
        let path = path.as_ref();
        let mut workbook = self.build_workbook(summary)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        workbook.save(path)?;

        info!(path = %path.display(), hulls = summary.hulls.len(), "wrote labor summary");
        Ok(())
    }

    fn build_workbook(&self, summary: &LaborSummary) -> LaborResult<Workbook> {
        let plan = SheetPlan::build(summary, self.config);
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();

        if let Some(name) = &self.sheet_name {
            sheet.set_name(name)?;
        }

        for (col, column) in self.config.columns.iter().enumerate() {
            sheet.set_column_width(col as u16, column.width)?;
        }
        sheet.set_column_width(self.config.grand_total_column(), self.config.grand_total_width)?;

        for cell in &plan.cells {
            self.write_cell(sheet, cell)?;
        }

        Ok(workbook)
    }

    fn write_cell(&self, sheet: &mut Worksheet, cell: &Cell) -> LaborResult<()> {
        let format = self.format_for(cell);
        match &cell.value {
            CellValue::Text(text) => {
                sheet.write_string_with_format(cell.row, cell.col, text.as_str(), &format)?;
            }
            CellValue::Number(number) => {
                let value = number.to_f64().unwrap_or_default();
                sheet.write_number_with_format(cell.row, cell.col, value, &format)?;
            }
            CellValue::Formula(formula) => {
                sheet.write_formula_with_format(cell.row, cell.col, formula.as_str(), &format)?;
            }
        }
        Ok(())
    }

    fn format_for(&self, cell: &Cell) -> Format {
        let mut format = Format::new()
            .set_font_name(self.config.font_name.as_str())
            .set_font_size(self.config.font_size);

        if matches!(cell.style, CellStyle::Header | CellStyle::Total) {
            format = format.set_bold();
        }
        if !matches!(cell.value, CellValue::Text(_)) {
            format = format.set_num_format(self.config.number_format(cell.col));
        }
        format
    }
}
