//! Command-line surface of the `labor-summary` binary.
//!
//! Every option can also be supplied through the environment (or a `.env`
//! file loaded by the binary), matching the variable names the time-clock
//! deployment already uses.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser};
use tracing::info;

use crate::calculation::{build_time, select_hulls};
use crate::config::{ConfigLoader, ReportConfig};
use crate::error::{LaborError, LaborResult};
use crate::models::{DateRange, LaborSummary, ReportPeriod};
use crate::render::XlsxRenderer;
use crate::source::{CsvRowSource, RowSource, SqliteRowSource};

/// Create the monthly labor summary spreadsheet.
///
/// Reads punches for the month before today (or `--month`/`--year`), totals
/// hours per hull, department and employee, and writes an `.xlsx` report.
#[derive(Parser, Debug, Clone)]
#[command(name = "labor-summary", version, about, long_about = None)]
pub struct Cli {
    /// SQLite mirror of the time-clock database.
    #[arg(short, long, env = "DATABASE")]
    pub database: Option<PathBuf>,

    /// CSV export of the punch query; takes precedence over --database.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Directory to save the report in.
    #[arg(short = 'o', long, env = "PATH_DIR")]
    pub path: Option<PathBuf>,

    /// Output file, overriding --path and the default file name.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// YAML report configuration.
    #[arg(short, long, env = "LABOR_SUMMARY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report month (1-12); defaults to last month.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12), requires = "year")]
    pub month: Option<u32>,

    /// Report year; defaults to last month's year.
    #[arg(long, requires = "month")]
    pub year: Option<i32>,

    /// First day of the punch query (YYYY-MM-DD).
    #[arg(long, requires = "finish")]
    pub start: Option<NaiveDate>,

    /// Last day of the punch query (YYYY-MM-DD).
    #[arg(long, requires = "start")]
    pub finish: Option<NaiveDate>,

    /// Also print the aggregate as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The month the report covers.
    pub period: ReportPeriod,
    /// Where the workbook was written.
    pub output: PathBuf,
    /// The aggregate that was rendered.
    pub summary: LaborSummary,
}

impl Cli {
    /// Returns the report period, defaulting to the month before `today`.
    pub fn period(&self, today: NaiveDate) -> LaborResult<ReportPeriod> {
        match (self.month, self.year) {
            (Some(month), Some(year)) => ReportPeriod::new(month, year),
            _ => Ok(ReportPeriod::prior_to(today)),
        }
    }

    /// Returns the punch query range.
    pub fn range(&self, period: ReportPeriod, config: &ReportConfig) -> LaborResult<DateRange> {
        match (self.start, self.finish) {
            (Some(start), Some(finish)) if start > finish => {
                Err(LaborError::InvalidRange { start, finish })
            }
            (Some(start), Some(finish)) => Ok(DateRange::from_dates(start, finish)),
            _ => period.query_range(config.lookback_days),
        }
    }

    /// Returns where the workbook is written.
    pub fn output_path(&self, period: ReportPeriod, config: &ReportConfig) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            self.path
                .clone()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(format!("{}-{}.xlsx", config.file_stem, period))
        })
    }

    /// Loads the report configuration, or the built-in layout when none is given.
    pub fn report_config(&self) -> LaborResult<ReportConfig> {
        match &self.config {
            Some(path) => Ok(ConfigLoader::load(path)?.into_config()),
            None => Ok(ReportConfig::default()),
        }
    }

    fn row_source(&self, config: &ReportConfig) -> LaborResult<Box<dyn RowSource>> {
        if let Some(path) = &self.csv {
            return Ok(Box::new(CsvRowSource::new(path)));
        }
        match &self.database {
            Some(path) => Ok(Box::new(SqliteRowSource::open(path, config.tasks())?)),
            None => Err(LaborError::NoRowSource),
        }
    }
}

/// Runs one report: fetch, select hulls, aggregate, render.
pub fn run(cli: &Cli, today: NaiveDate) -> LaborResult<RunOutcome> {
    let config = cli.report_config()?;
    let period = cli.period(today)?;
    let range = cli.range(period, &config)?;
    info!(%period, start = %range.start, finish = %range.finish, "building labor summary");

    let records = cli.row_source(&config)?.fetch(&range)?;
    let hulls = select_hulls(&records, period);
    let summary = build_time(&records, &hulls);
    info!(hulls = hulls.len(), total = %summary.total, "aggregated punches");

    let output = cli.output_path(period, &config);
    XlsxRenderer::new(&config)
        .sheet_name(period.label())
        .render_to_file(&summary, &output)?;

    Ok(RunOutcome {
        period,
        output,
        summary,
    })
}
