//! CSV exports of the punch query.
//!
//! Column headers follow the punch query's column names. Only the hull,
//! name, punch-in and task columns are required; the rest may be omitted.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{LaborError, LaborResult};
use crate::models::{DateRange, PunchRecord, quantize_work_time};

use super::RowSource;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Debug, Deserialize)]
struct CsvPunchRow {
    #[serde(rename = "departmentname", default)]
    department_code: String,
    #[serde(default)]
    job_id: Option<i64>,
    #[serde(rename = "jobName")]
    hull: Option<String>,
    #[serde(default)]
    employee_id: Option<i64>,
    #[serde(rename = "lastname")]
    last_name: String,
    #[serde(rename = "firstname")]
    first_name: String,
    inpunch_dt: String,
    #[serde(default)]
    workingpunch_ts: Option<String>,
    #[serde(rename = "WorkTime", default)]
    work_time: Option<Decimal>,
    #[serde(default)]
    workingpunch_id: Option<i64>,
    #[serde(default)]
    inout_id: Option<i32>,
    #[serde(rename = "taskname")]
    task_name: String,
    #[serde(default)]
    task_id: Option<i64>,
}

impl CsvPunchRow {
    fn into_record(self, line: u64) -> LaborResult<PunchRecord> {
        let punch_in = parse_datetime(&self.inpunch_dt).ok_or_else(|| LaborError::InvalidRecord {
            line,
            message: format!("unparsable inpunch_dt '{}'", self.inpunch_dt),
        })?;

        let working_duration = match self.workingpunch_ts.as_deref() {
            Some(ts) if !ts.is_empty() => Some(parse_time(ts).ok_or_else(|| {
                LaborError::InvalidRecord {
                    line,
                    message: format!("unparsable workingpunch_ts '{}'", ts),
                }
            })?),
            _ => None,
        };

        Ok(PunchRecord {
            department_code: self.department_code,
            job_id: self.job_id,
            hull: self.hull.unwrap_or_default(),
            employee_id: self.employee_id.unwrap_or_default(),
            last_name: self.last_name,
            first_name: self.first_name,
            punch_in,
            working_duration,
            work_time: self
                .work_time
                .or_else(|| working_duration.and_then(quantize_work_time)),
            working_punch_id: self.workingpunch_id.unwrap_or_default(),
            punch_direction: self.inout_id,
            task_name: self.task_name,
            task_id: self.task_id,
        })
    }
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

/// Reads punches from a CSV export of the punch query.
///
/// When the `WorkTime` column is blank or absent, work time is derived from
/// `workingpunch_ts` with the same quarter-hour rule the database query uses.
#[derive(Debug, Clone)]
pub struct CsvRowSource {
    path: PathBuf,
}

impl CsvRowSource {
    /// Creates a source reading the export at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parses punches from any reader, keeping those within `range`.
    pub fn read_from<R: Read>(reader: R, range: &DateRange) -> LaborResult<Vec<PunchRecord>> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for (index, row) in rdr.deserialize::<CsvPunchRow>().enumerate() {
            // Line 1 is the header.
            let line = index as u64 + 2;
            let record = row?.into_record(line)?;
            if range.contains(record.punch_in) {
                records.push(record);
            } else {
                skipped += 1;
            }
        }

        debug!(skipped, "dropped rows outside the query range");
        Ok(records)
    }
}

impl RowSource for CsvRowSource {
    fn fetch(&self, range: &DateRange) -> LaborResult<Vec<PunchRecord>> {
        debug!(path = %self.path.display(), "reading punch export");
        let file = File::open(&self.path)?;
        let records = Self::read_from(file, range)?;
        info!(rows = records.len(), "fetched punch records");
        Ok(records)
    }
}
