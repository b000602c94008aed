//! End-to-end tests for the labor summary report.
//!
//! This suite covers:
//! - SQLite mirror: fetch, hull selection, aggregation and rendering
//! - CSV exports through the same pipeline
//! - Correction punches and hull exclusion rules
//! - The command-line binary

use std::path::Path;
use std::str::FromStr;

use assert_cmd::Command;
use chrono::NaiveDate;
use predicates::prelude::*;
use rusqlite::Connection;
use rust_decimal::Decimal;

use labor_summary::calculation::{build_time, select_hulls};
use labor_summary::config::{ConfigLoader, ReportConfig};
use labor_summary::models::{DateRange, PunchRecord, ReportPeriod};
use labor_summary::render::{CellValue, SheetPlan, TOTALS_LABEL, XlsxRenderer};
use labor_summary::source::{CsvRowSource, RowSource, SqliteRowSource, init_schema};

// =============================================================================
// Test Helpers
// =============================================================================

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn march() -> ReportPeriod {
    ReportPeriod::new(3, 2024).unwrap()
}

fn punch(hull: &str, task: &str, last: &str, date: &str, hours: &str) -> PunchRecord {
    let punch_in = NaiveDate::from_str(date)
        .unwrap()
        .and_hms_opt(7, 0, 0)
        .unwrap();
    PunchRecord::new(hull, task, last, "J", punch_in, Some(dec(hours)))
}

fn seed_database(path: &Path) {
    let conn = Connection::open(path).unwrap();
    init_schema(&conn).unwrap();
    conn.execute_batch(
        "
        INSERT INTO tblDepartment VALUES (1, 'Production');
        INSERT INTO empMain VALUES (10, 'Doe', 'Jane'), (11, 'Roe', 'Kim'), (12, 'Poe', 'Ann');
        INSERT INTO job VALUES (100, '5001'), (101, '5002'), (102, '6100'), (103, '4090');
        INSERT INTO task VALUES
            (1, '1 Boat Builder'), (2, '2 Canvas and Upholstery'), (4, '4 Paint'),
            (5, '5 Outfitting'), (6, '5 Outfitting - Floorboard'), (9, '9 Admin');
        INSERT INTO timeWorkingPunch
            (workingpunch_id, employee_id, department_id, job_id, task_id,
             inpunch_dt, workingpunch_ts, inout_id, active_yn)
        VALUES
            (1, 10, 1, 100, 1, '2024-03-04 07:00:00', '08:00:00', 1, 1),
            (2, 10, 1, 100, 1, '2024-03-05 07:00:00', '01:00:00', 2, 1),
            (3, 11, 1, 100, 4, '2024-03-05 07:00:00', '06:30:00', 1, 1),
            (4, 12, 1, 101, 5, '2024-03-06 07:00:00', '07:45:00', 1, 1),
            (5, 12, 1, 101, 6, '2024-03-07 07:00:00', '02:15:00', 1, 1),
            (6, 11, 1, 102, 4, '2024-03-07 07:00:00', '08:00:00', 1, 1),
            (7, 11, 1, 100, 9, '2024-03-08 07:00:00', '08:00:00', 1, 1),
            (8, 10, 1, 103, 2, '2024-01-15 07:00:00', '05:00:00', 1, 1),
            (9, 10, 1, 103, 2, '2024-03-08 07:00:00', '03:00:00', 1, 0);
        ",
    )
    .unwrap();
}

// =============================================================================
// SQLite pipeline
// =============================================================================

#[test]
fn test_sqlite_pipeline_totals_by_hull() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("timeclock.db");
    seed_database(&db_path);

    let config = ReportConfig::default();
    let source = SqliteRowSource::open(&db_path, config.tasks()).unwrap();
    let range = march().query_range(config.lookback_days).unwrap();
    let records = source.fetch(&range).unwrap();

    // Admin punches are outside the configured tasks; the inactive punch is dropped.
    assert_eq!(records.len(), 7);

    let hulls = select_hulls(&records, march());
    let names: Vec<&str> = hulls.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["5001", "5002"]);

    let summary = build_time(&records, &hulls);
    assert!(summary.is_consistent());
    assert_eq!(summary.hulls["5001"].total, dec("13.5"));
    assert_eq!(summary.hulls["5002"].total, dec("10"));
    assert_eq!(summary.total, dec("23.5"));
    assert_eq!(
        summary.employee_hours("5001", "1 Boat Builder", "Doe, Jane"),
        Some(dec("7"))
    );
}

#[test]
fn test_hull_worked_only_in_lookback_is_excluded() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("timeclock.db");
    seed_database(&db_path);

    let config = ReportConfig::default();
    let source = SqliteRowSource::open(&db_path, config.tasks()).unwrap();
    let range = march().query_range(config.lookback_days).unwrap();
    let records = source.fetch(&range).unwrap();

    assert!(records.iter().any(|r| r.hull == "4090"));
    let summary = build_time(&records, &select_hulls(&records, march()));
    assert!(!summary.hulls.contains_key("4090"));
}

#[test]
fn test_sqlite_pipeline_renders_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("timeclock.db");
    seed_database(&db_path);

    let config = ConfigLoader::load("./config/labor_summary.yaml")
        .unwrap()
        .into_config();
    let source = SqliteRowSource::open(&db_path, config.tasks()).unwrap();
    let range = march().query_range(config.lookback_days).unwrap();
    let records = source.fetch(&range).unwrap();
    let summary = build_time(&records, &select_hulls(&records, march()));

    let output = dir.path().join("labor-summary-2024-03.xlsx");
    XlsxRenderer::new(&config)
        .sheet_name(march().label())
        .render_to_file(&summary, &output)
        .unwrap();

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

// =============================================================================
// Worksheet layout
// =============================================================================

#[test]
fn test_plan_places_subtotals_and_totals() {
    let records = vec![
        punch("5001", "1 Boat Builder", "Doe", "2024-03-04", "8"),
        punch("5001", "1 Boat Builder", "Doe", "2024-03-05", "1"),
        punch("5001", "4 Paint", "Roe", "2024-03-05", "6.5"),
        punch("5002", "5 Outfitting", "Poe", "2024-03-06", "7.75"),
    ];
    let summary = build_time(&records, &select_hulls(&records, march()));
    let plan = SheetPlan::build(&summary, &ReportConfig::default());

    // Rows: header, 5001 boat builder, 5001 paint, blank, 5002 outfitting, blank, totals.
    assert_eq!(plan.detail_rows, 3);
    assert_eq!(plan.totals_row, 6);

    assert_eq!(plan.value_at("A2"), Some(&CellValue::Text("Doe, J".to_string())));
    assert_eq!(plan.value_at("D2"), Some(&CellValue::Number(dec("7"))));
    assert_eq!(plan.value_at("E2"), Some(&CellValue::Formula("=SUM(D2:D2)".to_string())));
    assert_eq!(plan.value_at("F3"), Some(&CellValue::Formula("=SUM(D3:D3)".to_string())));
    assert_eq!(plan.value_at("I5"), Some(&CellValue::Formula("=SUM(D5:D5)".to_string())));

    assert_eq!(plan.value_at("A7"), Some(&CellValue::Text(TOTALS_LABEL.to_string())));
    assert_eq!(plan.value_at("D7"), Some(&CellValue::Formula("=SUM(D2:D5)".to_string())));
    assert_eq!(plan.value_at("J7"), Some(&CellValue::Formula("=SUM(E7:I7)".to_string())));
}

// =============================================================================
// CSV pipeline
// =============================================================================

const MARCH_EXPORT: &str = "\
jobName,lastname,firstname,inpunch_dt,WorkTime,taskname
5001,Doe,J,2024-03-05 07:00:00,8,1 Boat Builder
5001,Doe,J,2024-03-06 07:00:00,1,1 Boat Builder
,Doe,J,2024-03-06 12:00:00,4,1 Boat Builder
6100,Roe,K,2024-03-07 07:00:00,4,4 Paint
5001,Roe,K,2024-03-07 07:00:00,2.5,4 Paint
";

#[test]
fn test_csv_pipeline_applies_correction_and_exclusions() {
    let range = march().query_range(365).unwrap();
    let records = CsvRowSource::read_from(MARCH_EXPORT.as_bytes(), &range).unwrap();
    assert_eq!(records.len(), 5);

    let summary = build_time(&records, &select_hulls(&records, march()));
    assert_eq!(summary.hulls.len(), 1);
    assert_eq!(
        summary.employee_hours("5001", "1 Boat Builder", "Doe, J"),
        Some(dec("7"))
    );
    assert_eq!(summary.employee_hours("5001", "4 Paint", "Roe, K"), Some(dec("2.5")));
    assert_eq!(summary.total, dec("9.5"));
}

#[test]
fn test_csv_source_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("punches.csv");
    std::fs::write(&path, MARCH_EXPORT).unwrap();

    let range = DateRange::from_dates(
        NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
    );
    let records = CsvRowSource::new(&path).fetch(&range).unwrap();
    assert_eq!(records.len(), 2);
}

// =============================================================================
// Command line
// =============================================================================

fn labor_summary(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("labor-summary").unwrap();
    cmd.current_dir(dir)
        .env_remove("DATABASE")
        .env_remove("PATH_DIR")
        .env_remove("LABOR_SUMMARY_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_writes_report_to_path_dir() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("timeclock.db");
    seed_database(&db_path);
    let reports = dir.path().join("reports");

    labor_summary(dir.path())
        .args(["--month", "3", "--year", "2024"])
        .env("DATABASE", &db_path)
        .env("PATH_DIR", &reports)
        .assert()
        .success()
        .stdout(predicate::str::contains("labor-summary-2024-03.xlsx"));

    assert!(reports.join("labor-summary-2024-03.xlsx").exists());
}

#[test]
fn test_cli_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("punches.csv");
    std::fs::write(&csv_path, MARCH_EXPORT).unwrap();

    labor_summary(dir.path())
        .arg("--csv")
        .arg(&csv_path)
        .arg("--output")
        .arg(dir.path().join("out.xlsx"))
        .args(["--month", "3", "--year", "2024", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"5001\""))
        .stdout(predicate::str::contains("6100").not());
}

#[test]
fn test_cli_without_source_fails() {
    let dir = tempfile::tempdir().unwrap();

    labor_summary(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No row source configured"));
}

#[test]
fn test_cli_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("punches.csv");
    std::fs::write(&csv_path, MARCH_EXPORT).unwrap();
    let config_path = dir.path().join("bad.yaml");
    std::fs::write(&config_path, "columns: []\n").unwrap();

    labor_summary(dir.path())
        .arg("--csv")
        .arg(&csv_path)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}
