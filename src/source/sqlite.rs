//! SQLite mirror of the time-clock database.
//!
//! The mirror keeps the time clock's table and column names so the punch
//! query reads the same as it does against the live system. Work time is
//! quantized here from the recorded working-punch duration.

use std::path::Path;

use rusqlite::{Connection, OpenFlags, Row, params_from_iter};
use tracing::{debug, info};

use crate::error::LaborResult;
use crate::models::{DateRange, PunchRecord, quantize_work_time};

use super::RowSource;

/// Schema of the time-clock mirror.
///
/// Timestamps are stored as `YYYY-MM-DD HH:MM:SS` text and working-punch
/// durations as `HH:MM:SS` text.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tblDepartment (
    department_id INTEGER PRIMARY KEY,
    departmentname TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS empMain (
    employee_id INTEGER PRIMARY KEY,
    lastname TEXT NOT NULL,
    firstname TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS job (
    job_id INTEGER PRIMARY KEY,
    jobname TEXT
);

CREATE TABLE IF NOT EXISTS task (
    task_id INTEGER PRIMARY KEY,
    taskname TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS timeWorkingPunch (
    workingpunch_id INTEGER PRIMARY KEY,
    employee_id INTEGER NOT NULL,
    department_id INTEGER NOT NULL,
    job_id INTEGER,
    task_id INTEGER,
    inpunch_dt TEXT NOT NULL,
    workingpunch_ts TEXT,
    inout_id INTEGER,
    active_yn INTEGER NOT NULL DEFAULT 1,
    FOREIGN KEY (employee_id) REFERENCES empMain(employee_id),
    FOREIGN KEY (department_id) REFERENCES tblDepartment(department_id),
    FOREIGN KEY (job_id) REFERENCES job(job_id),
    FOREIGN KEY (task_id) REFERENCES task(task_id)
);

CREATE INDEX IF NOT EXISTS idx_punch_inpunch ON timeWorkingPunch(inpunch_dt);
";

const PUNCH_QUERY: &str = "
    SELECT  substr(dp.departmentname, 1, 3) AS departmentname, tp.job_id,
            COALESCE(job.jobname, '') AS jobname,
            tp.employee_id, em.lastname, em.firstname,
            tp.inpunch_dt, tp.workingpunch_ts,
            tp.workingpunch_id, tp.inout_id, task.taskname, tp.task_id
      FROM  timeWorkingPunch tp
 LEFT JOIN  job ON tp.job_id = job.job_id
 LEFT JOIN  task ON tp.task_id = task.task_id
      JOIN  empMain em ON tp.employee_id = em.employee_id
      JOIN  tblDepartment dp ON tp.department_id = dp.department_id
     WHERE  tp.inpunch_dt BETWEEN ?1 AND ?2
       AND  tp.active_yn = 1";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Creates the mirror tables on `conn` if they do not exist.
pub fn init_schema(conn: &Connection) -> LaborResult<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Reads punches from a SQLite mirror of the time clock.
pub struct SqliteRowSource {
    conn: Connection,
    tasks: Vec<String>,
}

impl SqliteRowSource {
    /// Opens the database at `path` read-only.
    ///
    /// Only punches attributed to one of `tasks` are returned; an empty list
    /// applies no task restriction.
    pub fn open<P: AsRef<Path>>(path: P, tasks: Vec<String>) -> LaborResult<Self> {
        let conn = Connection::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!(path = %path.as_ref().display(), "opened time-clock database");
        Ok(Self::from_connection(conn, tasks))
    }

    /// Wraps an existing connection.
    pub fn from_connection(conn: Connection, tasks: Vec<String>) -> Self {
        Self { conn, tasks }
    }

    fn query(&self) -> String {
        let mut sql = PUNCH_QUERY.to_string();
        if !self.tasks.is_empty() {
            let placeholders: Vec<String> =
                (0..self.tasks.len()).map(|i| format!("?{}", i + 3)).collect();
            sql.push_str(&format!(
                "\n       AND  task.taskname IN ({})",
                placeholders.join(", ")
            ));
        }
        sql.push_str("\n  ORDER BY  tp.inpunch_dt, tp.workingpunch_id");
        sql
    }
}

fn punch_from_row(row: &Row<'_>) -> rusqlite::Result<PunchRecord> {
    let working_duration: Option<chrono::NaiveTime> = row.get(7)?;
    Ok(PunchRecord {
        department_code: row.get(0)?,
        job_id: row.get(1)?,
        hull: row.get(2)?,
        employee_id: row.get(3)?,
        last_name: row.get(4)?,
        first_name: row.get(5)?,
        punch_in: row.get(6)?,
        working_duration,
        work_time: working_duration.and_then(quantize_work_time),
        working_punch_id: row.get(8)?,
        punch_direction: row.get(9)?,
        task_name: row.get::<_, Option<String>>(10)?.unwrap_or_default(),
        task_id: row.get(11)?,
    })
}

impl RowSource for SqliteRowSource {
    fn fetch(&self, range: &DateRange) -> LaborResult<Vec<PunchRecord>> {
        let start = range.start.format(TIMESTAMP_FORMAT).to_string();
        let finish = range.finish.format(TIMESTAMP_FORMAT).to_string();
        debug!(%start, %finish, tasks = self.tasks.len(), "querying punches");

        let params: Vec<&str> = [start.as_str(), finish.as_str()]
            .into_iter()
            .chain(self.tasks.iter().map(String::as_str))
            .collect();

        let mut stmt = self.conn.prepare(&self.query())?;
        let records = stmt
            .query_map(params_from_iter(params), punch_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        info!(rows = records.len(), "fetched punch records");
        Ok(records)
    }
}
