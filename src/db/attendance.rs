//! Attendance ledger rows.

use crate::db::columns::{conversion_error, date_from_sql, date_to_sql, time_from_sql, time_to_sql};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::source_tag::SourceTag;
use crate::models::status::AttendanceStatus;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, Row, params};
use serde::Serialize;
use std::collections::HashMap;

const RECORD_COLUMNS: &str =
    "a.id, a.person_id, a.date, a.in_time, a.out_time, a.status, a.source, a.remarks";

pub fn map_record(row: &Row) -> rusqlite::Result<AttendanceRecord> {
    let date: String = row.get(2)?;
    let status: String = row.get(5)?;
    let source: String = row.get(6)?;

    Ok(AttendanceRecord {
        id: row.get(0)?,
        person_id: row.get(1)?,
        date: date_from_sql(2, &date)?,
        in_time: time_from_sql(3, row.get(3)?)?,
        out_time: time_from_sql(4, row.get(4)?)?,
        status: AttendanceStatus::from_db_str(&status)
            .ok_or_else(|| conversion_error(5, AppError::InvalidStatus(status.clone())))?,
        source: SourceTag::from_db_str(&source)
            .ok_or_else(|| conversion_error(6, AppError::Other(format!("source {source}"))))?,
        remarks: row.get(7)?,
    })
}

/// Insert or replace the row for (person, date).
pub fn upsert_record(conn: &Connection, rec: &AttendanceRecord) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO attendance (person_id, date, in_time, out_time, status, source, remarks, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(person_id, date) DO UPDATE SET
             in_time = excluded.in_time,
             out_time = excluded.out_time,
             status = excluded.status,
             source = excluded.source,
             remarks = excluded.remarks,
             updated_at = excluded.updated_at",
    )?;

    stmt.execute(params![
        rec.person_id,
        date_to_sql(rec.date),
        time_to_sql(rec.in_time),
        time_to_sql(rec.out_time),
        rec.status.to_db_str(),
        rec.source.to_db_str(),
        rec.remarks,
        Local::now().to_rfc3339(),
    ])?;
    Ok(())
}

/// Insert only when (person, date) is still free. Returns whether a row was written.
pub fn insert_if_absent(conn: &Connection, rec: &AttendanceRecord) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO attendance (person_id, date, in_time, out_time, status, source, remarks, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(person_id, date) DO NOTHING",
    )?;

    let n = stmt.execute(params![
        rec.person_id,
        date_to_sql(rec.date),
        time_to_sql(rec.in_time),
        time_to_sql(rec.out_time),
        rec.status.to_db_str(),
        rec.source.to_db_str(),
        rec.remarks,
        Local::now().to_rfc3339(),
    ])?;
    Ok(n > 0)
}

pub fn records_for_date(
    conn: &Connection,
    date: NaiveDate,
) -> AppResult<HashMap<i64, AttendanceRecord>> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM attendance a WHERE a.date = ?1");
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([date_to_sql(date)], map_record)?;

    let mut out = HashMap::new();
    for r in rows {
        let rec = r?;
        out.insert(rec.person_id, rec);
    }
    Ok(out)
}

/// Records in `[from, to]`, optionally for one person, date then person order.
pub fn records_in_range(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
    person_id: Option<i64>,
) -> AppResult<Vec<AttendanceRecord>> {
    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM attendance a
         WHERE a.date >= ?1 AND a.date <= ?2 AND (?3 IS NULL OR a.person_id = ?3)
         ORDER BY a.date ASC, a.person_id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![date_to_sql(from), date_to_sql(to), person_id],
        map_record,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// A ledger row joined with the person's display name.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRow {
    pub name: String,
    #[serde(flatten)]
    pub record: AttendanceRecord,
}

pub fn rows_in_range(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<AttendanceRow>> {
    let sql = format!(
        "SELECT {RECORD_COLUMNS}, p.display_name FROM attendance a
         JOIN people p ON p.id = a.person_id
         WHERE a.date >= ?1 AND a.date <= ?2
         ORDER BY a.date ASC, p.display_name ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![date_to_sql(from), date_to_sql(to)], |row| {
        Ok(AttendanceRow {
            record: map_record(row)?,
            name: row.get(8)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// (min, max) stored date, if any row exists.
pub fn date_span(conn: &Connection) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let (min, max): (Option<String>, Option<String>) = conn.query_row(
        "SELECT MIN(date), MAX(date) FROM attendance",
        [],
        |r| Ok((r.get(0)?, r.get(1)?)),
    )?;

    match (min, max) {
        (Some(a), Some(b)) => Ok(Some((date_from_sql(0, &a)?, date_from_sql(1, &b)?))),
        _ => Ok(None),
    }
}
