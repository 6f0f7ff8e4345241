//! Holidays and the leave workflow.

use crate::db::columns::{conversion_error, date_from_sql, date_to_sql};
use crate::errors::{AppError, AppResult};
use crate::models::holiday::Holiday;
use crate::models::leave::{Leave, LeaveStatus};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::HashSet;

// ---------------------------
// Holidays
// ---------------------------

fn map_holiday(row: &Row) -> rusqlite::Result<Holiday> {
    let date: String = row.get("date")?;
    Ok(Holiday {
        id: row.get("id")?,
        date: date_from_sql(1, &date)?,
        name: row.get("name")?,
        description: row.get("description")?,
        optional: row.get::<_, i64>("optional")? == 1,
    })
}

/// One holiday per date; a second insert for the same date is `HolidayExists`.
pub fn insert_holiday(conn: &Connection, h: &Holiday) -> AppResult<i64> {
    if is_holiday(conn, h.date)? {
        return Err(AppError::HolidayExists(date_to_sql(h.date)));
    }

    conn.execute(
        "INSERT INTO holidays (date, name, description, optional)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            date_to_sql(h.date),
            h.name.trim(),
            h.description,
            if h.optional { 1 } else { 0 },
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn is_holiday(conn: &Connection, date: NaiveDate) -> AppResult<bool> {
    let hit: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM holidays WHERE date = ?1",
            [date_to_sql(date)],
            |r| r.get(0),
        )
        .optional()?;
    Ok(hit.is_some())
}

pub fn list_holidays(conn: &Connection, year: Option<i32>) -> AppResult<Vec<Holiday>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, name, description, optional FROM holidays
         WHERE (?1 IS NULL OR substr(date, 1, 4) = ?1)
         ORDER BY date ASC",
    )?;

    let rows = stmt.query_map(params![year.map(|y| format!("{y:04}"))], map_holiday)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Returns false when no holiday was stored for `date`.
pub fn delete_holiday(conn: &Connection, date: NaiveDate) -> AppResult<bool> {
    let n = conn.execute(
        "DELETE FROM holidays WHERE date = ?1",
        [date_to_sql(date)],
    )?;
    Ok(n > 0)
}

// ---------------------------
// Leaves
// ---------------------------

fn map_leave(row: &Row) -> rusqlite::Result<Leave> {
    let start: String = row.get("start_date")?;
    let end: String = row.get("end_date")?;
    let status: String = row.get("status")?;

    Ok(Leave {
        id: row.get("id")?,
        person_id: row.get("person_id")?,
        start_date: date_from_sql(2, &start)?,
        end_date: date_from_sql(3, &end)?,
        reason: row.get("reason")?,
        leave_type: row.get("leave_type")?,
        status: LeaveStatus::from_db_str(&status)
            .ok_or_else(|| conversion_error(6, AppError::Other(format!("leave status {status}"))))?,
        admin_remarks: row.get("admin_remarks")?,
    })
}

const LEAVE_COLUMNS: &str =
    "id, person_id, start_date, end_date, reason, leave_type, status, admin_remarks";

/// New leaves always start as pending.
pub fn insert_leave(conn: &Connection, l: &Leave) -> AppResult<i64> {
    if l.end_date < l.start_date {
        return Err(AppError::InvalidDate(format!(
            "end date {} precedes start date {}",
            l.end_date, l.start_date
        )));
    }

    conn.execute(
        "INSERT INTO leaves (person_id, start_date, end_date, reason, leave_type, status, admin_remarks, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 'pending', '', ?6)",
        params![
            l.person_id,
            date_to_sql(l.start_date),
            date_to_sql(l.end_date),
            l.reason,
            l.leave_type,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_leave(conn: &Connection, id: i64) -> AppResult<Leave> {
    let sql = format!("SELECT {LEAVE_COLUMNS} FROM leaves WHERE id = ?1");
    conn.query_row(&sql, [id], map_leave)
        .optional()?
        .ok_or(AppError::LeaveNotFound(id))
}

/// Move a pending leave to approved or rejected.
pub fn decide_leave(
    conn: &Connection,
    id: i64,
    decision: LeaveStatus,
    remarks: &str,
) -> AppResult<Leave> {
    let current = get_leave(conn, id)?;

    if current.status != LeaveStatus::Pending || decision == LeaveStatus::Pending {
        return Err(AppError::InvalidLeaveTransition(format!(
            "leave {} is {}, cannot move to {}",
            id,
            current.status.to_db_str(),
            decision.to_db_str()
        )));
    }

    conn.execute(
        "UPDATE leaves SET status = ?1, admin_remarks = ?2 WHERE id = ?3",
        params![decision.to_db_str(), remarks, id],
    )?;

    get_leave(conn, id)
}

pub fn list_leaves(conn: &Connection, status: Option<LeaveStatus>) -> AppResult<Vec<Leave>> {
    let sql = format!(
        "SELECT {LEAVE_COLUMNS} FROM leaves
         WHERE (?1 IS NULL OR status = ?1)
         ORDER BY start_date ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![status.map(|s| s.to_db_str())], map_leave)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// People with an approved leave covering `date` (inclusive range).
pub fn approved_leave_holders(conn: &Connection, date: NaiveDate) -> AppResult<HashSet<i64>> {
    let mut stmt = conn.prepare_cached(
        "SELECT DISTINCT person_id FROM leaves
         WHERE status = 'approved' AND start_date <= ?1 AND end_date >= ?1",
    )?;

    let rows = stmt.query_map([date_to_sql(date)], |r| r.get::<_, i64>(0))?;

    let mut out = HashSet::new();
    for r in rows {
        out.insert(r?);
    }
    Ok(out)
}
