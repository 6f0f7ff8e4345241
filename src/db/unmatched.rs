//! Log of senders that matched nobody, one row per (sender, date).

use crate::db::columns::{date_from_sql, date_to_sql, time_from_sql, time_to_sql};
use crate::errors::AppResult;
use crate::models::unmatched::UnmatchedLogEntry;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, Row, params};
use std::collections::HashSet;

const UNMATCHED_COLUMNS: &str = "id, sender, date, in_time, out_time, is_remote, resolved";

fn map_unmatched(row: &Row) -> rusqlite::Result<UnmatchedLogEntry> {
    let date: String = row.get(2)?;
    Ok(UnmatchedLogEntry {
        id: row.get(0)?,
        sender_label: row.get(1)?,
        date: date_from_sql(2, &date)?,
        in_time: time_from_sql(3, row.get(3)?)?,
        out_time: time_from_sql(4, row.get(4)?)?,
        is_remote: row.get::<_, i64>(5)? == 1,
        resolved: row.get::<_, i64>(6)? == 1,
    })
}

/// Returns false when (sender, date) was already logged.
pub fn insert_unmatched(conn: &Connection, e: &UnmatchedLogEntry) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO unmatched_log (sender, date, in_time, out_time, is_remote, resolved, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)
         ON CONFLICT(sender, date) DO NOTHING",
    )?;

    let n = stmt.execute(params![
        e.sender_label,
        date_to_sql(e.date),
        time_to_sql(e.in_time),
        time_to_sql(e.out_time),
        if e.is_remote { 1 } else { 0 },
        Local::now().to_rfc3339(),
    ])?;
    Ok(n > 0)
}

/// Every logged sender for one date, resolved or not.
pub fn senders_for_date(conn: &Connection, date: NaiveDate) -> AppResult<HashSet<String>> {
    let mut stmt = conn.prepare_cached("SELECT sender FROM unmatched_log WHERE date = ?1")?;
    let rows = stmt.query_map([date_to_sql(date)], |r| r.get::<_, String>(0))?;

    let mut out = HashSet::new();
    for r in rows {
        out.insert(r?);
    }
    Ok(out)
}

pub fn list_unmatched(conn: &Connection, include_resolved: bool) -> AppResult<Vec<UnmatchedLogEntry>> {
    let sql = format!(
        "SELECT {UNMATCHED_COLUMNS} FROM unmatched_log
         WHERE (?1 = 1 OR resolved = 0)
         ORDER BY date ASC, sender ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([if include_resolved { 1 } else { 0 }], map_unmatched)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn mark_resolved(conn: &Connection, ids: &[i64]) -> AppResult<usize> {
    let mut stmt = conn.prepare_cached("UPDATE unmatched_log SET resolved = 1 WHERE id = ?1")?;
    let mut n = 0;
    for id in ids {
        n += stmt.execute([id])?;
    }
    Ok(n)
}

pub fn count_unresolved(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM unmatched_log WHERE resolved = 0",
        [],
        |r| r.get(0),
    )?)
}
