//! Store interfaces the ingestion engine works against.
//! `db::DbPool` implements both over SQLite.

use crate::errors::AppResult;
use crate::models::attendance::AttendanceRecord;
use crate::models::person::Person;
use crate::models::unmatched::UnmatchedLogEntry;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Read-only view of people, holidays and leaves.
pub trait Directory {
    fn active_people(&self) -> AppResult<Vec<Person>>;
    fn is_holiday(&self, date: NaiveDate) -> AppResult<bool>;
    fn approved_leave_holders(&self, date: NaiveDate) -> AppResult<HashSet<i64>>;
}

/// The attendance ledger plus the unmatched-sender log.
pub trait Ledger {
    /// Existing rows for one date, keyed by person id.
    fn records_for_date(&self, date: NaiveDate) -> AppResult<HashMap<i64, AttendanceRecord>>;

    /// Sender labels already logged as unmatched for one date.
    fn unmatched_senders_for_date(&self, date: NaiveDate) -> AppResult<HashSet<String>>;

    /// Persist one date atomically: all rows or none.
    fn commit_day(
        &mut self,
        date: NaiveDate,
        records: &[AttendanceRecord],
        unmatched: &[UnmatchedLogEntry],
    ) -> AppResult<()>;

    fn unresolved_unmatched(&self) -> AppResult<Vec<UnmatchedLogEntry>>;

    /// Insert synthesized records and flag log rows resolved, atomically.
    fn commit_resolution(
        &mut self,
        person: &Person,
        records: &[AttendanceRecord],
        resolved_ids: &[i64],
    ) -> AppResult<()>;
}
