//! SQLite implementation of the ingestion store.

use crate::core::ports::{Directory, Ledger};
use crate::db::attendance::{insert_if_absent, records_for_date, upsert_record};
use crate::db::calendar::{approved_leave_holders, is_holiday};
use crate::db::log::ttlog;
use crate::db::people::list_people;
use crate::db::pool::DbPool;
use crate::db::unmatched::{insert_unmatched, list_unmatched, mark_resolved, senders_for_date};
use crate::errors::AppResult;
use crate::models::attendance::AttendanceRecord;
use crate::models::person::Person;
use crate::models::unmatched::UnmatchedLogEntry;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

impl Directory for DbPool {
    fn active_people(&self) -> AppResult<Vec<Person>> {
        list_people(&self.conn, false)
    }

    fn is_holiday(&self, date: NaiveDate) -> AppResult<bool> {
        is_holiday(&self.conn, date)
    }

    fn approved_leave_holders(&self, date: NaiveDate) -> AppResult<HashSet<i64>> {
        approved_leave_holders(&self.conn, date)
    }
}

impl Ledger for DbPool {
    fn records_for_date(&self, date: NaiveDate) -> AppResult<HashMap<i64, AttendanceRecord>> {
        records_for_date(&self.conn, date)
    }

    fn unmatched_senders_for_date(&self, date: NaiveDate) -> AppResult<HashSet<String>> {
        senders_for_date(&self.conn, date)
    }

    fn commit_day(
        &mut self,
        date: NaiveDate,
        records: &[AttendanceRecord],
        unmatched: &[UnmatchedLogEntry],
    ) -> AppResult<()> {
        let tx = self.conn.transaction()?;

        for rec in records {
            upsert_record(&tx, rec)?;
        }

        let mut logged = 0;
        for entry in unmatched {
            if insert_unmatched(&tx, entry)? {
                logged += 1;
            }
        }

        ttlog(
            &tx,
            "ingest",
            &date.format("%Y-%m-%d").to_string(),
            &format!(
                "{} attendance row(s) written, {} unmatched sender(s) logged",
                records.len(),
                logged
            ),
        )?;

        tx.commit()?;
        Ok(())
    }

    fn unresolved_unmatched(&self) -> AppResult<Vec<UnmatchedLogEntry>> {
        list_unmatched(&self.conn, false)
    }

    fn commit_resolution(
        &mut self,
        person: &Person,
        records: &[AttendanceRecord],
        resolved_ids: &[i64],
    ) -> AppResult<()> {
        let tx = self.conn.transaction()?;

        let mut created = 0;
        for rec in records {
            if insert_if_absent(&tx, rec)? {
                created += 1;
            }
        }
        let resolved = mark_resolved(&tx, resolved_ids)?;

        ttlog(
            &tx,
            "remap",
            &person.id.to_string(),
            &format!(
                "{}: {} unmatched row(s) resolved, {} record(s) created",
                person.display_name, resolved, created
            ),
        )?;

        tx.commit()?;
        Ok(())
    }
}
