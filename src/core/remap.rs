//! Re-match of logged unmatched senders after a directory change.

use crate::core::matcher::resolves_to;
use crate::core::ports::{Directory, Ledger};
use crate::core::reconcile::compute_status;
use crate::errors::AppResult;
use crate::models::attendance::AttendanceRecord;
use crate::models::person::Person;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct RemapReport {
    pub person_id: i64,
    /// Unresolved rows whose label now resolves to the person.
    pub matched: usize,
    /// Attendance rows synthesized from those log rows.
    pub created: usize,
    /// Matched rows skipped because a record already existed for the date.
    pub existing: usize,
}

impl RemapReport {
    pub fn is_empty(&self) -> bool {
        self.matched == 0
    }
}

/// Resolve every pending unmatched row that now belongs to `person`.
///
/// A record is synthesized only when none exists for (person, date); the
/// log row is marked resolved in both cases.
pub fn resolve_unmatched_for_person<S>(store: &mut S, person: &Person) -> AppResult<RemapReport>
where
    S: Directory + Ledger,
{
    let mut report = RemapReport {
        person_id: person.id,
        ..Default::default()
    };

    if !person.is_active {
        return Ok(report);
    }

    let pending = store.unresolved_unmatched()?;
    let mut records: Vec<AttendanceRecord> = Vec::new();
    let mut resolved: Vec<i64> = Vec::new();
    let mut seen_dates: HashSet<NaiveDate> = HashSet::new();

    for row in pending
        .iter()
        .filter(|r| resolves_to(&r.sender_label, person).is_some())
    {
        report.matched += 1;
        resolved.push(row.id);

        // two labels for the same person on one date: first row wins
        if !seen_dates.insert(row.date)
            || store.records_for_date(row.date)?.contains_key(&person.id)
        {
            report.existing += 1;
            continue;
        }

        let entry = row.as_entry();
        let holiday = store.is_holiday(row.date)?;
        let on_leave = store.approved_leave_holders(row.date)?.contains(&person.id);
        let status = compute_status(holiday, on_leave, Some(&entry));

        records.push(AttendanceRecord::ingested(
            person.id,
            row.date,
            entry.in_time,
            entry.out_time,
            status,
        ));
        report.created += 1;
    }

    if resolved.is_empty() {
        return Ok(report);
    }

    store.commit_resolution(person, &records, &resolved)?;
    info!(
        person = person.id,
        matched = report.matched,
        created = report.created,
        "unmatched rows resolved"
    );

    Ok(report)
}

/// Run the re-match for every active person, in directory order.
pub fn resolve_all<S>(store: &mut S) -> AppResult<Vec<RemapReport>>
where
    S: Directory + Ledger,
{
    let people = store.active_people()?;
    let mut out = Vec::new();

    for person in &people {
        let report = resolve_unmatched_for_person(store, person)?;
        if !report.is_empty() {
            out.push(report);
        }
    }

    Ok(out)
}
