//! Pure reconciliation rules: status precedence and the overwrite guard.
//! No I/O here; callers decide what to persist from the returned outcome.

use crate::models::attendance::AttendanceRecord;
use crate::models::daily_entry::DailyEntry;
use crate::models::status::AttendanceStatus;
use chrono::{NaiveDate, NaiveTime};

/// holiday > approved leave > parsed presence > absence
pub fn compute_status(
    is_holiday: bool,
    on_leave: bool,
    entry: Option<&DailyEntry>,
) -> AttendanceStatus {
    if is_holiday {
        return AttendanceStatus::Holiday;
    }
    if on_leave {
        return AttendanceStatus::OnLeave;
    }
    match entry {
        Some(e) if e.in_time.is_some() => {
            if e.is_remote {
                AttendanceStatus::Remote
            } else {
                AttendanceStatus::OnSite
            }
        }
        _ => AttendanceStatus::Absent,
    }
}

/// Only pipeline-written or absent rows may be replaced.
pub fn may_overwrite(existing: &AttendanceRecord) -> bool {
    existing.source.is_ingested() || existing.status == AttendanceStatus::Absent
}

/// What the pipeline computed for one (person, date).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Computed {
    pub person_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub in_time: Option<NaiveTime>,
    pub out_time: Option<NaiveTime>,
}

impl Computed {
    pub fn new(
        person_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
        entry: Option<&DailyEntry>,
    ) -> Self {
        Self {
            person_id,
            date,
            status,
            in_time: entry.and_then(|e| e.in_time),
            out_time: entry.and_then(|e| e.out_time),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Insert(AttendanceRecord),
    Update(AttendanceRecord),
    Unchanged,
    Protected,
}

pub fn reconcile(existing: Option<&AttendanceRecord>, computed: Computed) -> Outcome {
    let fresh = AttendanceRecord::ingested(
        computed.person_id,
        computed.date,
        computed.in_time,
        computed.out_time,
        computed.status,
    );

    let Some(current) = existing else {
        return Outcome::Insert(fresh);
    };

    if !may_overwrite(current) {
        return Outcome::Protected;
    }

    if current.same_content(&fresh) {
        return Outcome::Unchanged;
    }

    Outcome::Update(AttendanceRecord {
        id: current.id,
        remarks: current.remarks.clone(),
        ..fresh
    })
}
