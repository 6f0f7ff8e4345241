use super::{source_tag::SourceTag, status::AttendanceStatus};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AttendanceRecord {
    pub id: i64,                  // ⇔ attendance.id (0 = not yet stored)
    pub person_id: i64,           // ⇔ attendance.person_id
    pub date: NaiveDate,          // ⇔ attendance.date (TEXT "YYYY-MM-DD")
    pub in_time: Option<NaiveTime>,  // ⇔ attendance.in_time (TEXT "HH:MM:SS")
    pub out_time: Option<NaiveTime>, // ⇔ attendance.out_time
    pub status: AttendanceStatus, // ⇔ attendance.status
    pub source: SourceTag,        // ⇔ attendance.source ('ingested' | 'manual')
    pub remarks: String,          // ⇔ attendance.remarks (TEXT, default '')
}

impl AttendanceRecord {
    /// Record produced by the ingestion pipeline (`source = ingested`, id still unknown).
    pub fn ingested(
        person_id: i64,
        date: NaiveDate,
        in_time: Option<NaiveTime>,
        out_time: Option<NaiveTime>,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            id: 0,
            person_id,
            date,
            in_time,
            out_time,
            status,
            source: SourceTag::Ingested,
            remarks: String::new(),
        }
    }

    /// Record entered by hand through `attendance set`.
    pub fn manual(
        person_id: i64,
        date: NaiveDate,
        in_time: Option<NaiveTime>,
        out_time: Option<NaiveTime>,
        status: AttendanceStatus,
        remarks: String,
    ) -> Self {
        Self {
            id: 0,
            person_id,
            date,
            in_time,
            out_time,
            status,
            source: SourceTag::Manual,
            remarks,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn in_str(&self) -> String {
        fmt_opt_time(self.in_time)
    }

    pub fn out_str(&self) -> String {
        fmt_opt_time(self.out_time)
    }

    /// Same content as far as the ledger is concerned (ids and remarks ignored).
    pub fn same_content(&self, other: &AttendanceRecord) -> bool {
        self.person_id == other.person_id
            && self.date == other.date
            && self.in_time == other.in_time
            && self.out_time == other.out_time
            && self.status == other.status
            && self.source == other.source
    }
}

fn fmt_opt_time(t: Option<NaiveTime>) -> String {
    t.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
