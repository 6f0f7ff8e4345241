// src/export/model.rs

use crate::db::attendance::AttendanceRow;
use crate::models::unmatched::UnmatchedLogEntry;
use serde::Serialize;

/// A flat, serializable export row.
/// CSV and JSON go through serde; XLSX goes through `cells`.
pub trait ExportRow: Serialize {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

/// Attendance ledger row joined with the person's name.
#[derive(Serialize, Clone, Debug)]
pub struct AttendanceExport {
    pub id: i64,
    pub date: String,
    pub person_id: i64,
    pub name: String,
    pub status: String,
    pub in_time: String,
    pub out_time: String,
    pub source: String,
    pub remarks: String,
}

impl From<&AttendanceRow> for AttendanceExport {
    fn from(r: &AttendanceRow) -> Self {
        let rec = &r.record;
        Self {
            id: rec.id,
            date: rec.date_str(),
            person_id: rec.person_id,
            name: r.name.clone(),
            status: rec.status.to_db_str().to_string(),
            in_time: opt_time(rec.in_time),
            out_time: opt_time(rec.out_time),
            source: rec.source.to_db_str().to_string(),
            remarks: rec.remarks.clone(),
        }
    }
}

impl ExportRow for AttendanceExport {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "date",
            "person_id",
            "name",
            "status",
            "in_time",
            "out_time",
            "source",
            "remarks",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.clone(),
            self.person_id.to_string(),
            self.name.clone(),
            self.status.clone(),
            self.in_time.clone(),
            self.out_time.clone(),
            self.source.clone(),
            self.remarks.clone(),
        ]
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct UnmatchedExport {
    pub id: i64,
    pub date: String,
    pub sender: String,
    pub in_time: String,
    pub out_time: String,
    pub remote: bool,
    pub resolved: bool,
}

impl From<&UnmatchedLogEntry> for UnmatchedExport {
    fn from(e: &UnmatchedLogEntry) -> Self {
        Self {
            id: e.id,
            date: e.date.format("%Y-%m-%d").to_string(),
            sender: e.sender_label.clone(),
            in_time: opt_time(e.in_time),
            out_time: opt_time(e.out_time),
            remote: e.is_remote,
            resolved: e.resolved,
        }
    }
}

impl ExportRow for UnmatchedExport {
    fn headers() -> &'static [&'static str] {
        &["id", "date", "sender", "in_time", "out_time", "remote", "resolved"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.clone(),
            self.sender.clone(),
            self.in_time.clone(),
            self.out_time.clone(),
            yes_no(self.remote),
            yes_no(self.resolved),
        ]
    }
}

/// Empty string when the time is missing, so spreadsheets see a blank cell.
fn opt_time(t: Option<chrono::NaiveTime>) -> String {
    t.map(|t| t.format("%H:%M:%S").to_string()).unwrap_or_default()
}

fn yes_no(b: bool) -> String {
    if b { "yes".into() } else { "no".into() }
}
