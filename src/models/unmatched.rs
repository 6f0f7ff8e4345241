use super::daily_entry::DailyEntry;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// A sender that could not be resolved to anyone in the directory.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UnmatchedLogEntry {
    pub id: i64,
    pub sender_label: String,
    pub date: NaiveDate,
    pub in_time: Option<NaiveTime>,
    pub out_time: Option<NaiveTime>,
    pub is_remote: bool,
    pub resolved: bool,
}

impl UnmatchedLogEntry {
    pub fn from_entry(date: NaiveDate, entry: &DailyEntry) -> Self {
        Self {
            id: 0,
            sender_label: entry.sender_label.clone(),
            date,
            in_time: entry.in_time,
            out_time: entry.out_time,
            is_remote: entry.is_remote,
            resolved: false,
        }
    }

    /// View the logged row as the day entry it was built from.
    pub fn as_entry(&self) -> DailyEntry {
        DailyEntry {
            sender_label: self.sender_label.clone(),
            in_time: self.in_time,
            out_time: self.out_time,
            is_remote: self.is_remote,
        }
    }
}
