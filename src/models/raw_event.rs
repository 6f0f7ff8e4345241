use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// One successfully parsed chat line.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RawEvent {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub sender: String,
    pub message: String,
}
