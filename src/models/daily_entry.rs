use chrono::NaiveTime;
use serde::Serialize;

/// What one sender did on one day, folded from all their messages.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyEntry {
    /// Sender label exactly as it appeared in the export.
    pub sender_label: String,
    pub in_time: Option<NaiveTime>,
    pub out_time: Option<NaiveTime>,
    pub is_remote: bool,
}

impl DailyEntry {
    pub fn new(sender_label: &str) -> Self {
        Self {
            sender_label: sender_label.to_string(),
            in_time: None,
            out_time: None,
            is_remote: false,
        }
    }

    pub fn checked_in(&self) -> bool {
        self.in_time.is_some()
    }
}
