//! Daily aggregator: folds classified events into one entry per (date, sender).

use crate::chat::classify::ClassifiedEvent;
use crate::models::daily_entry::DailyEntry;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub type DayEntries = BTreeMap<String, DailyEntry>;

#[derive(Debug, Default, Clone)]
pub struct AttendanceSheet {
    days: BTreeMap<NaiveDate, DayEntries>,
}

impl AttendanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event, in arrival order.
    ///
    /// - first check-in of the day sets `in_time` and the remote flag
    /// - every check-out overwrites `out_time` (last one wins)
    pub fn apply(&mut self, ev: &ClassifiedEvent) {
        let sender = ev.event.sender.as_str();

        let entry = self
            .days
            .entry(ev.event.date)
            .or_default()
            .entry(sender.to_string())
            .or_insert_with(|| DailyEntry::new(sender));

        if ev.tags.check_in && entry.in_time.is_none() {
            entry.in_time = Some(ev.shift_time());
            entry.is_remote = ev.tags.remote;
        }

        if ev.tags.check_out {
            entry.out_time = Some(ev.shift_time());
        }
    }

    pub fn days(&self) -> impl Iterator<Item = (&NaiveDate, &DayEntries)> {
        self.days.iter()
    }

    pub fn day(&self, date: &NaiveDate) -> Option<&DayEntries> {
        self.days.get(date)
    }

    pub fn entry(&self, date: &NaiveDate, sender: &str) -> Option<&DailyEntry> {
        self.days.get(date).and_then(|d| d.get(sender))
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
