//! Chat export pipeline: raw text → events → tagged events → per-day sheet.

pub mod aggregate;
pub mod classify;
pub mod line;
pub mod patterns;
pub mod source;

use crate::models::raw_event::RawEvent;
use aggregate::AttendanceSheet;
use classify::classify;
use line::{ParsedLine, SkipReason, parse_line};
use patterns::ChatPatterns;
use serde::Serialize;

/// Per-run line counters. Skips are counted, never raised.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineStats {
    pub total: usize,
    pub events: usize,
    pub blank: usize,
    pub no_match: usize,
    pub system: usize,
    pub bad_timestamp: usize,
}

impl LineStats {
    fn record(&mut self, parsed: &ParsedLine) {
        self.total += 1;
        match parsed {
            ParsedLine::Event(_) => self.events += 1,
            ParsedLine::Skipped(SkipReason::Blank) => self.blank += 1,
            ParsedLine::Skipped(SkipReason::NoMatch) => self.no_match += 1,
            ParsedLine::Skipped(SkipReason::SystemNotice) => self.system += 1,
            ParsedLine::Skipped(SkipReason::BadTimestamp) => self.bad_timestamp += 1,
        }
    }

    /// Non-blank lines that did not yield an event.
    pub fn skipped(&self) -> usize {
        self.no_match + self.system + self.bad_timestamp
    }
}

#[derive(Debug, Default, Clone)]
pub struct ChatParse {
    pub events: Vec<RawEvent>,
    pub stats: LineStats,
}

pub fn parse_chat(text: &str, patterns: &ChatPatterns) -> ChatParse {
    let mut out = ChatParse::default();

    for raw in text.split('\n') {
        let parsed = parse_line(raw, patterns);
        out.stats.record(&parsed);
        if let ParsedLine::Event(ev) = parsed {
            out.events.push(ev);
        }
    }

    out
}

/// Parse, classify and aggregate in one pass.
pub fn build_sheet(text: &str, patterns: &ChatPatterns) -> (AttendanceSheet, LineStats) {
    let parsed = parse_chat(text, patterns);
    let mut sheet = AttendanceSheet::new();

    for ev in parsed.events {
        let tagged = classify(ev, patterns);
        sheet.apply(&tagged);
    }

    (sheet, parsed.stats)
}
