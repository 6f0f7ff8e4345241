//! Chat line parser: one raw export line → one `RawEvent`, or a reason to skip it.
//!
//! Best effort by contract: malformed dates/times are skipped, never raised.

use crate::chat::patterns::ChatPatterns;
use crate::models::raw_event::RawEvent;
use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

const DATE_FORMATS: [&str; 2] = ["%d/%m/%y", "%d/%m/%Y"];

const TIME_FORMATS: [&str; 6] = [
    "%I:%M:%S %p",
    "%I:%M %p",
    "%H:%M:%S",
    "%H:%M",
    "%I:%M:%S%p",
    "%I:%M%p",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    NoMatch,
    SystemNotice,
    BadTimestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Event(RawEvent),
    Skipped(SkipReason),
}

pub fn parse_line(line: &str, patterns: &ChatPatterns) -> ParsedLine {
    let line = line
        .trim()
        .trim_start_matches(['\u{feff}', '\u{200e}'])
        .trim();

    if line.is_empty() {
        return ParsedLine::Skipped(SkipReason::Blank);
    }

    let Some(caps) = patterns.message.captures(line) else {
        return ParsedLine::Skipped(SkipReason::NoMatch);
    };

    let date_str = caps.get(1).map_or("", |m| m.as_str()).trim();
    let time_str = caps.get(2).map_or("", |m| m.as_str()).trim();
    let sender = caps.get(3).map_or("", |m| m.as_str()).trim();
    let message = caps.get(4).map_or("", |m| m.as_str()).trim();

    if patterns.is_system_sender(sender) {
        debug!(sender, "skipping system notice");
        return ParsedLine::Skipped(SkipReason::SystemNotice);
    }

    match (parse_chat_date(date_str), parse_chat_time(time_str)) {
        (Some(date), Some(time)) => ParsedLine::Event(RawEvent {
            date,
            time,
            sender: sender.to_string(),
            message: message.to_string(),
        }),
        _ => {
            debug!(date = date_str, time = time_str, "unparseable timestamp");
            ParsedLine::Skipped(SkipReason::BadTimestamp)
        }
    }
}

/// Day-first date with 2- or 4-digit year (`5/2/26`, `05/02/2026`).
pub fn parse_chat_date(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.split('/').collect();

    if parts.len() >= 3
        && let (Ok(d), Ok(m), Ok(y)) = (
            parts[0].trim().parse::<u32>(),
            parts[1].trim().parse::<u32>(),
            parts[2].trim().parse::<i32>(),
        )
    {
        let y = if y < 100 { y + 2000 } else { y };
        if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
            return Some(date);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw.trim(), fmt) {
            return Some(date);
        }
    }

    debug!(raw, "could not parse date");
    None
}

/// `H:MM[:SS]` with optional AM/PM marker; `.` accepted as separator.
/// Without a marker the value is read as 24-hour time.
pub fn parse_chat_time(raw: &str) -> Option<NaiveTime> {
    let upper = raw.to_uppercase();
    let replaced: String = upper
        .chars()
        .map(|c| {
            if c.is_ascii_digit() || c.is_ascii_uppercase() || c == ':' || c == '.' {
                c
            } else {
                ' '
            }
        })
        .collect();
    let cleaned = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let colon_time = cleaned.replace('.', ":");

    if let Some(t) = parse_clock_fields(&colon_time) {
        return Some(t);
    }

    for fmt in TIME_FORMATS {
        if let Ok(t) = NaiveTime::parse_from_str(&cleaned, fmt) {
            return Some(t);
        }
    }

    if colon_time != cleaned {
        for fmt in TIME_FORMATS {
            if let Ok(t) = NaiveTime::parse_from_str(&colon_time, fmt) {
                return Some(t);
            }
        }
    }

    debug!(raw, cleaned = %cleaned, "could not parse time");
    None
}

fn parse_clock_fields(colon_time: &str) -> Option<NaiveTime> {
    let is_pm = colon_time.contains("PM");
    let is_am = colon_time.contains("AM");
    let time_only = colon_time.replace("AM", "").replace("PM", "");
    let parts: Vec<&str> = time_only.trim().split(':').collect();

    if parts.len() < 2 {
        return None;
    }

    let mut h: u32 = parts[0].trim().parse().ok()?;
    let m: u32 = parts[1].trim().parse().ok()?;
    let s: u32 = match parts.get(2) {
        Some(p) => p.trim().parse().ok()?,
        None => 0,
    };

    if h > 23 || m > 59 || s > 59 {
        return None;
    }

    if is_pm && h < 12 {
        h += 12;
    }
    if is_am && h == 12 {
        h = 0;
    }

    NaiveTime::from_hms_opt(h, m, s)
}
