//! Time utilities for CLI arguments.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

/// `HH:MM` or `HH:MM:SS`.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Worked span between check-in and check-out, when both exist and are ordered.
pub fn worked_minutes(in_time: Option<NaiveTime>, out_time: Option<NaiveTime>) -> Option<i64> {
    match (in_time, out_time) {
        (Some(i), Some(o)) if o > i => Some((o - i).num_minutes()),
        _ => None,
    }
}
