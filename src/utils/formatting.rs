//! Formatting utilities used for CLI outputs.

use crate::models::status::AttendanceStatus;
use crate::utils::colors::{BLUE, CYAN, GREEN, GREY, MAGENTA, RED, RESET, YELLOW};

pub fn mins2readable(mins: i64) -> String {
    format!("{:02}h {:02}m", mins / 60, mins % 60)
}

/// ANSI color for a status code in listings.
pub fn status_color(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::OnSite => GREEN,
        AttendanceStatus::Remote => CYAN,
        AttendanceStatus::OnLeave => YELLOW,
        AttendanceStatus::Holiday => MAGENTA,
        AttendanceStatus::Absent => RED,
    }
}

pub fn colorize_status(status: AttendanceStatus) -> String {
    format!("{}{}{}", status_color(status), status.label(), RESET)
}

pub fn active_flag(active: bool) -> String {
    if active {
        format!("{BLUE}active{RESET}")
    } else {
        format!("{GREY}inactive{RESET}")
    }
}

pub fn or_dash(v: Option<&str>) -> String {
    match v {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => format!("{GREY}-{RESET}"),
    }
}
