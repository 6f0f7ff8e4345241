use serde::Serialize;
use std::fmt;

/// Final attendance state of one person on one date.
/// Exactly one holds per (person, date).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    OnSite,  // O
    Remote,  // R
    OnLeave, // L
    Holiday, // H
    Absent,  // A
}

impl AttendanceStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::OnSite => "on_site",
            AttendanceStatus::Remote => "remote",
            AttendanceStatus::OnLeave => "on_leave",
            AttendanceStatus::Holiday => "holiday",
            AttendanceStatus::Absent => "absent",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "on_site" => Some(AttendanceStatus::OnSite),
            "remote" => Some(AttendanceStatus::Remote),
            "on_leave" => Some(AttendanceStatus::OnLeave),
            "holiday" => Some(AttendanceStatus::Holiday),
            "absent" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }

    /// Helper: accept either the one-letter code or the DB name from the CLI.
    pub fn from_code(code: &str) -> Option<Self> {
        let upper = code.trim().to_uppercase();
        match upper.as_str() {
            "O" => Some(AttendanceStatus::OnSite),
            "R" => Some(AttendanceStatus::Remote),
            "L" => Some(AttendanceStatus::OnLeave),
            "H" => Some(AttendanceStatus::Holiday),
            "A" => Some(AttendanceStatus::Absent),
            _ => Self::from_db_str(&code.trim().to_lowercase()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::OnSite => "On-site",
            AttendanceStatus::Remote => "Remote",
            AttendanceStatus::OnLeave => "On leave",
            AttendanceStatus::Holiday => "Holiday",
            AttendanceStatus::Absent => "Absent",
        }
    }

    /// Present means a check-in was seen (on-site or remote).
    pub fn is_present(&self) -> bool {
        matches!(self, AttendanceStatus::OnSite | AttendanceStatus::Remote)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
