use serde::Serialize;

/// Per-person status counts over one calendar month.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MonthlySummary {
    pub person_id: i64,
    pub display_name: String,
    pub year: i32,
    pub month: u32,
    pub on_site: u32,
    pub remote: u32,
    pub on_leave: u32,
    pub holiday: u32,
    pub absent: u32,
    pub working_days: u32,
    pub working_hours: u32,
    pub attendance_pct: f64,
}
