use crate::models::attendance::AttendanceRecord;
use crate::models::person::Person;
use crate::models::status::AttendanceStatus;
use crate::models::summary::MonthlySummary;
use chrono::Datelike;

/// Count one person's statuses over the records of one month.
pub fn summarize_person(
    person: &Person,
    year: i32,
    month: u32,
    records: &[AttendanceRecord],
    hours_per_day: u32,
) -> MonthlySummary {
    let mut s = MonthlySummary {
        person_id: person.id,
        display_name: person.display_name.clone(),
        year,
        month,
        ..Default::default()
    };

    for rec in records
        .iter()
        .filter(|r| r.person_id == person.id && r.date.year() == year && r.date.month() == month)
    {
        match rec.status {
            AttendanceStatus::OnSite => s.on_site += 1,
            AttendanceStatus::Remote => s.remote += 1,
            AttendanceStatus::OnLeave => s.on_leave += 1,
            AttendanceStatus::Holiday => s.holiday += 1,
            AttendanceStatus::Absent => s.absent += 1,
        }
        if rec.status.is_present() {
            s.working_days += 1;
        }
    }

    s.working_hours = s.working_days * hours_per_day;
    s.attendance_pct = attendance_pct(s.working_days, s.absent);
    s
}

/// `present / (present + absent)` as a percentage with 2 decimals.
pub fn attendance_pct(present: u32, absent: u32) -> f64 {
    let total = present + absent;
    if total == 0 {
        return 0.0;
    }
    let pct = present as f64 * 100.0 / total as f64;
    (pct * 100.0).round() / 100.0
}

pub fn summarize_month(
    people: &[Person],
    year: i32,
    month: u32,
    records: &[AttendanceRecord],
    hours_per_day: u32,
) -> Vec<MonthlySummary> {
    people
        .iter()
        .map(|p| summarize_person(p, year, month, records, hours_per_day))
        .collect()
}
