//! Reconciliation engine: turns a per-day sheet into ledger writes.

use crate::chat::aggregate::AttendanceSheet;
use crate::chat::patterns::ChatPatterns;
use crate::chat::{LineStats, build_sheet};
use crate::config::Config;
use crate::core::matcher::match_day;
use crate::core::ports::{Directory, Ledger};
use crate::core::reconcile::{Computed, Outcome, compute_status, reconcile};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::person::Person;
use crate::models::unmatched::UnmatchedLogEntry;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Dates strictly before this are ignored.
    pub cutoff: NaiveDate,
    pub dry_run: bool,
}

impl IngestOptions {
    /// Resolve the cutoff from `--since` or the config file; fails when neither is usable.
    pub fn from_config(cfg: &Config, since: Option<&str>, dry_run: bool) -> AppResult<Self> {
        let raw = since
            .map(str::to_string)
            .or_else(|| cfg.cutoff_date.clone())
            .ok_or_else(|| {
                AppError::Config(
                    "cutoff_date is not set: add it to the config file or pass --since".into(),
                )
            })?;

        let cutoff = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            AppError::Config(format!("cutoff_date '{}' is not a YYYY-MM-DD date", raw))
        })?;

        Ok(Self { cutoff, dry_run })
    }
}

#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct DayReport {
    pub date: NaiveDate,
    pub senders: usize,
    pub matched: usize,
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub protected: usize,
    pub unmatched_logged: usize,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct IngestReport {
    pub lines: LineStats,
    pub dates_seen: usize,
    pub dates_skipped: usize,
    pub dates_processed: usize,
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub protected: usize,
    pub unmatched_logged: usize,
    pub unmatched_known: usize,
    pub days: Vec<DayReport>,
}

impl IngestReport {
    /// Rows that reached (or would reach) the database.
    pub fn writes(&self) -> usize {
        self.inserted + self.updated + self.unmatched_logged
    }

    fn absorb(&mut self, day: &DayReport) {
        self.dates_processed += 1;
        self.inserted += day.inserted;
        self.updated += day.updated;
        self.unchanged += day.unchanged;
        self.protected += day.protected;
        self.unmatched_logged += day.unmatched_logged;
    }
}

/// Parse `text` and reconcile it against the store.
pub fn ingest_text<S>(
    store: &mut S,
    text: &str,
    patterns: &ChatPatterns,
    options: &IngestOptions,
) -> AppResult<IngestReport>
where
    S: Directory + Ledger,
{
    let (sheet, lines) = build_sheet(text, patterns);
    let mut report = ingest_sheet(store, &sheet, options)?;
    report.lines = lines;
    Ok(report)
}

pub fn ingest_sheet<S>(
    store: &mut S,
    sheet: &AttendanceSheet,
    options: &IngestOptions,
) -> AppResult<IngestReport>
where
    S: Directory + Ledger,
{
    let mut report = IngestReport {
        dates_seen: sheet.len(),
        ..Default::default()
    };

    // 1) cutoff first: nothing below it touches the store
    let in_scope: Vec<NaiveDate> = sheet
        .dates()
        .into_iter()
        .filter(|d| *d >= options.cutoff)
        .collect();
    report.dates_skipped = report.dates_seen - in_scope.len();

    if in_scope.is_empty() {
        info!(cutoff = %options.cutoff, "no dates at or after cutoff");
        return Ok(report);
    }

    // 2) directory snapshot, once per run
    let people = store.active_people()?;

    for date in in_scope {
        let day = process_day(store, sheet, &people, date, options, &mut report)?;
        report.absorb(&day);
        report.days.push(day);
    }

    Ok(report)
}

fn process_day<S>(
    store: &mut S,
    sheet: &AttendanceSheet,
    people: &[Person],
    date: NaiveDate,
    options: &IngestOptions,
    report: &mut IngestReport,
) -> AppResult<DayReport>
where
    S: Directory + Ledger,
{
    let Some(entries) = sheet.day(&date) else {
        return Ok(DayReport {
            date,
            ..Default::default()
        });
    };

    info!(%date, senders = entries.len(), "processing day");

    // batch reads for the whole date
    let holiday = store.is_holiday(date)?;
    let on_leave = store.approved_leave_holders(date)?;
    let existing = store.records_for_date(date)?;
    let already_logged = store.unmatched_senders_for_date(date)?;

    let matches = match_day(entries, people);
    for (label, strategy) in &matches.strategies {
        debug!(%date, label = label.as_str(), via = strategy.as_str(), "sender matched");
    }

    let mut day = DayReport {
        date,
        senders: entries.len(),
        matched: matches.by_person.len(),
        ..Default::default()
    };
    let mut writes: Vec<AttendanceRecord> = Vec::new();

    for person in people {
        let entry = matches
            .label_for(person.id)
            .and_then(|label| entries.get(label));

        let status = compute_status(holiday, on_leave.contains(&person.id), entry);
        let computed = Computed::new(person.id, date, status, entry);

        match reconcile(existing.get(&person.id), computed) {
            Outcome::Insert(rec) => {
                day.inserted += 1;
                writes.push(rec);
            }
            Outcome::Update(rec) => {
                day.updated += 1;
                writes.push(rec);
            }
            Outcome::Unchanged => day.unchanged += 1,
            Outcome::Protected => {
                debug!(person = person.id, %date, "existing record protected");
                day.protected += 1;
            }
        }
    }

    let mut unmatched: Vec<UnmatchedLogEntry> = Vec::new();
    for label in &matches.unclaimed {
        if already_logged.contains(label) {
            report.unmatched_known += 1;
            continue;
        }
        if let Some(entry) = entries.get(label) {
            unmatched.push(UnmatchedLogEntry::from_entry(date, entry));
        }
    }
    day.unmatched_logged = unmatched.len();

    if !options.dry_run && (!writes.is_empty() || !unmatched.is_empty()) {
        store.commit_day(date, &writes, &unmatched)?;
    }

    Ok(day)
}
