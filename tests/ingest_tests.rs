use chrono::NaiveDate;
use rattendance::chat::patterns::ChatPatterns;
use rattendance::config::Config;
use rattendance::core::ingest::{IngestOptions, ingest_text};
use rattendance::core::ports::{Directory, Ledger};
use rattendance::db::attendance::{records_for_date, upsert_record};
use rattendance::db::calendar::{decide_leave, insert_holiday, insert_leave};
use rattendance::db::log::load_log;
use rattendance::db::unmatched::list_unmatched;
use rattendance::errors::{AppError, AppResult};
use rattendance::models::attendance::AttendanceRecord;
use rattendance::models::holiday::Holiday;
use rattendance::models::leave::{Leave, LeaveStatus};
use rattendance::models::person::Person;
use rattendance::models::source_tag::SourceTag;
use rattendance::models::status::AttendanceStatus;
use rattendance::models::unmatched::UnmatchedLogEntry;
use std::cell::Cell;
use std::collections::{HashMap, HashSet};

mod common;
use common::{SAMPLE_CHAT, d, open_store, seed_people};

fn opts(dry_run: bool) -> IngestOptions {
    IngestOptions {
        cutoff: d("2025-01-01"),
        dry_run,
    }
}

fn patterns() -> ChatPatterns {
    ChatPatterns::compile().expect("patterns compile")
}

fn t(s: &str) -> chrono::NaiveTime {
    chrono::NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

#[test]
fn test_ingest_sample_end_to_end() {
    let mut pool = open_store("ingest_e2e");
    let (asha, ravi, meera) = seed_people(&pool);

    let report = ingest_text(&mut pool, SAMPLE_CHAT, &patterns(), &opts(false)).unwrap();

    assert_eq!(report.dates_seen, 3);
    assert_eq!(report.dates_skipped, 1);
    assert_eq!(report.dates_processed, 2);
    assert_eq!(report.inserted, 6);
    assert_eq!(report.unmatched_logged, 1);

    let day = records_for_date(&pool.conn, d("2025-03-12")).unwrap();
    assert_eq!(day.len(), 3);

    let a = &day[&asha];
    assert_eq!(a.status, AttendanceStatus::Remote);
    assert_eq!(a.in_time, Some(t("09:05")));
    assert_eq!(a.source, SourceTag::Ingested);

    let r = &day[&ravi];
    assert_eq!(r.status, AttendanceStatus::OnSite);
    assert_eq!(r.in_time, Some(t("09:10")));
    assert_eq!(r.out_time, Some(t("18:05")), "stated time wins, last check-out kept");

    assert_eq!(day[&meera].status, AttendanceStatus::Absent);

    let next = records_for_date(&pool.conn, d("2025-03-13")).unwrap();
    assert_eq!(next[&asha].status, AttendanceStatus::OnSite);
    assert_eq!(next[&asha].out_time, Some(t("18:00")));
    assert_eq!(next[&ravi].status, AttendanceStatus::Absent);

    // nothing before the cutoff reached the ledger
    assert!(records_for_date(&pool.conn, d("2024-01-01")).unwrap().is_empty());

    let unmatched = list_unmatched(&pool.conn, true).unwrap();
    assert_eq!(unmatched.len(), 1);
    assert_eq!(unmatched[0].sender_label, "Stranger");
    assert_eq!(unmatched[0].in_time, Some(t("10:00")));
    assert!(!unmatched[0].resolved);

    // one audit row per committed date
    let log = load_log(&pool.conn, Some("ingest")).unwrap();
    assert_eq!(log.len(), 2);
}

#[test]
fn test_second_run_is_a_no_op() {
    let mut pool = open_store("ingest_idempotent");
    seed_people(&pool);
    let p = patterns();

    ingest_text(&mut pool, SAMPLE_CHAT, &p, &opts(false)).unwrap();
    let again = ingest_text(&mut pool, SAMPLE_CHAT, &p, &opts(false)).unwrap();

    assert_eq!(again.inserted, 0);
    assert_eq!(again.updated, 0);
    assert_eq!(again.unchanged, 6);
    assert_eq!(again.unmatched_logged, 0);
    assert_eq!(again.unmatched_known, 1);
    assert_eq!(again.writes(), 0);

    // no extra audit rows either
    assert_eq!(load_log(&pool.conn, Some("ingest")).unwrap().len(), 2);
    assert_eq!(list_unmatched(&pool.conn, true).unwrap().len(), 1);
}

#[test]
fn test_manual_present_record_is_protected() {
    let mut pool = open_store("ingest_protected");
    let (_, _, meera) = seed_people(&pool);

    let manual = AttendanceRecord::manual(
        meera,
        d("2025-03-12"),
        Some(t("08:30")),
        None,
        AttendanceStatus::OnSite,
        "badge swipe".into(),
    );
    upsert_record(&pool.conn, &manual).unwrap();

    let report = ingest_text(&mut pool, SAMPLE_CHAT, &patterns(), &opts(false)).unwrap();
    assert_eq!(report.protected, 1);

    let rec = &records_for_date(&pool.conn, d("2025-03-12")).unwrap()[&meera];
    assert_eq!(rec.status, AttendanceStatus::OnSite);
    assert_eq!(rec.source, SourceTag::Manual);
    assert_eq!(rec.in_time, Some(t("08:30")));
    assert_eq!(rec.remarks, "badge swipe");
}

#[test]
fn test_manual_absent_record_is_overwritten() {
    let mut pool = open_store("ingest_absent_overwrite");
    let (asha, _, _) = seed_people(&pool);

    let manual = AttendanceRecord::manual(
        asha,
        d("2025-03-12"),
        None,
        None,
        AttendanceStatus::Absent,
        "no show".into(),
    );
    upsert_record(&pool.conn, &manual).unwrap();

    let report = ingest_text(&mut pool, SAMPLE_CHAT, &patterns(), &opts(false)).unwrap();
    assert_eq!(report.updated, 1);
    assert_eq!(report.protected, 0);

    let rec = &records_for_date(&pool.conn, d("2025-03-12")).unwrap()[&asha];
    assert_eq!(rec.status, AttendanceStatus::Remote);
    assert_eq!(rec.source, SourceTag::Ingested);
    assert_eq!(rec.remarks, "no show", "remarks survive an update");
}

#[test]
fn test_holiday_beats_leave_beats_presence() {
    let mut pool = open_store("ingest_precedence");
    let (asha, _, meera) = seed_people(&pool);

    insert_holiday(
        &pool.conn,
        &Holiday {
            id: 0,
            date: d("2025-03-13"),
            name: "Founders Day".into(),
            description: String::new(),
            optional: false,
        },
    )
    .unwrap();

    let leave_id = insert_leave(
        &pool.conn,
        &Leave {
            id: 0,
            person_id: meera,
            start_date: d("2025-03-12"),
            end_date: d("2025-03-13"),
            reason: "family".into(),
            leave_type: "casual".into(),
            status: LeaveStatus::Pending,
            admin_remarks: String::new(),
        },
    )
    .unwrap();
    decide_leave(&pool.conn, leave_id, LeaveStatus::Approved, "ok").unwrap();

    ingest_text(&mut pool, SAMPLE_CHAT, &patterns(), &opts(false)).unwrap();

    let first = records_for_date(&pool.conn, d("2025-03-12")).unwrap();
    assert_eq!(first[&meera].status, AttendanceStatus::OnLeave);
    assert_eq!(first[&asha].status, AttendanceStatus::Remote);

    let second = records_for_date(&pool.conn, d("2025-03-13")).unwrap();
    assert_eq!(second[&meera].status, AttendanceStatus::Holiday);
    // checked in on a holiday, still a holiday
    assert_eq!(second[&asha].status, AttendanceStatus::Holiday);
    assert_eq!(second[&asha].in_time, Some(t("09:45")));
}

#[test]
fn test_pending_leave_is_ignored() {
    let mut pool = open_store("ingest_pending_leave");
    let (_, _, meera) = seed_people(&pool);

    insert_leave(
        &pool.conn,
        &Leave {
            id: 0,
            person_id: meera,
            start_date: d("2025-03-12"),
            end_date: d("2025-03-12"),
            reason: String::new(),
            leave_type: "casual".into(),
            status: LeaveStatus::Pending,
            admin_remarks: String::new(),
        },
    )
    .unwrap();

    ingest_text(&mut pool, SAMPLE_CHAT, &patterns(), &opts(false)).unwrap();

    let day = records_for_date(&pool.conn, d("2025-03-12")).unwrap();
    assert_eq!(day[&meera].status, AttendanceStatus::Absent);
}

#[test]
fn test_dry_run_writes_nothing() {
    let mut pool = open_store("ingest_dry_run");
    seed_people(&pool);

    let report = ingest_text(&mut pool, SAMPLE_CHAT, &patterns(), &opts(true)).unwrap();
    assert_eq!(report.inserted, 6);
    assert_eq!(report.unmatched_logged, 1);

    assert!(records_for_date(&pool.conn, d("2025-03-12")).unwrap().is_empty());
    assert!(list_unmatched(&pool.conn, true).unwrap().is_empty());
    assert!(load_log(&pool.conn, Some("ingest")).unwrap().is_empty());
}

#[test]
fn test_inactive_person_is_neither_matched_nor_recorded() {
    let mut pool = open_store("ingest_inactive");
    let (asha, _, _) = seed_people(&pool);
    rattendance::db::people::set_active(&pool.conn, asha, false).unwrap();

    let report = ingest_text(&mut pool, SAMPLE_CHAT, &patterns(), &opts(false)).unwrap();

    let day = records_for_date(&pool.conn, d("2025-03-12")).unwrap();
    assert!(!day.contains_key(&asha));
    // her label is now an unmatched sender on both days
    assert_eq!(report.unmatched_logged, 3);
}

/// Store that counts every call; used to prove the cutoff short-circuits.
#[derive(Default)]
struct CountingStore {
    calls: Cell<usize>,
}

impl CountingStore {
    fn hit(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl Directory for CountingStore {
    fn active_people(&self) -> AppResult<Vec<Person>> {
        self.hit();
        Ok(Vec::new())
    }

    fn is_holiday(&self, _date: NaiveDate) -> AppResult<bool> {
        self.hit();
        Ok(false)
    }

    fn approved_leave_holders(&self, _date: NaiveDate) -> AppResult<HashSet<i64>> {
        self.hit();
        Ok(HashSet::new())
    }
}

impl Ledger for CountingStore {
    fn records_for_date(&self, _date: NaiveDate) -> AppResult<HashMap<i64, AttendanceRecord>> {
        self.hit();
        Ok(HashMap::new())
    }

    fn unmatched_senders_for_date(&self, _date: NaiveDate) -> AppResult<HashSet<String>> {
        self.hit();
        Ok(HashSet::new())
    }

    fn commit_day(
        &mut self,
        _date: NaiveDate,
        _records: &[AttendanceRecord],
        _unmatched: &[UnmatchedLogEntry],
    ) -> AppResult<()> {
        self.hit();
        Ok(())
    }

    fn unresolved_unmatched(&self) -> AppResult<Vec<UnmatchedLogEntry>> {
        self.hit();
        Ok(Vec::new())
    }

    fn commit_resolution(
        &mut self,
        _person: &Person,
        _records: &[AttendanceRecord],
        _resolved_ids: &[i64],
    ) -> AppResult<()> {
        self.hit();
        Ok(())
    }
}

#[test]
fn test_dates_before_cutoff_never_touch_the_store() {
    let mut store = CountingStore::default();
    let options = IngestOptions {
        cutoff: d("2030-01-01"),
        dry_run: false,
    };

    let report = ingest_text(&mut store, SAMPLE_CHAT, &patterns(), &options).unwrap();

    assert_eq!(store.calls.get(), 0);
    assert_eq!(report.dates_seen, 3);
    assert_eq!(report.dates_skipped, 3);
    assert_eq!(report.dates_processed, 0);
}

#[test]
fn test_missing_or_bad_cutoff_is_a_config_error() {
    let cfg = Config {
        cutoff_date: None,
        ..Config::default()
    };
    assert!(matches!(
        IngestOptions::from_config(&cfg, None, false),
        Err(AppError::Config(_))
    ));

    let cfg = Config {
        cutoff_date: Some("March 2025".into()),
        ..Config::default()
    };
    assert!(matches!(
        IngestOptions::from_config(&cfg, None, false),
        Err(AppError::Config(_))
    ));

    // --since wins over the config value
    let o = IngestOptions::from_config(&cfg, Some("2025-02-01"), true).unwrap();
    assert_eq!(o.cutoff, d("2025-02-01"));
    assert!(o.dry_run);
}

#[test]
fn test_bracketed_export_with_alias_and_unknown_sender() {
    let mut pool = open_store("ingest_bracketed");
    let john = pool_add(&pool, Person::new(0, "John Doe").with_alias("John D."));

    let chat = "\
[05/02/2026, 09:05 AM] John D.: in, WFH today
[05/02/2026, 09:20 AM] Unknown Person: in
[05/02/2026, 06:00 PM] John D.: out
[05/02/2026, 06:30 PM] John D.: out
";
    let options = IngestOptions {
        cutoff: d("2026-01-01"),
        dry_run: false,
    };

    let report = ingest_text(&mut pool, chat, &patterns(), &options).unwrap();
    assert_eq!(report.inserted, 1);
    assert_eq!(report.unmatched_logged, 1);
    assert_eq!(report.writes(), 2);

    let day = records_for_date(&pool.conn, d("2026-02-05")).unwrap();
    assert_eq!(day.len(), 1, "no record for the unknown sender");
    let rec = &day[&john];
    assert_eq!(rec.status, AttendanceStatus::Remote);
    assert_eq!(rec.in_time, Some(t("09:05")));
    assert_eq!(rec.out_time, Some(t("18:30")));

    let unmatched = list_unmatched(&pool.conn, true).unwrap();
    assert_eq!(unmatched.len(), 1);
    assert_eq!(unmatched[0].sender_label, "Unknown Person");
    assert_eq!(unmatched[0].date, d("2026-02-05"));

    let again = ingest_text(&mut pool, chat, &patterns(), &options).unwrap();
    assert_eq!(again.writes(), 0);
}

#[test]
fn test_chatter_label_does_not_mark_alias_person_absent() {
    let mut pool = open_store("ingest_alias_priority");
    let john = pool_add(&pool, Person::new(0, "John").with_alias("John D."));

    let chat = "\
05/02/2026, 08:55 - John: hello everyone
05/02/2026, 09:05 - John D.: in
";
    let options = IngestOptions {
        cutoff: d("2026-01-01"),
        dry_run: false,
    };

    let report = ingest_text(&mut pool, chat, &patterns(), &options).unwrap();

    let day = records_for_date(&pool.conn, d("2026-02-05")).unwrap();
    assert_eq!(day[&john].status, AttendanceStatus::OnSite);
    assert_eq!(day[&john].in_time, Some(t("09:05")));

    // the leftover label is logged for review
    assert_eq!(report.unmatched_logged, 1);
    assert_eq!(list_unmatched(&pool.conn, true).unwrap()[0].sender_label, "John");
}

fn pool_add(pool: &rattendance::db::pool::DbPool, p: Person) -> i64 {
    rattendance::db::people::insert_person(&pool.conn, &p).expect("insert person")
}
