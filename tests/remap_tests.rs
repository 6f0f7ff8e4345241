use rattendance::chat::patterns::ChatPatterns;
use rattendance::core::ingest::{IngestOptions, ingest_text};
use rattendance::core::remap::{resolve_all, resolve_unmatched_for_person};
use rattendance::db::attendance::{records_for_date, upsert_record};
use rattendance::db::log::load_log;
use rattendance::db::people::insert_person;
use rattendance::db::unmatched::{count_unresolved, list_unmatched};
use rattendance::models::attendance::AttendanceRecord;
use rattendance::models::person::Person;
use rattendance::models::source_tag::SourceTag;
use rattendance::models::status::AttendanceStatus;

mod common;
use common::{SAMPLE_CHAT, d, open_store, seed_people};

fn ingest(pool: &mut rattendance::db::pool::DbPool) {
    let options = IngestOptions {
        cutoff: d("2025-01-01"),
        dry_run: false,
    };
    let p = ChatPatterns::compile().unwrap();
    ingest_text(pool, SAMPLE_CHAT, &p, &options).unwrap();
}

#[test]
fn test_new_person_picks_up_logged_sender() {
    let mut pool = open_store("remap_new_person");
    seed_people(&pool);
    ingest(&mut pool);
    assert_eq!(count_unresolved(&pool.conn).unwrap(), 1);

    let mut sam = Person::new(0, "Samir Shah").with_alias("Stranger");
    sam.id = insert_person(&pool.conn, &sam).unwrap();

    let report = resolve_unmatched_for_person(&mut pool, &sam).unwrap();
    assert_eq!(report.matched, 1);
    assert_eq!(report.created, 1);
    assert_eq!(report.existing, 0);

    let rec = &records_for_date(&pool.conn, d("2025-03-12")).unwrap()[&sam.id];
    assert_eq!(rec.status, AttendanceStatus::OnSite);
    assert_eq!(rec.source, SourceTag::Ingested);
    assert_eq!(
        rec.in_time,
        Some(chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap())
    );

    assert_eq!(count_unresolved(&pool.conn).unwrap(), 0);
    let rows = list_unmatched(&pool.conn, true).unwrap();
    assert!(rows[0].resolved);

    assert_eq!(load_log(&pool.conn, Some("remap")).unwrap().len(), 1);
}

#[test]
fn test_existing_record_is_kept_but_row_resolved() {
    let mut pool = open_store("remap_existing");
    seed_people(&pool);
    ingest(&mut pool);

    let mut sam = Person::new(0, "Samir Shah").with_alias("Stranger");
    sam.id = insert_person(&pool.conn, &sam).unwrap();

    let manual = AttendanceRecord::manual(
        sam.id,
        d("2025-03-12"),
        None,
        None,
        AttendanceStatus::OnLeave,
        "sick".into(),
    );
    upsert_record(&pool.conn, &manual).unwrap();

    let report = resolve_unmatched_for_person(&mut pool, &sam).unwrap();
    assert_eq!(report.matched, 1);
    assert_eq!(report.created, 0);
    assert_eq!(report.existing, 1);

    let rec = &records_for_date(&pool.conn, d("2025-03-12")).unwrap()[&sam.id];
    assert_eq!(rec.status, AttendanceStatus::OnLeave);
    assert_eq!(rec.source, SourceTag::Manual);
    assert_eq!(count_unresolved(&pool.conn).unwrap(), 0);
}

#[test]
fn test_person_with_no_matching_rows_changes_nothing() {
    let mut pool = open_store("remap_nothing");
    seed_people(&pool);
    ingest(&mut pool);

    let mut nobody = Person::new(0, "Kiran");
    nobody.id = insert_person(&pool.conn, &nobody).unwrap();

    let report = resolve_unmatched_for_person(&mut pool, &nobody).unwrap();
    assert!(report.is_empty());
    assert_eq!(count_unresolved(&pool.conn).unwrap(), 1);
    assert!(load_log(&pool.conn, Some("remap")).unwrap().is_empty());
}

#[test]
fn test_inactive_person_resolves_nothing() {
    let mut pool = open_store("remap_inactive");
    seed_people(&pool);
    ingest(&mut pool);

    let mut sam = Person::new(0, "Stranger");
    sam.is_active = false;
    sam.id = insert_person(&pool.conn, &sam).unwrap();

    let report = resolve_unmatched_for_person(&mut pool, &sam).unwrap();
    assert!(report.is_empty());
    assert_eq!(count_unresolved(&pool.conn).unwrap(), 1);
}

#[test]
fn test_resolve_all_runs_over_directory() {
    let mut pool = open_store("remap_all");
    seed_people(&pool);
    ingest(&mut pool);

    // inserted straight into the store, no re-match yet
    let sam_id = insert_person(&pool.conn, &Person::new(0, "stranger")).unwrap();

    let reports = resolve_all(&mut pool).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].person_id, sam_id);
    assert_eq!(reports[0].created, 1);

    // second pass finds nothing left to do
    assert!(resolve_all(&mut pool).unwrap().is_empty());
}
