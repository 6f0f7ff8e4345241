mod common;

use common::{SAMPLE_CHAT, init_db_cli, rat, setup_test_db, write_chat};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;

/// Fresh DB with the three sample people added through the CLI.
fn db_with_people(name: &str) -> String {
    let db_path = setup_test_db(name);
    init_db_cli(&db_path);

    rat()
        .args(["--db", &db_path, "people", "add", "Asha Rao"])
        .assert()
        .success()
        .stdout(contains("Added #1 Asha Rao"));

    rat()
        .args([
            "--db",
            &db_path,
            "people",
            "add",
            "Ravi Kumar",
            "--phone",
            "+91 98765 43210",
        ])
        .assert()
        .success();

    rat()
        .args(["--db", &db_path, "people", "add", "Meera"])
        .assert()
        .success();

    db_path
}

fn ingest(db_path: &str, chat: &str) -> assert_cmd::assert::Assert {
    rat()
        .args([
            "--db",
            db_path,
            "ingest",
            "--file",
            chat,
            "--since",
            "2025-01-01",
        ])
        .assert()
}

#[test]
fn test_init_applies_migrations() {
    let db_path = setup_test_db("cli_init");

    rat()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Migration applied"))
        .stdout(contains(db_path.as_str()));

    // second init finds nothing left to apply
    rat()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Migration applied").not());
}

#[test]
fn test_ingest_then_rerun_is_idempotent() {
    let db_path = db_with_people("cli_ingest");
    let chat = write_chat("cli_ingest", SAMPLE_CHAT);

    ingest(&db_path, &chat)
        .success()
        .stdout(contains("Dates: 3 seen, 1 before cutoff, 2 processed"))
        .stdout(contains("Records: 6 inserted, 0 updated, 0 unchanged, 0 protected"))
        .stdout(contains("Unmatched senders: 1 new, 0 already logged"));

    ingest(&db_path, &chat)
        .success()
        .stdout(contains("Records: 0 inserted, 0 updated, 6 unchanged, 0 protected"))
        .stdout(contains("Unmatched senders: 0 new, 1 already logged"))
        .stdout(contains("Nothing new to write."));
}

#[test]
fn test_ingest_dry_run_with_details() {
    let db_path = db_with_people("cli_dry_run");
    let chat = write_chat("cli_dry_run", SAMPLE_CHAT);

    rat()
        .args([
            "--db", &db_path, "ingest", "--file", &chat, "--since", "2025-01-01", "--dry-run",
            "--details",
        ])
        .assert()
        .success()
        .stdout(contains("dry run"))
        .stdout(contains("2025-03-12"))
        .stdout(contains("2025-03-13"));

    rat()
        .args(["--db", &db_path, "attendance", "list", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(contains("No attendance records"));
}

#[test]
fn test_ingest_requires_a_source() {
    let db_path = db_with_people("cli_no_source");

    rat()
        .args(["--db", &db_path, "ingest", "--since", "2025-01-01"])
        .assert()
        .failure()
        .stderr(contains("nothing to ingest"));
}

#[test]
fn test_ingest_missing_file_fails() {
    let db_path = db_with_people("cli_missing_file");

    ingest(&db_path, "/definitely/not/here/chat.txt")
        .failure()
        .stderr(contains("Chat export not found"));
}

#[test]
fn test_attendance_list_shows_ingested_rows() {
    let db_path = db_with_people("cli_attendance_list");
    let chat = write_chat("cli_attendance_list", SAMPLE_CHAT);
    ingest(&db_path, &chat).success();

    rat()
        .args(["--db", &db_path, "attendance", "list", "-p", "2025-03-12"])
        .assert()
        .success()
        .stdout(contains("Asha Rao"))
        .stdout(contains("Remote"))
        .stdout(contains("Ravi Kumar"))
        .stdout(contains("18:05"))
        .stdout(contains("ingested"));

    rat()
        .args([
            "--db", &db_path, "attendance", "list", "-p", "2025-03", "--person", "3",
        ])
        .assert()
        .success()
        .stdout(contains("Meera"))
        .stdout(contains("Asha Rao").not());
}

#[test]
fn test_manual_set_survives_ingest() {
    let db_path = db_with_people("cli_manual_set");
    let chat = write_chat("cli_manual_set", SAMPLE_CHAT);

    rat()
        .args([
            "--db",
            &db_path,
            "attendance",
            "set",
            "3",
            "2025-03-12",
            "--status",
            "O",
            "--in",
            "08:30",
            "--remarks",
            "visitor badge",
        ])
        .assert()
        .success()
        .stdout(contains("Meera on 2025-03-12: On-site (manual)"));

    ingest(&db_path, &chat)
        .success()
        .stdout(contains("1 protected"));

    rat()
        .args(["--db", &db_path, "attendance", "list", "-p", "2025-03-12", "--person", "3"])
        .assert()
        .success()
        .stdout(contains("manual"))
        .stdout(contains("visitor badge"));
}

#[test]
fn test_attendance_set_rejects_unknown_status() {
    let db_path = db_with_people("cli_bad_status");

    rat()
        .args([
            "--db", &db_path, "attendance", "set", "1", "2025-03-12", "--status", "X",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid attendance status"));
}

#[test]
fn test_unknown_person_is_reported() {
    let db_path = db_with_people("cli_unknown_person");

    rat()
        .args([
            "--db", &db_path, "attendance", "set", "42", "2025-03-12", "--status", "A",
        ])
        .assert()
        .failure()
        .stderr(contains("Person not found: 42"));
}

#[test]
fn test_adding_person_resolves_unmatched_sender() {
    let db_path = db_with_people("cli_remap");
    let chat = write_chat("cli_remap", SAMPLE_CHAT);
    ingest(&db_path, &chat).success();

    rat()
        .args(["--db", &db_path, "unmatched", "list"])
        .assert()
        .success()
        .stdout(contains("Stranger"));

    rat()
        .args(["--db", &db_path, "people", "add", "Samir Shah", "--alias", "Stranger"])
        .assert()
        .success()
        .stdout(contains("Resolved 1 unmatched sender row(s): 1 record(s) created"));

    rat()
        .args(["--db", &db_path, "unmatched", "list"])
        .assert()
        .success()
        .stdout(contains("No unmatched senders."));

    rat()
        .args(["--db", &db_path, "attendance", "list", "-p", "2025-03-12", "--person", "4"])
        .assert()
        .success()
        .stdout(contains("Samir Shah"));
}

#[test]
fn test_unmatched_resolve_after_direct_edit() {
    let db_path = db_with_people("cli_unmatched_resolve");
    let chat = write_chat("cli_unmatched_resolve", SAMPLE_CHAT);
    ingest(&db_path, &chat).success();

    rat()
        .args(["--db", &db_path, "unmatched", "resolve"])
        .assert()
        .success()
        .stdout(contains("No pending sender matches anyone"));

    // editing Meera's alias re-matches on the spot
    rat()
        .args(["--db", &db_path, "people", "edit", "3", "--alias", "Stranger"])
        .assert()
        .success()
        .stdout(contains("Resolved 1 unmatched sender row(s)"))
        .stdout(contains("0 record(s) created, 1 already present"));
}

#[test]
fn test_people_deactivate_and_list() {
    let db_path = db_with_people("cli_people");

    rat()
        .args(["--db", &db_path, "people", "deactivate", "2"])
        .assert()
        .success()
        .stdout(contains("Deactivated #2 Ravi Kumar"));

    rat()
        .args(["--db", &db_path, "people", "list"])
        .assert()
        .success()
        .stdout(contains("Asha Rao"))
        .stdout(contains("Ravi Kumar").not());

    rat()
        .args(["--db", &db_path, "people", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("Ravi Kumar"));
}

#[test]
fn test_people_edit_clears_phone_with_empty_value() {
    let db_path = db_with_people("cli_people_clear");

    rat()
        .args(["--db", &db_path, "people", "list"])
        .assert()
        .success()
        .stdout(contains("98765"));

    rat()
        .args(["--db", &db_path, "people", "edit", "2", "--phone", ""])
        .assert()
        .success()
        .stdout(contains("Updated #2 Ravi Kumar"));

    rat()
        .args(["--db", &db_path, "people", "list"])
        .assert()
        .success()
        .stdout(contains("Ravi Kumar"))
        .stdout(contains("98765").not());
}

#[test]
fn test_holiday_flow() {
    let db_path = db_with_people("cli_holiday");

    rat()
        .args(["--db", &db_path, "holiday", "add", "2025-03-13", "Founders Day"])
        .assert()
        .success()
        .stdout(contains("Holiday 2025-03-13 added: Founders Day"));

    rat()
        .args(["--db", &db_path, "holiday", "add", "2025-03-13", "Again"])
        .assert()
        .failure()
        .stderr(contains("Holiday already exists for date 2025-03-13"));

    rat()
        .args(["--db", &db_path, "holiday", "list", "--year", "2025"])
        .assert()
        .success()
        .stdout(contains("Founders Day"));

    let chat = write_chat("cli_holiday", SAMPLE_CHAT);
    ingest(&db_path, &chat).success();

    rat()
        .args(["--db", &db_path, "attendance", "list", "-p", "2025-03-13"])
        .assert()
        .success()
        .stdout(contains("Holiday"))
        .stdout(contains("Absent").not());

    rat()
        .args(["--db", &db_path, "holiday", "del", "2025-03-13"])
        .assert()
        .success()
        .stdout(contains("removed"));

    rat()
        .args(["--db", &db_path, "holiday", "del", "2025-03-13"])
        .assert()
        .success()
        .stdout(contains("No holiday on 2025-03-13"));
}

#[test]
fn test_leave_workflow() {
    let db_path = db_with_people("cli_leave");

    rat()
        .args([
            "--db",
            &db_path,
            "leave",
            "apply",
            "3",
            "--from",
            "2025-03-12",
            "--to",
            "2025-03-13",
            "--reason",
            "family",
        ])
        .assert()
        .success()
        .stdout(contains("Leave #1 filed for Meera (pending)."));

    rat()
        .args(["--db", &db_path, "leave", "list", "--status", "pending"])
        .assert()
        .success()
        .stdout(contains("Meera"));

    rat()
        .args(["--db", &db_path, "leave", "approve", "1"])
        .assert()
        .success()
        .stdout(contains("Leave #1 approved"));

    // decided leaves cannot move again
    rat()
        .args(["--db", &db_path, "leave", "reject", "1"])
        .assert()
        .failure()
        .stderr(contains("Invalid leave transition"));

    let chat = write_chat("cli_leave", SAMPLE_CHAT);
    ingest(&db_path, &chat).success();

    rat()
        .args(["--db", &db_path, "attendance", "list", "-p", "2025-03-12", "--person", "3"])
        .assert()
        .success()
        .stdout(contains("On leave"));
}

#[test]
fn test_leave_with_reversed_dates_fails() {
    let db_path = db_with_people("cli_leave_reversed");

    rat()
        .args([
            "--db", &db_path, "leave", "apply", "1", "--from", "2025-03-13", "--to", "2025-03-12",
        ])
        .assert()
        .failure()
        .stderr(contains("precedes start date"));
}

#[test]
fn test_summary_json() {
    let db_path = db_with_people("cli_summary");
    let chat = write_chat("cli_summary", SAMPLE_CHAT);
    ingest(&db_path, &chat).success();

    let out = rat()
        .args(["--db", &db_path, "summary", "--month", "2025-03", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let v: Value = serde_json::from_slice(&out.stdout).expect("summary is JSON");
    let rows = v.as_array().unwrap();
    assert_eq!(rows.len(), 3);

    let ravi = rows.iter().find(|r| r["display_name"] == "Ravi Kumar").unwrap();
    assert_eq!(ravi["on_site"], 1);
    assert_eq!(ravi["absent"], 1);
    assert_eq!(ravi["working_hours"], 8);
    assert_eq!(ravi["attendance_pct"], 50.0);
}

#[test]
fn test_summary_table_and_bad_month() {
    let db_path = db_with_people("cli_summary_table");

    rat()
        .args(["--db", &db_path, "summary", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(contains("March 2025"))
        .stdout(contains("Meera"));

    rat()
        .args(["--db", &db_path, "summary", "--month", "2025-13"])
        .assert()
        .failure()
        .stderr(contains("expected YYYY-MM"));
}

#[test]
fn test_log_print_filters_by_operation() {
    let db_path = db_with_people("cli_log");
    let chat = write_chat("cli_log", SAMPLE_CHAT);
    ingest(&db_path, &chat).success();

    rat()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("people_add"))
        .stdout(contains("ingest_run"));

    rat()
        .args(["--db", &db_path, "log", "--print", "--op", "ingest"])
        .assert()
        .success()
        .stdout(contains("2025-03-12"))
        .stdout(contains("people_add").not());
}

#[test]
fn test_db_info_and_check() {
    let db_path = db_with_people("cli_db_info");

    rat()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));
}
