#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rattendance::db::initialize::init_db;
use rattendance::db::people::insert_person;
use rattendance::db::pool::DbPool;
use rattendance::models::person::Person;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rat() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a chat export into the temp dir and return its path.
pub fn write_chat(name: &str, text: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_chat.txt", name));
    fs::write(&path, text).expect("write chat export");
    path.to_string_lossy().to_string()
}

/// Library-level store on a fresh file with the schema applied.
pub fn open_store(name: &str) -> DbPool {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

/// Asha (matched by normalized name), Ravi (matched by phone), Meera (silent).
pub fn seed_people(pool: &DbPool) -> (i64, i64, i64) {
    let asha = insert_person(&pool.conn, &Person::new(0, "Asha Rao")).expect("asha");
    let ravi = insert_person(
        &pool.conn,
        &Person::new(0, "Ravi Kumar").with_phone("+91 98765 43210"),
    )
    .expect("ravi");
    let meera = insert_person(&pool.conn, &Person::new(0, "Meera")).expect("meera");
    (asha, ravi, meera)
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Two days in scope plus one line before a 2025-01-01 cutoff.
pub const SAMPLE_CHAT: &str = "\
01/01/2024, 09:00 - Asha Rao: in
12/03/2025, 09:05 - Asha Rao 😀: in wfh
12/03/2025, 09:10 - +91 98765 43210: Good morning
12/03/2025, 10:00 - Stranger: in
12/03/2025, 10:01 - Anil changed the group description: x
12/03/2025, 17:30 - +91 98765 43210: out
12/03/2025, 18:20 - +91 98765 43210: logout at 18:05

this line is a wrapped continuation of a long message
13/03/2025, 09:45 - Asha Rao 😀: present
13/03/2025, 18:00 - Asha Rao 😀: bye
";

/// Initialize a DB through the CLI.
pub fn init_db_cli(db_path: &str) {
    rat()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}
