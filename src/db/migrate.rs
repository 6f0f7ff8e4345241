//! Versioned schema migrations.
//!
//! Each migration runs once inside its own transaction and leaves a
//! `migration_applied` row in `log` with its version as target.

use crate::errors::{AppError, AppResult};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::info;

pub struct Migration {
    pub version: &'static str,
    pub description: &'static str,
    pub sql: &'static str,
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_directory",
        description: "Created people, holidays and leaves tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS people (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            display_name  TEXT NOT NULL,
            chat_alias    TEXT,
            phone         TEXT,
            email         TEXT,
            is_active     INTEGER NOT NULL DEFAULT 1,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS holidays (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            date         TEXT NOT NULL UNIQUE,
            name         TEXT NOT NULL,
            description  TEXT NOT NULL DEFAULT '',
            optional     INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS leaves (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            person_id      INTEGER NOT NULL REFERENCES people(id),
            start_date     TEXT NOT NULL,
            end_date       TEXT NOT NULL,
            reason         TEXT NOT NULL DEFAULT '',
            leave_type     TEXT NOT NULL DEFAULT 'casual',
            status         TEXT NOT NULL DEFAULT 'pending'
                           CHECK(status IN ('pending','approved','rejected')),
            admin_remarks  TEXT NOT NULL DEFAULT '',
            created_at     TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250301_0002_create_attendance",
        description: "Created attendance and unmatched_log tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            person_id   INTEGER NOT NULL REFERENCES people(id),
            date        TEXT NOT NULL,
            in_time     TEXT,
            out_time    TEXT,
            status      TEXT NOT NULL
                        CHECK(status IN ('on_site','remote','on_leave','holiday','absent')),
            source      TEXT NOT NULL DEFAULT 'ingested'
                        CHECK(source IN ('ingested','manual')),
            remarks     TEXT NOT NULL DEFAULT '',
            updated_at  TEXT NOT NULL,
            UNIQUE(person_id, date)
        );

        CREATE TABLE IF NOT EXISTS unmatched_log (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            sender      TEXT NOT NULL,
            date        TEXT NOT NULL,
            in_time     TEXT,
            out_time    TEXT,
            is_remote   INTEGER NOT NULL DEFAULT 0,
            resolved    INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL,
            UNIQUE(sender, date)
        );
        "#,
    },
    Migration {
        version: "20250315_0003_add_lookup_indexes",
        description: "Added date indexes for attendance, leaves and unmatched_log",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance(date);
        CREATE INDEX IF NOT EXISTS idx_leaves_span ON leaves(status, start_date, end_date);
        CREATE INDEX IF NOT EXISTS idx_unmatched_resolved ON unmatched_log(resolved, date);
        "#,
    },
];

/// Ensure that the `log` table exists; every migration marker lives there.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

pub fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![Local::now().to_rfc3339(), m.version, m.description],
    )?;

    tx.commit()?;
    Ok(())
}

/// Public entry point: run all pending migrations.
/// Returns the versions applied by this call, in order.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        info!(version = m.version, "migration applied");
        applied.push(m.version);
    }

    Ok(applied)
}

/// Versions not yet recorded in `log`.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}
