//! People directory queries.

use crate::errors::{AppError, AppResult};
use crate::models::person::Person;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

const PERSON_COLUMNS: &str = "id, display_name, chat_alias, phone, email, is_active";

pub fn map_person(row: &Row) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get("id")?,
        display_name: row.get("display_name")?,
        chat_alias: row.get("chat_alias")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        is_active: row.get::<_, i64>("is_active")? == 1,
    })
}

/// Blank optional fields are stored as NULL.
fn blank_to_null(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub fn insert_person(conn: &Connection, p: &Person) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO people (display_name, chat_alias, phone, email, is_active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            p.display_name.trim(),
            blank_to_null(&p.chat_alias),
            blank_to_null(&p.phone),
            blank_to_null(&p.email),
            if p.is_active { 1 } else { 0 },
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_person(conn: &Connection, p: &Person) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE people
         SET display_name = ?1, chat_alias = ?2, phone = ?3, email = ?4, is_active = ?5
         WHERE id = ?6",
        params![
            p.display_name.trim(),
            blank_to_null(&p.chat_alias),
            blank_to_null(&p.phone),
            blank_to_null(&p.email),
            if p.is_active { 1 } else { 0 },
            p.id,
        ],
    )?;

    if n == 0 {
        return Err(AppError::PersonNotFound(p.id));
    }
    Ok(())
}

pub fn find_person(conn: &Connection, id: i64) -> AppResult<Option<Person>> {
    let sql = format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_person).optional()?)
}

pub fn get_person(conn: &Connection, id: i64) -> AppResult<Person> {
    find_person(conn, id)?.ok_or(AppError::PersonNotFound(id))
}

/// Directory order is ascending id, which is also the matcher's scan order.
pub fn list_people(conn: &Connection, include_inactive: bool) -> AppResult<Vec<Person>> {
    let sql = if include_inactive {
        format!("SELECT {PERSON_COLUMNS} FROM people ORDER BY id ASC")
    } else {
        format!("SELECT {PERSON_COLUMNS} FROM people WHERE is_active = 1 ORDER BY id ASC")
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_person)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn set_active(conn: &Connection, id: i64, active: bool) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE people SET is_active = ?1 WHERE id = ?2",
        params![if active { 1 } else { 0 }, id],
    )?;
    if n == 0 {
        return Err(AppError::PersonNotFound(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;

    fn conn() -> Connection {
        let c = Connection::open_in_memory().unwrap();
        run_pending_migrations(&c).unwrap();
        c
    }

    #[test]
    fn blank_alias_is_stored_as_null() {
        let c = conn();
        let p = Person::new(0, "Asha Rao").with_alias("   ");
        let id = insert_person(&c, &p).unwrap();

        let back = get_person(&c, id).unwrap();
        assert_eq!(back.chat_alias, None);
        assert!(back.is_active);
    }

    #[test]
    fn update_missing_person_fails() {
        let c = conn();
        let p = Person::new(42, "Nobody");
        assert!(matches!(
            update_person(&c, &p),
            Err(AppError::PersonNotFound(42))
        ));
    }

    #[test]
    fn inactive_people_are_hidden_by_default() {
        let c = conn();
        let a = insert_person(&c, &Person::new(0, "A")).unwrap();
        insert_person(&c, &Person::new(0, "B")).unwrap();
        set_active(&c, a, false).unwrap();

        assert_eq!(list_people(&c, false).unwrap().len(), 1);
        assert_eq!(list_people(&c, true).unwrap().len(), 2);
    }
}
