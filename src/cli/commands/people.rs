use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, PeopleAction};
use crate::config::Config;
use crate::core::remap::{RemapReport, resolve_unmatched_for_person};
use crate::db::log::ttlog;
use crate::db::people::{get_person, insert_person, list_people, set_active, update_person};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::person::Person;
use crate::ui::messages::{info, success, warning};
use crate::utils::formatting::{active_flag, or_dash};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::People { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    match action {
        PeopleAction::Add {
            name,
            alias,
            phone,
            email,
        } => {
            let mut p = Person::new(0, name);
            p.chat_alias = alias.clone();
            p.phone = phone.clone();
            p.email = email.clone();

            p.id = insert_person(&pool.conn, &p)?;
            ttlog(&pool.conn, "people_add", &p.id.to_string(), &p.display_name)?;
            success(format!("Added #{} {}", p.id, p.display_name));

            rematch(&mut pool, &p)?;
        }

        PeopleAction::Edit {
            id,
            name,
            alias,
            phone,
            email,
            activate,
        } => {
            let mut p = get_person(&pool.conn, *id)?;
            if let Some(n) = name {
                p.display_name = n.clone();
            }
            if let Some(a) = alias {
                p.chat_alias = non_blank(a);
            }
            if let Some(ph) = phone {
                p.phone = non_blank(ph);
            }
            if let Some(e) = email {
                p.email = non_blank(e);
            }
            if *activate {
                p.is_active = true;
            }

            update_person(&pool.conn, &p)?;
            ttlog(&pool.conn, "people_edit", &p.id.to_string(), &p.display_name)?;
            success(format!("Updated #{} {}", p.id, p.display_name));

            rematch(&mut pool, &p)?;
        }

        PeopleAction::List { all } => {
            let people = list_people(&pool.conn, *all)?;
            if people.is_empty() {
                info("No people in the directory.");
                return Ok(());
            }

            let mut t = Table::new(&["ID", "NAME", "CHAT ALIAS", "PHONE", "EMAIL", "STATE"]);
            for p in &people {
                t.add_row(vec![
                    p.id.to_string(),
                    p.display_name.clone(),
                    or_dash(p.alias()),
                    or_dash(p.phone()),
                    or_dash(p.email.as_deref()),
                    active_flag(p.is_active),
                ]);
            }
            print!("{}", t.render());
        }

        PeopleAction::Deactivate { id } => {
            let p = get_person(&pool.conn, *id)?;
            set_active(&pool.conn, *id, false)?;
            ttlog(&pool.conn, "people_deactivate", &id.to_string(), &p.display_name)?;
            warning(format!("Deactivated #{} {}", p.id, p.display_name));
        }
    }

    Ok(())
}

/// Directory changed: pending unmatched senders may now resolve to `p`.
fn rematch(pool: &mut DbPool, p: &Person) -> AppResult<RemapReport> {
    let report = resolve_unmatched_for_person(pool, p)?;
    if !report.is_empty() {
        info(format!(
            "Resolved {} unmatched sender row(s): {} record(s) created, {} already present",
            report.matched, report.created, report.existing
        ));
    }
    Ok(report)
}

/// `--alias ""` clears the field.
fn non_blank(value: &str) -> Option<String> {
    let v = value.trim();
    (!v.is_empty()).then(|| v.to_string())
}
