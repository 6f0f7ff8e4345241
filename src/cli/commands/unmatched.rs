use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, UnmatchedAction};
use crate::config::Config;
use crate::core::remap::resolve_all;
use crate::db::people::get_person;
use crate::db::unmatched::list_unmatched;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Unmatched { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    match action {
        UnmatchedAction::List { all } => {
            let rows = list_unmatched(&pool.conn, *all)?;
            if rows.is_empty() {
                info("No unmatched senders.");
                return Ok(());
            }

            let mut t = Table::new(&["ID", "DATE", "SENDER", "IN", "OUT", "REMOTE", "RESOLVED"]);
            for r in &rows {
                let entry = r.as_entry();
                t.add_row(vec![
                    r.id.to_string(),
                    r.date.to_string(),
                    r.sender_label.clone(),
                    colorize_optional(&fmt_time(entry.in_time)),
                    colorize_optional(&fmt_time(entry.out_time)),
                    if r.is_remote { "yes".into() } else { "no".into() },
                    if r.resolved { "yes".into() } else { "no".into() },
                ]);
            }
            print!("{}", t.render());
        }

        UnmatchedAction::Resolve => {
            let reports = resolve_all(&mut pool)?;
            if reports.is_empty() {
                info("No pending sender matches anyone in the directory.");
                return Ok(());
            }
            for r in &reports {
                let name = get_person(&pool.conn, r.person_id)?.display_name;
                success(format!(
                    "{}: {} row(s) resolved, {} record(s) created",
                    name, r.matched, r.created
                ));
            }
        }
    }

    Ok(())
}

fn fmt_time(t: Option<chrono::NaiveTime>) -> String {
    t.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
