use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, LeaveAction};
use crate::config::Config;
use crate::db::calendar::{decide_leave, insert_leave, list_leaves};
use crate::db::log::ttlog;
use crate::db::people::{get_person, list_people};
use crate::errors::AppResult;
use crate::models::leave::{Leave, LeaveStatus};
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{GREEN, RED, RESET, YELLOW};
use crate::utils::date::parse_cli_date;
use crate::utils::table::Table;
use std::collections::HashMap;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Leave { action } = cmd else {
        return Ok(());
    };

    let pool = open_pool(cfg)?;

    match action {
        LeaveAction::Apply {
            person,
            from,
            to,
            reason,
            leave_type,
        } => {
            let p = get_person(&pool.conn, *person)?;
            let leave = Leave {
                id: 0,
                person_id: p.id,
                start_date: parse_cli_date(from)?,
                end_date: parse_cli_date(to)?,
                reason: reason.clone(),
                leave_type: leave_type.clone(),
                status: LeaveStatus::Pending,
                admin_remarks: String::new(),
            };
            let id = insert_leave(&pool.conn, &leave)?;
            ttlog(
                &pool.conn,
                "leave_apply",
                &id.to_string(),
                &format!("{} {}..{}", p.display_name, leave.start_date, leave.end_date),
            )?;
            success(format!("Leave #{} filed for {} (pending).", id, p.display_name));
        }

        LeaveAction::Approve { id, remarks } => {
            let l = decide_leave(&pool.conn, *id, LeaveStatus::Approved, remarks)?;
            ttlog(&pool.conn, "leave_approve", &id.to_string(), remarks)?;
            success(format!(
                "Leave #{} approved ({}..{}). Re-ingest the covered dates to refresh the ledger.",
                l.id, l.start_date, l.end_date
            ));
        }

        LeaveAction::Reject { id, remarks } => {
            decide_leave(&pool.conn, *id, LeaveStatus::Rejected, remarks)?;
            ttlog(&pool.conn, "leave_reject", &id.to_string(), remarks)?;
            warning(format!("Leave #{} rejected.", id));
        }

        LeaveAction::List { status } => {
            let filter = status.as_deref().and_then(LeaveStatus::from_db_str);
            let leaves = list_leaves(&pool.conn, filter)?;
            if leaves.is_empty() {
                info("No leave requests.");
                return Ok(());
            }

            let names: HashMap<i64, String> = list_people(&pool.conn, true)?
                .into_iter()
                .map(|p| (p.id, p.display_name))
                .collect();

            let mut t = Table::new(&["ID", "PERSON", "FROM", "TO", "TYPE", "STATUS", "REASON"]);
            for l in &leaves {
                t.add_row(vec![
                    l.id.to_string(),
                    names.get(&l.person_id).cloned().unwrap_or_else(|| l.person_id.to_string()),
                    l.start_date.to_string(),
                    l.end_date.to_string(),
                    l.leave_type.clone(),
                    paint_status(l.status),
                    l.reason.clone(),
                ]);
            }
            print!("{}", t.render());
        }
    }

    Ok(())
}

fn paint_status(s: LeaveStatus) -> String {
    let color = match s {
        LeaveStatus::Pending => YELLOW,
        LeaveStatus::Approved => GREEN,
        LeaveStatus::Rejected => RED,
    };
    format!("{color}{}{RESET}", s.to_db_str())
}
