use crate::cli::commands::open_pool;
use crate::cli::parser::{AttendanceAction, Commands};
use crate::config::Config;
use crate::db::attendance::{records_in_range, upsert_record};
use crate::db::log::ttlog;
use crate::db::people::{get_person, list_people};
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_range;
use crate::models::attendance::AttendanceRecord;
use crate::models::status::AttendanceStatus;
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::date::{parse_cli_date, today};
use crate::utils::formatting::{colorize_status, mins2readable};
use crate::utils::table::Table;
use crate::utils::time::{parse_optional_time, worked_minutes};
use std::collections::HashMap;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Attendance { action } = cmd else {
        return Ok(());
    };

    let pool = open_pool(cfg)?;

    match action {
        AttendanceAction::Set {
            person,
            date,
            status,
            in_time,
            out_time,
            remarks,
        } => {
            let p = get_person(&pool.conn, *person)?;
            let status = AttendanceStatus::from_code(status)
                .ok_or_else(|| AppError::InvalidStatus(status.clone()))?;

            let rec = AttendanceRecord::manual(
                p.id,
                parse_cli_date(date)?,
                parse_optional_time(in_time.as_ref())?,
                parse_optional_time(out_time.as_ref())?,
                status,
                remarks.clone(),
            );

            upsert_record(&pool.conn, &rec)?;
            ttlog(
                &pool.conn,
                "attendance_set",
                &format!("{}@{}", p.id, rec.date_str()),
                &format!("{} set to {}", p.display_name, status.label()),
            )?;
            success(format!(
                "{} on {}: {} (manual)",
                p.display_name,
                rec.date_str(),
                status.label()
            ));
        }

        AttendanceAction::List { period, person } => {
            let (from, to) = match period {
                Some(p) => parse_range(p)?,
                None => (today(), today()),
            };

            let records = records_in_range(&pool.conn, from, to, *person)?;
            if records.is_empty() {
                info(format!("No attendance records between {} and {}.", from, to));
                return Ok(());
            }

            let names: HashMap<i64, String> = list_people(&pool.conn, true)?
                .into_iter()
                .map(|p| (p.id, p.display_name))
                .collect();

            let mut t = Table::new(&[
                "DATE", "PERSON", "STATUS", "IN", "OUT", "WORKED", "SOURCE", "REMARKS",
            ]);
            for r in &records {
                t.add_row(vec![
                    r.date_str(),
                    names.get(&r.person_id).cloned().unwrap_or_default(),
                    colorize_status(r.status),
                    colorize_optional(&r.in_str()),
                    colorize_optional(&r.out_str()),
                    worked_minutes(r.in_time, r.out_time)
                        .map(mins2readable)
                        .unwrap_or_default(),
                    r.source.to_db_str().to_string(),
                    r.remarks.clone(),
                ]);
            }
            print!("{}", t.render());
        }
    }

    Ok(())
}
