use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary::summarize_month;
use crate::db::attendance::records_in_range;
use crate::db::people::list_people;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info};
use crate::utils::date::{month_bounds, month_name, parse_month};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { month, json } = cmd {
        let (year, m) = parse_month(month)?;
        let (from, to) =
            month_bounds(year, m).ok_or_else(|| AppError::InvalidDate(month.clone()))?;

        let pool = open_pool(cfg)?;
        let people = list_people(&pool.conn, false)?;
        if people.is_empty() {
            info("No active people in the directory.");
            return Ok(());
        }

        let records = records_in_range(&pool.conn, from, to, None)?;
        let rows = summarize_month(&people, year, m, &records, cfg.hours_per_day);

        if *json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        header(format!("Attendance summary, {} {}", month_name(m), year));

        let mut t = Table::new(&[
            "ID", "NAME", "ON-SITE", "REMOTE", "LEAVE", "HOLIDAY", "ABSENT", "DAYS", "HOURS", "%",
        ]);
        for s in &rows {
            t.add_row(vec![
                s.person_id.to_string(),
                s.display_name.clone(),
                s.on_site.to_string(),
                s.remote.to_string(),
                s.on_leave.to_string(),
                s.holiday.to_string(),
                s.absent.to_string(),
                s.working_days.to_string(),
                s.working_hours.to_string(),
                format!("{:.2}", s.attendance_pct),
            ]);
        }
        print!("{}", t.render());
    }

    Ok(())
}
