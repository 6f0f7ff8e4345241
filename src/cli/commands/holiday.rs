use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, HolidayAction};
use crate::config::Config;
use crate::db::calendar::{delete_holiday, insert_holiday, list_holidays};
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::models::holiday::Holiday;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::parse_cli_date;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Holiday { action } = cmd else {
        return Ok(());
    };

    let pool = open_pool(cfg)?;

    match action {
        HolidayAction::Add {
            date,
            name,
            description,
            optional,
        } => {
            let h = Holiday {
                id: 0,
                date: parse_cli_date(date)?,
                name: name.clone(),
                description: description.clone(),
                optional: *optional,
            };
            insert_holiday(&pool.conn, &h)?;
            ttlog(&pool.conn, "holiday_add", &h.date.to_string(), &h.name)?;
            success(format!("Holiday {} added: {}", h.date, h.name));
        }

        HolidayAction::List { year } => {
            let holidays = list_holidays(&pool.conn, *year)?;
            if holidays.is_empty() {
                info("No holidays defined.");
                return Ok(());
            }

            let mut t = Table::new(&["DATE", "WEEKDAY", "NAME", "OPTIONAL", "DESCRIPTION"]);
            for h in &holidays {
                t.add_row(vec![
                    h.date.to_string(),
                    h.date.format("%a").to_string(),
                    h.name.clone(),
                    if h.optional { "yes".into() } else { "no".into() },
                    h.description.clone(),
                ]);
            }
            print!("{}", t.render());
        }

        HolidayAction::Del { date } => {
            let d = parse_cli_date(date)?;
            if delete_holiday(&pool.conn, d)? {
                ttlog(&pool.conn, "holiday_del", &d.to_string(), "Holiday removed")?;
                success(format!("Holiday {} removed.", d));
            } else {
                warning(format!("No holiday on {}.", d));
            }
        }
    }

    Ok(())
}
