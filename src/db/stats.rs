use crate::db::attendance::date_span;
use crate::db::pool::DbPool;
use crate::db::unmatched::count_unresolved;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

fn count(pool: &DbPool, sql: &str) -> AppResult<i64> {
    Ok(pool.conn.query_row(sql, [], |row| row.get(0))?)
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let people = count(pool, "SELECT COUNT(*) FROM people WHERE is_active = 1")?;
    let records = count(pool, "SELECT COUNT(*) FROM attendance")?;
    let holidays = count(pool, "SELECT COUNT(*) FROM holidays")?;
    let pending_leaves = count(pool, "SELECT COUNT(*) FROM leaves WHERE status = 'pending'")?;
    let unmatched = count_unresolved(&pool.conn)?;

    println!("{}• Active people:{} {}{}{}", CYAN, RESET, GREEN, people, RESET);
    println!("{}• Attendance rows:{} {}{}{}", CYAN, RESET, GREEN, records, RESET);
    println!("{}• Holidays:{} {}", CYAN, RESET, holidays);
    println!("{}• Pending leaves:{} {}", CYAN, RESET, pending_leaves);
    println!("{}• Unresolved senders:{} {}", CYAN, RESET, unmatched);

    //
    // 3) DATE RANGE
    //
    println!("{}• Date range:{}", CYAN, RESET);
    match date_span(&pool.conn)? {
        Some((first, last)) => {
            println!("    from: {}", first);
            println!("    to:   {}", last);

            let days = (last - first).num_days() + 1;
            if people > 0 {
                let coverage = records as f64 / (days * people) as f64 * 100.0;
                println!("{}• Ledger coverage:{} {:.1}%", CYAN, RESET, coverage);
            }
        }
        None => {
            println!("    from: {GREY}--{RESET}");
            println!("    to:   {GREY}--{RESET}");
        }
    }

    println!();
    Ok(())
}
