// src/export/range.rs

use crate::errors::{AppError, AppResult};
use crate::utils::date::month_bounds;
use chrono::NaiveDate;

/// Parse a `--range` expression into inclusive bounds.
///
/// Accepted: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, and two values of the same
/// shape joined by `:` (e.g. `2025-01:2025-03`).
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let (start, end) = match r.split_once(':') {
        Some((a, b)) => {
            let (a, b) = (a.trim(), b.trim());
            if a.len() != b.len() {
                return Err(invalid(r, "start and end must have the same format"));
            }
            (period_bounds(a)?.0, period_bounds(b)?.1)
        }
        None => period_bounds(r.trim())?,
    };

    if end < start {
        return Err(invalid(r, "end precedes start"));
    }
    Ok((start, end))
}

/// First and last day covered by one period token.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid(p, "invalid year"))?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid(p, "invalid year"))?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid(p, "invalid year"))?;
            Ok((first, last))
        }
        7 => {
            let (y, m) = p.split_once('-').ok_or_else(|| invalid(p, "expected YYYY-MM"))?;
            let y: i32 = y.parse().map_err(|_| invalid(p, "invalid year"))?;
            let m: u32 = m.parse().map_err(|_| invalid(p, "invalid month"))?;
            month_bounds(y, m).ok_or_else(|| invalid(p, "invalid month"))
        }
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid(p, "invalid date"))?;
            Ok((d, d))
        }
        _ => Err(invalid(p, "unsupported range format")),
    }
}

fn invalid(input: &str, why: &str) -> AppError {
    AppError::InvalidDate(format!("{input}: {why}"))
}
