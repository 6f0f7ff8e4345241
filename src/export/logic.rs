// src/export/logic.rs

use crate::db::attendance::{date_span, rows_in_range};
use crate::db::pool::DbPool;
use crate::db::unmatched::list_unmatched;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{AttendanceExport, ExportRow, UnmatchedExport};
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::path::Path;

/// Which record set to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Attendance,
    Unmatched,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Write the selected record set to `file` (absolute path).
    ///
    /// `range` is `None`, `"all"` or a `parse_range` expression. Returns the
    /// number of rows written; an empty selection writes nothing.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        target: ExportTarget,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        match target {
            ExportTarget::Attendance => {
                let rows = load_attendance(pool, bounds)?;
                write_rows(&rows, format, path, "Attendance")
            }
            ExportTarget::Unmatched => {
                let rows: Vec<UnmatchedExport> = list_unmatched(&pool.conn, true)?
                    .iter()
                    .filter(|e| bounds.is_none_or(|(a, b)| a <= e.date && e.date <= b))
                    .map(UnmatchedExport::from)
                    .collect();
                write_rows(&rows, format, path, "Unmatched")
            }
        }
    }
}

fn load_attendance(
    pool: &DbPool,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<AttendanceExport>> {
    let Some((from, to)) = bounds.or(date_span(&pool.conn)?) else {
        return Ok(Vec::new());
    };

    Ok(rows_in_range(&pool.conn, from, to)?
        .iter()
        .map(AttendanceExport::from)
        .collect())
}

fn write_rows<T: ExportRow>(
    rows: &[T],
    format: ExportFormat,
    path: &Path,
    sheet: &str,
) -> AppResult<usize> {
    if rows.is_empty() {
        warning("No records found for selected range.");
        return Ok(0);
    }

    match format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
        ExportFormat::Xlsx => export_xlsx(rows, path, sheet)?,
    }
    Ok(rows.len())
}
