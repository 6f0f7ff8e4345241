//! Text column codecs shared by the row mappers.
//! Dates are stored as `YYYY-MM-DD`, times as `HH:MM:SS`.

use crate::errors::AppError;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::Type;

pub fn date_to_sql(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn time_to_sql(t: Option<NaiveTime>) -> Option<String> {
    t.map(|t| t.format("%H:%M:%S").to_string())
}

pub fn date_from_sql(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(AppError::InvalidDate(s.to_string())),
        )
    })
}

/// Accepts `HH:MM:SS` and the shorter `HH:MM`.
pub fn time_from_sql(idx: usize, s: Option<String>) -> rusqlite::Result<Option<NaiveTime>> {
    let Some(s) = s.filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };

    NaiveTime::parse_from_str(&s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M"))
        .map(Some)
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                Type::Text,
                Box::new(AppError::InvalidTime(s.clone())),
            )
        })
}

pub fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}
