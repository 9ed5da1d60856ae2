//! Column parsing shared by the repositories.
//!
//! Dates are stored as TEXT. Fracture timestamps may carry either RFC 3339
//! or the `YYYY-MM-DD HH:MM:SS` form older rows were written with, and
//! flags are INTEGER columns that may be NULL.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::DatabaseError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const LEGACY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Read a timestamp column as UTC.
///
/// # Errors
///
/// Returns `DatabaseError::Query` when the text matches neither format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, LEGACY_DATETIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("bad timestamp {s:?}: {e}")))
}

/// # Errors
///
/// Returns `DatabaseError::Query` for non-empty text that is not a timestamp.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    s.filter(|s| !s.is_empty()).map(parse_datetime).transpose()
}

/// Read a calendar date. A full timestamp is truncated to its UTC date.
///
/// # Errors
///
/// Returns `DatabaseError::Query` when the text is neither a date nor a timestamp.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).or_else(|_| {
        parse_datetime(s)
            .map(|dt| dt.date_naive())
            .map_err(|_| DatabaseError::Query(format!("bad date {s:?}")))
    })
}

/// # Errors
///
/// Returns `DatabaseError::Query` for non-empty text that is not a date.
pub fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, DatabaseError> {
    s.filter(|s| !s.is_empty()).map(parse_date).transpose()
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Nullable TEXT column; an empty string reads as `None`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column cannot be read as text.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    Ok(row.get::<Option<String>>(idx)?.filter(|s| !s.is_empty()))
}

/// Nullable INTEGER flag; any non-zero value is `true`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column cannot be read as an integer.
pub fn get_opt_bool(row: &libsql::Row, idx: i32) -> Result<Option<bool>, DatabaseError> {
    Ok(row.get::<Option<i64>>(idx)?.map(|v| v != 0))
}
