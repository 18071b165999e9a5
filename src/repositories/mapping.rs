// src/repositories/mapping.rs
//
// Column conversion helpers shared by the SQLite repositories.
// All of them fail with `rusqlite::Error` so they compose inside `query_map`.

use chrono::{DateTime, Utc};
use std::str::FromStr;
use uuid::Uuid;

fn conversion_error<E>(e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::ToSqlConversionFailure(Box::new(e))
}

pub(crate) fn parse_uuid(value: &str) -> Result<Uuid, rusqlite::Error> {
    Uuid::parse_str(value).map_err(conversion_error)
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(conversion_error)
}

pub(crate) fn parse_optional_timestamp(
    value: Option<String>,
) -> Result<Option<DateTime<Utc>>, rusqlite::Error> {
    value.map(|s| parse_timestamp(&s)).transpose()
}

/// Parse a stored enum label through its `FromStr`
pub(crate) fn parse_label<T>(value: &str) -> Result<T, rusqlite::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse::<T>().map_err(conversion_error)
}

pub(crate) fn parse_optional_label<T>(value: Option<String>) -> Result<Option<T>, rusqlite::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.map(|s| parse_label(&s)).transpose()
}
