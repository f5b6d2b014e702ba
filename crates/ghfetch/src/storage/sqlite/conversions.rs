//! Row conversions between SQLite and `Repository`.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;

use ghfetch_core::github::Repository;

/// Convert a SQLite row to a Repository.
///
/// Expected columns: id, node_id, owner, name, created_at, last_access
pub fn row_to_repository(row: &Row) -> rusqlite::Result<Repository> {
    let created_at: String = row.get(4)?;
    let last_access: String = row.get(5)?;

    Ok(Repository {
        id: row.get(0)?,
        node_id: row.get(1)?,
        owner: row.get(2)?,
        name: row.get(3)?,
        created_at: parse_datetime(4, &created_at)?,
        last_access: Some(parse_datetime(5, &last_access)?),
    })
}

fn parse_datetime(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Format a DateTime for SQLite storage.
///
/// Fixed width with microseconds and a `Z` suffix, so text order is time order.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}
