//! Schema bootstrap.
//!
//! The schema script runs only when the marker table is missing, so pointing
//! the seeder at an already-initialised database never re-creates tables.
//! Row data is not guarded the same way: seeding twice inserts twice.

pub mod v001_initial;

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Result, StoreError};

/// Table whose presence means the schema has been applied.
pub const MARKER_TABLE: &str = "users";

/// Whether a user table with this name exists.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Execute the schema script unless [`MARKER_TABLE`] already exists.
///
/// `schema_sql` replaces the built-in [`v001_initial::UP_SQL`] and is
/// executed verbatim. Returns `true` when the script ran.
pub fn ensure_schema(conn: &Connection, schema_sql: Option<&str>) -> Result<bool> {
    if table_exists(conn, MARKER_TABLE)? {
        tracing::info!(marker = MARKER_TABLE, "schema already present, skipping");
        return Ok(false);
    }

    tracing::info!(marker = MARKER_TABLE, "marker table missing, applying schema");
    conn.execute_batch(schema_sql.unwrap_or(v001_initial::UP_SQL))
        .map_err(|e| StoreError::Schema(e.to_string()))?;

    if !table_exists(conn, MARKER_TABLE)? {
        return Err(StoreError::Schema(format!(
            "schema script did not create the `{MARKER_TABLE}` table"
        )));
    }

    Ok(true)
}
