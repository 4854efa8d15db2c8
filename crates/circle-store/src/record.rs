//! The [`Record`] trait: one row of one sample table.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Connection;
use uuid::Uuid;

use crate::database::Database;
use crate::error::Result;

/// A row that knows which table it belongs to and how to insert itself.
///
/// `insert` takes a plain [`Connection`] so the same code runs inside a
/// [`rusqlite::Transaction`] (which derefs to one) and outside of it.
pub trait Record {
    const TABLE: &'static str;

    /// Short human-readable identification for log lines.
    fn label(&self) -> String;

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize>;
}

impl Database {
    /// Insert one record outside of any explicit transaction.
    pub fn insert<R: Record>(&self, record: &R) -> Result<()> {
        record.insert(self.conn())?;
        Ok(())
    }
}

pub(crate) fn parse_uuid(idx: usize, s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn parse_opt_uuid(idx: usize, s: Option<String>) -> rusqlite::Result<Option<Uuid>> {
    s.map(|s| parse_uuid(idx, &s)).transpose()
}

pub(crate) fn parse_ts(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
