//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`]. Writers open with
//! [`Database::open_at`], which creates the file if needed; the exporter opens
//! with [`Database::open_read_only`], which refuses to create anything.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};

use crate::error::{Result, StoreError};
use crate::migrations;

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "opening database");

        let conn = Connection::open(path)?;

        // no WAL: the exporter opens this file read-only
        conn.pragma_update(None, "foreign_keys", "ON")?;

        Ok(Self { conn })
    }

    /// Open an existing database without write access.
    ///
    /// Fails with [`StoreError::MissingDatabase`] before touching SQLite when
    /// the file is absent, so a typo never leaves an empty database behind.
    pub fn open_read_only(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(StoreError::MissingDatabase(path.to_path_buf()));
        }

        tracing::info!(path = %path.display(), "opening database read-only");

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        Ok(Self { conn })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    /// Create the schema unless the marker table already exists.
    ///
    /// `schema_sql` overrides the built-in schema script. Returns `true` when
    /// the script was executed.
    pub fn ensure_schema(&self, schema_sql: Option<&str>) -> Result<bool> {
        migrations::ensure_schema(&self.conn, schema_sql)
    }

    /// Return a reference to the underlying `rusqlite::Connection`.
    ///
    /// Callers should prefer the typed helpers, but direct access is
    /// occasionally needed for ad-hoc queries.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Return a mutable reference to the underlying connection.
    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }

    /// Close the connection, reporting any error SQLite raises while doing so.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| StoreError::Sqlite(e))
    }

    /// Number of rows in `table`.
    pub fn count_rows(&self, table: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
        Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
    }
}

/// Quote an identifier for interpolation into SQL.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        let db = Database::open_at(&path).expect("should open");
        assert!(db.path().is_some());
        db.close().unwrap();

        let db = Database::open_read_only(&path).expect("should reopen");
        assert!(db.path().is_some());
    }

    #[test]
    fn read_only_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.db");

        let err = Database::open_read_only(&path).err().unwrap();
        assert!(matches!(err, StoreError::MissingDatabase(p) if p == path));
        assert!(!path.exists());
    }

    #[test]
    fn read_only_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ro.db");
        Database::open_at(&path)
            .unwrap()
            .conn()
            .execute_batch("CREATE TABLE t (a INTEGER);")
            .unwrap();

        let db = Database::open_read_only(&path).unwrap();
        assert!(db.conn().execute("INSERT INTO t (a) VALUES (1)", []).is_err());
    }

    #[test]
    fn quoting_escapes_quotes() {
        assert_eq!(quote_ident("t"), "\"t\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
