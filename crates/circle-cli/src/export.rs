//! `circle export`: dump every table of an existing database to one file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use circle_store::{Database, ExportFormat};
use tracing::info;

/// Export the database at `db_path`, returning the path written.
///
/// Without `output` the file lands in the working directory under the
/// format's default name.
pub fn run(db_path: &Path, output: Option<PathBuf>, format: ExportFormat) -> anyhow::Result<PathBuf> {
    let db = Database::open_read_only(db_path)
        .with_context(|| format!("cannot open database {}", db_path.display()))?;

    let dump = db.export_all().context("failed to read database content")?;
    let path = output.unwrap_or_else(|| PathBuf::from(format.default_file_name()));
    dump.write_to(&path, format)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(tables = dump.tables.len(), rows = dump.row_count(), "export finished");

    db.close().context("failed to close database")?;
    info!("Database connection closed");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use circle_store::SampleData;

    use super::*;

    #[test]
    fn test_export_seeded_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("circle.db");
        {
            let mut db = Database::open_at(&db_path).unwrap();
            db.ensure_schema(None).unwrap();
            db.seed(&SampleData::generate(chrono::Utc::now())).unwrap();
        }

        let out = dir.path().join("dump.json");
        let written = run(&db_path, Some(out.clone()), ExportFormat::Json).unwrap();
        assert_eq!(written, out);

        let doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(doc["users"]["tableName"], "users");
        assert_eq!(doc["users"]["rows"].as_array().unwrap().len(), 5);
        assert_eq!(
            doc.as_object().unwrap().keys().next().map(String::as_str),
            Some("users")
        );
    }

    #[test]
    fn test_table_read_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("broken.db");
        {
            let db = Database::open_at(&db_path).unwrap();
            db.conn()
                .execute_batch(
                    "CREATE TABLE users (id TEXT);
                     INSERT INTO users VALUES ('u1');
                     PRAGMA writable_schema = ON;
                     INSERT INTO sqlite_master (type, name, tbl_name, rootpage, sql)
                     VALUES ('table', 'ghost', 'ghost', 0,
                             'CREATE VIRTUAL TABLE ghost USING no_such_module(x)');
                     PRAGMA writable_schema = OFF;",
                )
                .unwrap();
        }

        let out = dir.path().join("dump.json");
        let result = run(&db_path, Some(out.clone()), ExportFormat::Json);
        assert!(result.is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_database_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dump.yaml");

        let err = run(&dir.path().join("nope.db"), Some(out.clone()), ExportFormat::Yaml);
        assert!(err.is_err());
        assert!(!out.exists());
        assert!(!dir.path().join("nope.db").exists());
    }
}
