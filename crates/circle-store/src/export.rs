//! Whole-database export.
//!
//! Every user table is dumped as `{ tableName, columns, rows }` and the
//! dumps are keyed by table name in catalog order. The document is built
//! completely in memory before anything is written, so a failing table never
//! leaves a half-written file behind.

use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use rusqlite::types::ValueRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::{quote_ident, Database};
use crate::error::Result;

/// One table's columns and rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableDump {
    pub table_name: String,
    pub columns: Vec<String>,
    /// Each row maps column name to value, in column order.
    pub rows: Vec<IndexMap<String, Value>>,
}

/// The full export document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DatabaseDump {
    pub tables: IndexMap<String, TableDump>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

impl ExportFormat {
    /// File written when no output path is given.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Json => "real-db.json",
            Self::Yaml => "your-db.yaml",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

impl Database {
    /// User table names in catalog order, skipping SQLite's internal tables.
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn().prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND substr(name, 1, 7) <> 'sqlite_'",
        )?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut tables = Vec::new();
        for row in rows {
            tables.push(row?);
        }
        Ok(tables)
    }

    pub fn dump_table(&self, table: &str) -> Result<TableDump> {
        let mut stmt = self
            .conn()
            .prepare(&format!("SELECT * FROM {}", quote_ident(table)))?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
            let mut record = IndexMap::with_capacity(columns.len());
            for (i, column) in columns.iter().enumerate() {
                record.insert(column.clone(), to_json(row.get_ref(i)?));
            }
            rows.push(record);
        }

        Ok(TableDump {
            table_name: table.to_string(),
            columns,
            rows,
        })
    }

    /// Dump every user table. Any failing table aborts the whole export.
    pub fn export_all(&self) -> Result<DatabaseDump> {
        let mut dump = DatabaseDump::default();
        for table in self.list_tables()? {
            let data = self.dump_table(&table)?;
            tracing::debug!(table = %table, rows = data.rows.len(), "dumped table");
            dump.tables.insert(table, data);
        }
        Ok(dump)
    }
}

impl DatabaseDump {
    pub fn render(&self, format: ExportFormat) -> Result<String> {
        Ok(match format {
            ExportFormat::Json => serde_json::to_string_pretty(self)?,
            ExportFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }

    /// Render and write in one go; nothing is written if rendering fails.
    pub fn write_to(&self, path: &Path, format: ExportFormat) -> Result<()> {
        let rendered = self.render(format)?;
        std::fs::write(path, rendered)?;
        tracing::info!(
            path = %path.display(),
            tables = self.tables.len(),
            "database content exported"
        );
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.tables.values().map(|t| t.rows.len()).sum()
    }
}

/// Blobs become lowercase hex, non-finite reals become null.
fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::String(hex::encode(bytes)),
    }
}
