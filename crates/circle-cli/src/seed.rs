//! `circle seed`: bootstrap the schema if needed and insert the sample dataset.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use circle_store::{Database, SampleData, SeedReport};
use tracing::info;

pub fn run(db_path: &Path, schema: Option<&Path>) -> anyhow::Result<SeedReport> {
    let schema_sql = schema
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("cannot read schema file {}", path.display()))
        })
        .transpose()?;

    let mut db = Database::open_at(db_path)
        .with_context(|| format!("cannot open database {}", db_path.display()))?;

    if db.ensure_schema(schema_sql.as_deref())? {
        info!("Schema created");
    }

    let data = SampleData::generate(Utc::now());
    info!(rows = data.total_rows(), "Generated sample data");

    let report = db.seed(&data).context("seeding failed")?;

    db.close().context("failed to close database")?;
    info!("Database connection closed");

    Ok(report)
}
