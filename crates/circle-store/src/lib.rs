//! # circle-store
//!
//! SQLite persistence for Your Circle: the eleven-table schema, typed insert
//! and lookup helpers for every record, the transactional sample-data seeder
//! and the whole-database exporter. The synchronous [`Database`] handle wraps
//! a `rusqlite::Connection`.

pub mod activity;
pub mod database;
pub mod export;
pub mod files;
pub mod migrations;
pub mod models;
pub mod record;
pub mod seed;
pub mod users;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use export::{DatabaseDump, ExportFormat, TableDump};
pub use models::*;
pub use record::Record;
pub use seed::{SampleData, SeedReport, TableCount};
