//! # circle
//!
//! Data tooling for Your Circle.
//!
//! This binary provides:
//! - **export**: dump every table of the SQLite database to a JSON or YAML
//!   document
//! - **seed**: create the schema when missing and insert the sample dataset
//!   in one transaction
//! - **populate**: start the backend server, wait for its health check and
//!   fill it through the HTTP API

mod client;
mod config;
mod error;
mod export;
mod populate;
mod seed;
mod server;

use std::path::PathBuf;

use circle_store::ExportFormat;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "circle", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every table of the database to one file
    Export {
        /// Database file (overrides SQLITE_DB_PATH)
        #[arg(long)]
        db: Option<PathBuf>,
        /// Output file (defaults to real-db.json or your-db.yaml)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// json or yaml
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,
    },
    /// Create the schema if needed and insert the sample dataset
    Seed {
        /// Database file (overrides SQLITE_DB_PATH)
        #[arg(long)]
        db: Option<PathBuf>,
        /// SQL script used instead of the built-in schema
        #[arg(long)]
        schema: Option<PathBuf>,
    },
    /// Start the backend server and populate it through its API
    Populate {
        /// Base URL of the server (overrides SERVER_URL)
        #[arg(long)]
        server_url: Option<String>,
        /// Shell command starting the server (overrides SERVER_COMMAND)
        #[arg(long)]
        server_cmd: Option<String>,
        /// Stdout text that marks the server as started
        #[arg(long)]
        ready_marker: Option<String>,
        /// Bearer token (overrides API_TOKEN)
        #[arg(long)]
        token: Option<String>,
        /// Directory with the sample files (overrides SAMPLE_FILES_DIR)
        #[arg(long)]
        samples_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,circle_cli=debug,circle_store=debug")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = CliConfig::from_env();

    match cli.command {
        Commands::Export { db, output, format } => {
            let db_path = db.unwrap_or(config.db_path);
            let path = export::run(&db_path, output, format)?;
            println!("Database content exported to {}", path.display());
        }
        Commands::Seed { db, schema } => {
            let db_path = db.unwrap_or(config.db_path);
            let report = seed::run(&db_path, schema.as_deref())?;
            for (table, count) in &report.tables {
                println!(
                    "{table:<28} {:>4} inserted {:>4} failed",
                    count.inserted, count.failed
                );
            }
            println!(
                "Database populated: {} rows inserted, {} failed",
                report.inserted(),
                report.failed()
            );
        }
        Commands::Populate {
            server_url,
            server_cmd,
            ready_marker,
            token,
            samples_dir,
        } => {
            if let Some(url) = server_url {
                config.server_url = url.trim_end_matches('/').to_string();
            }
            if let Some(cmd) = server_cmd {
                config.server_command = cmd;
            }
            if let Some(marker) = ready_marker {
                config.ready_marker = marker;
            }
            if let Some(token) = token {
                config.api_token = token;
            }
            if let Some(dir) = samples_dir {
                config.sample_files_dir = dir;
            }
            info!(
                server_url = %config.server_url,
                server_command = %config.server_command,
                samples = %config.sample_files_dir.display(),
                "Loaded configuration"
            );

            let summary = populate::run(&config).await?;
            println!(
                "Population complete: {} users created, {} files uploaded, {} files skipped",
                summary.users_created, summary.files_uploaded, summary.files_skipped
            );
        }
    }

    Ok(())
}
