//! `circle populate`: start the backend, wait for it, create sample users and
//! upload sample files through its API, then stop it.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::client::{ApiClient, NewUser};
use crate::config::CliConfig;
use crate::error::PopulateError;
use crate::server;

/// Users created through `POST /users`.
const SAMPLE_USERS: [(&str, &str, &str, &str); 2] = [
    ("john_doe", "john@example.com", "John", "Doe"),
    ("jane_smith", "jane@example.com", "Jane", "Smith"),
];

/// On-disk name under the samples directory, and the name it is uploaded as.
const SAMPLE_FILES: [(&str, &str); 4] = [
    ("project_x_proposal.pdf", "Project X Proposal.pdf"),
    ("client_presentation_q2.pptx", "Q2 Client Presentation.pptx"),
    ("rome_colosseum.jpg", "Rome Colosseum.jpg"),
    ("tax_return_2023.pdf", "Tax Return 2023.pdf"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PopulateSummary {
    pub users_created: usize,
    pub users_failed: usize,
    pub files_uploaded: usize,
    pub files_failed: usize,
    pub files_skipped: usize,
}

pub fn sample_users() -> Vec<NewUser> {
    SAMPLE_USERS
        .iter()
        .map(|&(username, email, first, last)| NewUser {
            username: username.to_string(),
            email: email.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
        })
        .collect()
}

/// Create the sample users, then upload the sample files found in
/// `samples_dir`. Calls run one after the other; failures are counted.
pub async fn populate(client: &ApiClient, samples_dir: &Path) -> PopulateSummary {
    info!("Starting database population");
    let mut summary = PopulateSummary::default();

    for user in sample_users() {
        match client.create_user(&user).await {
            Some(_) => summary.users_created += 1,
            None => summary.users_failed += 1,
        }
    }

    for (file, name) in SAMPLE_FILES {
        let path = samples_dir.join(file);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot read sample file, skipping");
                summary.files_skipped += 1;
                continue;
            }
        };

        match client.upload_file(name, bytes).await {
            Some(_) => summary.files_uploaded += 1,
            None => summary.files_failed += 1,
        }
    }

    info!(?summary, "Database population complete");
    summary
}

/// Full run against a freshly started server.
///
/// The child is killed on every path: explicitly after population, or on drop
/// when an earlier step fails.
pub async fn run(config: &CliConfig) -> Result<PopulateSummary, PopulateError> {
    // the readiness line gets the same budget as the health checks
    let ready_timeout = config.health_interval * config.health_attempts;
    let server =
        server::start(&config.server_command, &config.ready_marker, ready_timeout).await?;
    let client = ApiClient::new(&config.server_url, &config.api_token)?;

    client
        .wait_for_health(config.health_attempts, config.health_interval)
        .await?;
    info!(pid = ?server.id(), "Server is healthy");

    let summary = populate(&client, &config.sample_files_dir).await;

    server.shutdown().await?;
    Ok(summary)
}
