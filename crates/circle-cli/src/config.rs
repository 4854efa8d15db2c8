//! Tool configuration loaded from environment variables.
//!
//! Every setting has a default so the tools run with zero configuration
//! from the repository root. Command-line flags override these values.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

/// Configuration shared by the `export`, `seed` and `populate` commands.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// SQLite database file.
    /// Env: `SQLITE_DB_PATH`
    /// Default: `database.sqlite` in the working directory
    pub db_path: PathBuf,

    /// Base URL of the backend server.
    /// Env: `SERVER_URL`
    /// Default: `http://localhost:8080`
    pub server_url: String,

    /// Shell command that starts the backend server.
    /// Env: `SERVER_COMMAND`
    /// Default: `go run ./backend/cmd/server/main.go`
    pub server_command: String,

    /// Stdout fragment that marks the server as started.
    pub ready_marker: String,

    /// Bearer token sent with every API request.
    /// Env: `API_TOKEN`
    /// Default: `dummy_token`
    pub api_token: String,

    /// Directory holding the sample files to upload.
    /// Env: `SAMPLE_FILES_DIR`
    /// Default: `./sample_files`
    pub sample_files_dir: PathBuf,

    /// Health checks before giving up.
    pub health_attempts: u32,

    /// Pause between two health checks.
    pub health_interval: Duration,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("database.sqlite"),
            server_url: "http://localhost:8080".to_string(),
            server_command: "go run ./backend/cmd/server/main.go".to_string(),
            ready_marker: "Starting server on".to_string(),
            api_token: "dummy_token".to_string(),
            sample_files_dir: PathBuf::from("./sample_files"),
            health_attempts: 30,
            health_interval: Duration::from_secs(1),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`CliConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("SQLITE_DB_PATH") {
            if !path.is_empty() {
                config.db_path = PathBuf::from(path);
            }
        }

        if let Some(url) = lookup("SERVER_URL") {
            match Url::parse(&url) {
                Ok(_) => config.server_url = url.trim_end_matches('/').to_string(),
                Err(e) => {
                    tracing::warn!(value = %url, error = %e, "Invalid SERVER_URL, using default");
                }
            }
        }

        if let Some(cmd) = lookup("SERVER_COMMAND") {
            if !cmd.trim().is_empty() {
                config.server_command = cmd;
            }
        }

        if let Some(token) = lookup("API_TOKEN") {
            if !token.is_empty() {
                config.api_token = token;
            }
        }

        if let Some(dir) = lookup("SAMPLE_FILES_DIR") {
            config.sample_files_dir = PathBuf::from(dir);
        }

        // RUST_LOG is read by tracing-subscriber's EnvFilter directly.

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> CliConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.db_path, PathBuf::from("database.sqlite"));
        assert_eq!(config.server_url, "http://localhost:8080");
        assert_eq!(config.api_token, "dummy_token");
        assert_eq!(config.health_attempts, 30);
        assert_eq!(config.health_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_env_overrides() {
        let config = from_pairs(&[
            ("SQLITE_DB_PATH", "/tmp/circle.db"),
            ("SERVER_URL", "http://127.0.0.1:9000/"),
            ("SERVER_COMMAND", "./server"),
            ("API_TOKEN", "secret"),
        ]);
        assert_eq!(config.db_path, PathBuf::from("/tmp/circle.db"));
        assert_eq!(config.server_url, "http://127.0.0.1:9000");
        assert_eq!(config.server_command, "./server");
        assert_eq!(config.api_token, "secret");
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = from_pairs(&[("SERVER_URL", "not a url"), ("API_TOKEN", "")]);
        assert_eq!(config.server_url, CliConfig::default().server_url);
        assert_eq!(config.api_token, "dummy_token");
    }
}
