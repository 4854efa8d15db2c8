use thiserror::Error;

/// Failures that end a `populate` run.
///
/// Individual API calls never produce these: a failed upload or user
/// creation is logged and the run moves on.
#[derive(Error, Debug)]
pub enum PopulateError {
    #[error("Failed to start server `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server output is not captured")]
    NoStdout,

    #[error("Server exited before printing `{marker}`")]
    ExitedEarly { marker: String },

    #[error("Server did not print `{marker}` within {secs} seconds")]
    NotReady { marker: String, secs: u64 },

    #[error("Server failed to start within {0} seconds")]
    NotHealthy(u64),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
