//! Backend server child process.
//!
//! The server is started through the platform shell with both output pipes
//! captured. [`start`] returns once a stdout line contains the readiness
//! marker; from then on both streams are forwarded to the log by background
//! tasks until the process goes away.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};
use tracing::{debug, info, warn};

use crate::error::PopulateError;

/// A running server. Dropping it kills the child.
pub struct ServerProcess {
    child: Child,
}

impl ServerProcess {
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Kill the child and wait for it to exit.
    pub async fn shutdown(mut self) -> Result<(), PopulateError> {
        info!(pid = ?self.child.id(), "Shutting down server");
        self.child.kill().await?;
        Ok(())
    }
}

fn shell(command: &str) -> Command {
    #[cfg(windows)]
    let mut cmd = {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C");
        cmd
    };
    #[cfg(not(windows))]
    let mut cmd = {
        let mut cmd = Command::new("sh");
        cmd.arg("-c");
        cmd
    };
    cmd.arg(command);
    cmd
}

/// Spawn `command` and wait until its stdout contains `marker`.
///
/// Gives up after `ready_timeout`; the child is killed when the returned
/// error drops it.
pub async fn start(
    command: &str,
    marker: &str,
    ready_timeout: Duration,
) -> Result<ServerProcess, PopulateError> {
    info!(command, "Starting server");

    let mut child = shell(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| PopulateError::Spawn {
            command: command.to_string(),
            source,
        })?;

    // stderr is drained from the start so a chatty server never blocks on it
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(forward(stderr, "stderr"));
    }

    let stdout = child.stdout.take().ok_or(PopulateError::NoStdout)?;
    let mut lines = BufReader::new(stdout).lines();

    match tokio::time::timeout(ready_timeout, wait_for_marker(&mut lines, marker)).await {
        Ok(Ok(true)) => {}
        Ok(Ok(false)) => {
            let status = child.wait().await?;
            warn!(%status, "Server exited before becoming ready");
            return Err(PopulateError::ExitedEarly {
                marker: marker.to_string(),
            });
        }
        Ok(Err(e)) => return Err(e.into()),
        Err(_) => {
            warn!(pid = ?child.id(), "Server never printed its readiness line");
            return Err(PopulateError::NotReady {
                marker: marker.to_string(),
                secs: ready_timeout.as_secs(),
            });
        }
    }

    info!(pid = ?child.id(), "Server started successfully");

    tokio::spawn(async move {
        while let Ok(Some(line)) = lines.next_line().await {
            info!(stream = "stdout", "{line}");
        }
    });

    Ok(ServerProcess { child })
}

/// Read stdout until a line contains `marker`. `false` means end of output.
async fn wait_for_marker(
    lines: &mut Lines<BufReader<ChildStdout>>,
    marker: &str,
) -> std::io::Result<bool> {
    while let Some(line) = lines.next_line().await? {
        debug!(stream = "stdout", "{line}");
        if line.contains(marker) {
            return Ok(true);
        }
    }
    Ok(false)
}

async fn forward<R>(reader: R, stream: &'static str)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        warn!(stream, "{line}");
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready_on_marker() {
        let server = start(
            "echo booting; echo 'Starting server on :8080'; sleep 5",
            "Starting server on",
            Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert!(server.id().is_some());
        server.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_exit_before_marker() {
        let err = start(
            "echo 'compile error' >&2; echo done",
            "Starting server on",
            Duration::from_secs(5),
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(err, PopulateError::ExitedEarly { .. }));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let started = std::time::Instant::now();
        let err = start(
            "echo compiling; sleep 30",
            "Starting server on",
            Duration::from_millis(200),
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(err, PopulateError::NotReady { .. }));
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
