//! `bigdealx` subprocess invocation.
//!
//! Spawns the configured executable once per session with the split
//! key, the base64 disclosed value, the mode flag, the output name,
//! and the board range. Output is captured; a non-zero exit or a
//! launch failure surfaces the diagnostics verbatim.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::AdapterError;

use super::{DealGenerator, SessionRequest};

/// Default per-invocation deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// The `bigdealx` executable as a [`DealGenerator`].
///
/// The executable path is an explicit configuration value carried by
/// the instance; nothing here reads process-wide mutable state.
#[derive(Debug, Clone)]
pub struct BigDealX {
    executable: PathBuf,
    working_dir: Option<PathBuf>,
    timeout: Duration,
}

impl BigDealX {
    /// Creates an adapter for the executable at `path` with the default
    /// timeout and the caller's working directory.
    #[must_use]
    pub fn new(executable: PathBuf) -> Self {
        Self {
            executable,
            working_dir: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the working directory for invocations (normally the
    /// directory containing the public record, so deal files land next
    /// to it).
    #[must_use]
    pub fn with_working_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.working_dir = dir;
        self
    }

    /// Sets the per-invocation deadline.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl DealGenerator for BigDealX {
    async fn generate_session(&self, request: &SessionRequest) -> Result<(), AdapterError> {
        let mode = if request.reserve { "reserve" } else { "original" };

        debug!(
            executable = %self.executable.display(),
            output = %request.output_name,
            boards = %request.board_range,
            mode,
            "invoking deal generator"
        );

        let mut command = tokio::process::Command::new(&self.executable);
        command
            .arg("-W")
            .arg(&request.visible_key)
            .arg("-e")
            .arg(&request.hidden_key)
            .arg("-e")
            .arg(&request.delayed_value_b64)
            .arg("-e")
            .arg(mode)
            .arg("-p")
            .arg(&request.output_name)
            .arg("-n")
            .arg(&request.board_range)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let child = command.spawn().map_err(|e| AdapterError::SpawnFailed {
            message: e.to_string(),
        })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| AdapterError::Timeout {
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|e| AdapterError::SpawnFailed {
                message: e.to_string(),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(AdapterError::NonZeroExit {
                code: output.status.code(),
                stderr,
            });
        }

        if !stderr.is_empty() {
            warn!(stderr = %stderr, "deal generator produced stderr output");
        }

        Ok(())
    }
}
