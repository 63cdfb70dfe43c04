//! Subprocess notifier backend.
//!
//! Spawns an external notifier binary and speaks the JSON protocol over
//! stdin/stdout. The binary owns the actual platform registration and
//! returns an opaque handle string.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as ProcessCommand;
use tokio::time::timeout;
use tracing::warn;

use super::{Command, NotificationRequest, Notifier, Request, Response};
use crate::error::{HomeTaskError, HomeTaskResult};

pub const DEFAULT_NOTIFIER_BIN: &str = "hometask-notifier";

const NOTIFIER_TIMEOUT: Duration = Duration::from_secs(10);

/// Notifier backed by an external program found on PATH.
pub struct CommandNotifier {
    program: String,
}

impl CommandNotifier {
    pub fn new(program: &str) -> Self {
        CommandNotifier {
            program: program.to_string(),
        }
    }

    fn binary_path(&self) -> HomeTaskResult<std::path::PathBuf> {
        which::which(&self.program)
            .map_err(|_| HomeTaskError::NotifierNotInstalled(self.program.clone()))
    }

    /// Call a notifier command and return the result.
    async fn call<R: DeserializeOwned>(
        &self,
        command: Command,
        params: serde_json::Value,
    ) -> HomeTaskResult<R> {
        timeout(NOTIFIER_TIMEOUT, self.call_inner(command, params))
            .await
            .map_err(|_| HomeTaskError::NotifierTimeout(NOTIFIER_TIMEOUT.as_secs()))?
    }

    async fn call_inner<R: DeserializeOwned>(
        &self,
        command: Command,
        params: serde_json::Value,
    ) -> HomeTaskResult<R> {
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| HomeTaskError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;

        let mut child = ProcessCommand::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .spawn()
            .map_err(|e| {
                HomeTaskError::Notifier(format!("Failed to spawn {}: {}", binary_path.display(), e))
            })?;

        // Write request to stdin (unwrap safe: we piped stdin above)
        let mut stdin = child.stdin.take().unwrap();
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(HomeTaskError::Notifier(format!(
                "Notifier exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.is_empty() {
            return Err(HomeTaskError::Notifier("Notifier returned no response".into()));
        }

        let response: Response<R> = serde_json::from_str(&response_str)
            .map_err(|e| HomeTaskError::Notifier(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(HomeTaskError::Notifier(error)),
        }
    }
}

#[async_trait]
impl Notifier for CommandNotifier {
    async fn schedule(&self, request: &NotificationRequest) -> Option<String> {
        let params = match serde_json::to_value(request) {
            Ok(params) => params,
            Err(e) => {
                warn!("Failed to encode notification request: {}", e);
                return None;
            }
        };

        match self.call::<String>(Command::Schedule, params).await {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("Failed to schedule notification for {}: {}", request.event_id, e);
                None
            }
        }
    }

    async fn cancel(&self, handle: &str) {
        let params = serde_json::json!({ "handle": handle });
        if let Err(e) = self.call::<serde_json::Value>(Command::Cancel, params).await {
            warn!("Failed to cancel notification {}: {}", handle, e);
        }
    }
}
