//! Notification backends.
//!
//! Alarm registration goes through the [`Notifier`] trait so the scheduler
//! never depends on a concrete platform surface. The default backend is an
//! external notifier binary spoken to over stdio ([`CommandNotifier`]);
//! when none is installed, [`NullNotifier`] keeps saves working with alarms
//! degraded to metadata-only entries.

mod command;
mod protocol;

pub use command::{CommandNotifier, DEFAULT_NOTIFIER_BIN};
pub use protocol::{Command, Request, Response};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A local notification to register with the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    /// Correlates a notification tap back to the originating event.
    pub event_id: String,
    pub title: String,
    pub body: String,
    /// Relative offset from "now" at which to fire.
    pub trigger_seconds: i64,
}

/// Registration/cancellation seam for scheduled notifications.
///
/// Both operations are best-effort and must not raise: a failed
/// registration is reported as `None`, a failed cancellation is swallowed.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Register a notification, returning an opaque handle for later
    /// cancellation, or `None` when registration failed.
    async fn schedule(&self, request: &NotificationRequest) -> Option<String>;

    /// Cancel a previously registered notification. A missing or
    /// already-fired handle is not an error.
    async fn cancel(&self, handle: &str);
}

/// Backend used when no notifier program is available. Registers nothing.
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn schedule(&self, request: &NotificationRequest) -> Option<String> {
        debug!("No notifier backend; skipping alarm for {}", request.event_id);
        None
    }

    async fn cancel(&self, _handle: &str) {}
}

/// Resolve the backend from configuration: a configured program always
/// wins, otherwise the default binary is used if present on PATH.
pub fn from_config(configured: Option<&str>) -> Box<dyn Notifier> {
    match configured {
        Some(program) => Box::new(CommandNotifier::new(program)),
        None => {
            if which::which(DEFAULT_NOTIFIER_BIN).is_ok() {
                Box::new(CommandNotifier::new(DEFAULT_NOTIFIER_BIN))
            } else {
                Box::new(NullNotifier)
            }
        }
    }
}
