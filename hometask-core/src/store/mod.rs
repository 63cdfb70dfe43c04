//! Persisted JSON document stores.
//!
//! Two single-slot documents live in the data directory: `events.json`
//! (date -> event records) and `alarms.json` (event id -> alarm entry).
//! Loads fail soft to an empty mapping; saves replace the whole document
//! via write-to-temp-then-rename. There is no cross-process locking;
//! concurrent writers are last-write-wins. In-process callers must hold
//! the store lock across each load-mutate-save sequence.

mod alarms;
mod events;

pub use alarms::{AlarmEntry, AlarmMap, AlarmStore};
pub use events::{EventMap, EventStore};

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};
use tracing::warn;

use crate::error::{HomeTaskError, HomeTaskResult};

/// The store pair plus the in-process write lock serializing
/// load-mutate-save sequences over both documents.
pub struct Stores {
    events: EventStore,
    alarms: AlarmStore,
    write_lock: Mutex<()>,
}

impl Stores {
    pub fn open(data_dir: &Path) -> Self {
        Stores {
            events: EventStore::new(data_dir.join("events.json")),
            alarms: AlarmStore::new(data_dir.join("alarms.json")),
            write_lock: Mutex::new(()),
        }
    }

    pub fn events(&self) -> &EventStore {
        &self.events
    }

    pub fn alarms(&self) -> &AlarmStore {
        &self.alarms
    }

    /// Acquire the write lock. Hold the guard for the full
    /// load-mutate-save sequence.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}

/// Read a JSON document, returning the default value when the file is
/// missing or does not deserialize.
pub(crate) async fn read_document<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return T::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            warn!("Discarding malformed document {}: {}", path.display(), e);
            T::default()
        }
    }
}

/// Persist a JSON document, replacing prior content. Writes to a temp file
/// in the same directory and renames it into place.
pub(crate) async fn write_document<T>(path: &Path, value: &T) -> HomeTaskResult<()>
where
    T: Serialize,
{
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }

    let content = serde_json::to_string_pretty(value)
        .map_err(|e| HomeTaskError::Serialization(e.to_string()))?;

    let temp = path.with_extension("json.tmp");
    if let Err(e) = tokio::fs::write(&temp, &content).await {
        warn!("Failed to write {}: {}", temp.display(), e);
        return Err(e.into());
    }
    if let Err(e) = tokio::fs::rename(&temp, path).await {
        warn!("Failed to replace {}: {}", path.display(), e);
        return Err(e.into());
    }
    Ok(())
}
