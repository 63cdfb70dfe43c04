//! The event document: date -> list of event records.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::HomeTaskResult;
use crate::event::EventRecord;

/// Date-keyed event mapping. A BTreeMap keeps the persisted document and
/// every listing in ascending date order.
pub type EventMap = BTreeMap<NaiveDate, Vec<EventRecord>>;

pub struct EventStore {
    path: PathBuf,
}

impl EventStore {
    pub fn new(path: PathBuf) -> Self {
        EventStore { path }
    }

    /// Load the full mapping. Missing or malformed documents yield an
    /// empty mapping.
    pub async fn load(&self) -> EventMap {
        super::read_document(&self.path).await
    }

    /// Persist the full mapping, replacing prior content.
    pub async fn save(&self, events: &EventMap) -> HomeTaskResult<()> {
        super::write_document(&self.path, events).await
    }
}
