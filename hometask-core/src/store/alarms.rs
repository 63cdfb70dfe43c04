//! The alarm document: event id -> scheduled-notification entry.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::HomeTaskResult;
use crate::event::{hhmm, AlarmSetting, EventRecord};

/// Id-keyed alarm mapping. The map key is the owning event's id.
pub type AlarmMap = BTreeMap<String, AlarmEntry>;

/// One scheduled notification. The event fields are denormalized copies
/// taken at scheduling time so the notification body can be reconstructed
/// without reloading the event. The handle is the opaque reference the
/// notifier returned, kept beside the metadata for later cancellation;
/// it is absent when registration was skipped or failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmEntry {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub title: String,
    pub alarm_setting: AlarmSetting,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
}

impl AlarmEntry {
    pub fn for_event(event: &EventRecord, handle: Option<String>) -> Self {
        AlarmEntry {
            date: event.date,
            time: event.start_time,
            title: event.title.clone(),
            alarm_setting: event.alarm,
            handle,
        }
    }
}

pub struct AlarmStore {
    path: PathBuf,
}

impl AlarmStore {
    pub fn new(path: PathBuf) -> Self {
        AlarmStore { path }
    }

    /// Load the full mapping. Missing or malformed documents yield an
    /// empty mapping.
    pub async fn load(&self) -> AlarmMap {
        super::read_document(&self.path).await
    }

    /// Persist the full mapping, replacing prior content.
    pub async fn save(&self, alarms: &AlarmMap) -> HomeTaskResult<()> {
        super::write_document(&self.path, alarms).await
    }
}
