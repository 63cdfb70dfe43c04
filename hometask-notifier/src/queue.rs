//! The queued-notification document.
//!
//! `notifications.json` maps handle -> pending notification. The protocol
//! front end enqueues and cancels entries; `run` drains the ones that have
//! come due and shows them on the desktop.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use chrono::{Duration, NaiveDateTime};
use hometask_core::notify::NotificationRequest;
use serde::{Deserialize, Serialize};

pub type Queue = BTreeMap<String, PendingNotification>;

/// One notification waiting to be shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingNotification {
    /// The hometask event this notification belongs to.
    pub event_id: String,
    pub title: String,
    pub body: String,
    /// Local wall-clock instant the notification should be shown.
    pub fire_at: NaiveDateTime,
}

/// Load the queue, empty when the file is missing or malformed.
pub fn load(path: &Path) -> Queue {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Queue::new(),
    };
    serde_json::from_str(&content).unwrap_or_default()
}

/// Persist the queue, replacing prior content. Writes to a temp file in
/// the same directory and renames it into place.
pub fn save(path: &Path, queue: &Queue) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let temp = path.with_extension("json.tmp");
    std::fs::write(&temp, serde_json::to_string_pretty(queue)?)?;
    std::fs::rename(&temp, path)?;
    Ok(())
}

/// Queue a notification `trigger_seconds` from `now`, returning its handle.
pub fn enqueue(queue: &mut Queue, request: &NotificationRequest, now: NaiveDateTime) -> String {
    let fire_at = now + Duration::seconds(request.trigger_seconds);
    let handle = format!("ntf-{}-{}", now.and_utc().timestamp_millis(), request.event_id);

    queue.insert(
        handle.clone(),
        PendingNotification {
            event_id: request.event_id.clone(),
            title: request.title.clone(),
            body: request.body.clone(),
            fire_at,
        },
    );

    handle
}

/// Remove and return every entry due at `now`, earliest first.
pub fn take_due(queue: &mut Queue, now: NaiveDateTime) -> Vec<PendingNotification> {
    let handles: Vec<String> = queue
        .iter()
        .filter(|(_, entry)| entry.fire_at <= now)
        .map(|(handle, _)| handle.clone())
        .collect();

    let mut due: Vec<PendingNotification> = handles
        .iter()
        .filter_map(|handle| queue.remove(handle))
        .collect();
    due.sort_by_key(|entry| entry.fire_at);
    due
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::tempdir;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 20)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    fn request(event_id: &str, trigger_seconds: i64) -> NotificationRequest {
        NotificationRequest {
            event_id: event_id.to_string(),
            title: "HomeTask: Standup".to_string(),
            body: "Event starts at 09:00".to_string(),
            trigger_seconds,
        }
    }

    #[test]
    fn enqueue_computes_fire_instant() {
        let mut queue = Queue::new();
        let handle = enqueue(&mut queue, &request("100-0", 45 * 60), at(8, 0));

        let entry = &queue[&handle];
        assert_eq!(entry.fire_at, at(8, 45));
        assert_eq!(entry.event_id, "100-0");
    }

    #[test]
    fn handles_distinguish_events() {
        let mut queue = Queue::new();
        let a = enqueue(&mut queue, &request("100-0", 60), at(8, 0));
        let b = enqueue(&mut queue, &request("100-1", 60), at(8, 0));
        assert_ne!(a, b);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn take_due_drains_only_elapsed_entries() {
        let mut queue = Queue::new();
        enqueue(&mut queue, &request("a", 10 * 60), at(8, 0));
        enqueue(&mut queue, &request("b", 90 * 60), at(8, 0));

        let due = take_due(&mut queue, at(8, 30));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].event_id, "a");
        assert_eq!(queue.len(), 1);

        // Nothing left due; the queue is untouched.
        assert!(take_due(&mut queue, at(8, 30)).is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn take_due_orders_by_fire_instant() {
        let mut queue = Queue::new();
        enqueue(&mut queue, &request("later", 20 * 60), at(8, 0));
        enqueue(&mut queue, &request("sooner", 5 * 60), at(8, 0));

        let due = take_due(&mut queue, at(9, 0));
        let ids: Vec<&str> = due.iter().map(|e| e.event_id.as_str()).collect();
        assert_eq!(ids, vec!["sooner", "later"]);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notifications.json");

        let mut queue = Queue::new();
        enqueue(&mut queue, &request("100-0", 60), at(8, 0));
        save(&path, &queue).unwrap();

        assert_eq!(load(&path), queue);
        assert!(!dir.path().join("notifications.json.tmp").exists());
    }

    #[test]
    fn load_missing_or_malformed_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notifications.json");
        assert!(load(&path).is_empty());

        std::fs::write(&path, "{not json").unwrap();
        assert!(load(&path).is_empty());
    }
}
