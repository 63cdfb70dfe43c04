//! Save reconciliation.
//!
//! Turns draft events plus date ranges into store mutations: id
//! generation, relocation across dates, duplicate-title detection, alarm
//! lifecycle, and a single persist of both documents per batch. Every
//! load-mutate-save sequence runs under the store write lock.

use chrono::{Local, Utc};
use tracing::debug;

use crate::date_range::DateRange;
use crate::error::HomeTaskResult;
use crate::event::{AlarmSetting, EventDraft, EventRecord};
use crate::notify::Notifier;
use crate::schedule::schedule_alarm_for_event;
use crate::store::{AlarmEntry, AlarmMap, EventMap, Stores};

/// One draft plus the dates it should cover.
#[derive(Debug, Clone)]
pub struct DraftInput {
    pub draft: EventDraft,
    pub range: DateRange,
}

/// What to do when the primary date already holds a record with the
/// draft's title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Report the conflict back to the caller; the draft is not applied.
    Report,
    /// Delete the conflicting record (and its alarm) everywhere, then
    /// apply the draft unconditionally.
    Overwrite,
}

/// Per-draft result of a save.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(EventRecord),
    Duplicate {
        title: String,
        date: chrono::NaiveDate,
        existing_id: String,
    },
}

pub struct Reconciler<'a> {
    stores: &'a Stores,
    notifier: &'a dyn Notifier,
}

impl<'a> Reconciler<'a> {
    pub fn new(stores: &'a Stores, notifier: &'a dyn Notifier) -> Self {
        Reconciler { stores, notifier }
    }

    /// Save a single draft. See [`Reconciler::save_batch`].
    pub async fn save(
        &self,
        input: DraftInput,
        policy: DuplicatePolicy,
    ) -> HomeTaskResult<SaveOutcome> {
        let mut outcomes = self.save_batch(vec![input], policy).await?;
        Ok(outcomes.remove(0))
    }

    /// Save a batch of drafts in input order against one freshly loaded
    /// working copy, persisting each store exactly once at the end.
    ///
    /// Because drafts apply to the working copy as they go, a batch that
    /// contains the same title twice for the same date reports the second
    /// draft as a duplicate of the first.
    pub async fn save_batch(
        &self,
        inputs: Vec<DraftInput>,
        policy: DuplicatePolicy,
    ) -> HomeTaskResult<Vec<SaveOutcome>> {
        let _guard = self.stores.lock().await;
        let mut events = self.stores.events().load().await;
        let mut alarms = self.stores.alarms().load().await;

        // One id base per batch; the index suffix keeps ids within the
        // batch distinct even when the millisecond clock collides.
        let base = Utc::now().timestamp_millis();

        let mut outcomes = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.into_iter().enumerate() {
            let outcome = self
                .apply(&mut events, &mut alarms, input, base, index, policy)
                .await;
            outcomes.push(outcome);
        }

        self.stores.events().save(&events).await?;
        self.stores.alarms().save(&alarms).await?;
        Ok(outcomes)
    }

    /// Delete an event wherever it is filed, cancel any registered
    /// notification, and drop its alarm entry.
    pub async fn delete(&self, id: &str) -> HomeTaskResult<Option<EventRecord>> {
        let _guard = self.stores.lock().await;
        let mut events = self.stores.events().load().await;
        let mut alarms = self.stores.alarms().load().await;

        let removed = remove_record(&mut events, id);
        self.drop_alarm(&mut alarms, id).await;

        self.stores.events().save(&events).await?;
        self.stores.alarms().save(&alarms).await?;
        Ok(removed)
    }

    /// Apply one draft to the working copies.
    async fn apply(
        &self,
        events: &mut EventMap,
        alarms: &mut AlarmMap,
        input: DraftInput,
        base: i64,
        index: usize,
        policy: DuplicatePolicy,
    ) -> SaveOutcome {
        let dates = input.range.dates();
        let primary = dates[0];

        let id = match &input.draft.id {
            Some(id) => id.clone(),
            None => format!("{}-{}", base, index),
        };

        // Duplicate-title check against the primary date's bucket only
        // (never relatedDates), excluding the record being updated.
        let conflict = events.get(&primary).and_then(|bucket| {
            bucket
                .iter()
                .find(|e| e.title == input.draft.title && e.id != id)
                .map(|e| e.id.clone())
        });
        if let Some(existing_id) = conflict {
            match policy {
                DuplicatePolicy::Report => {
                    return SaveOutcome::Duplicate {
                        title: input.draft.title,
                        date: primary,
                        existing_id,
                    };
                }
                DuplicatePolicy::Overwrite => {
                    debug!("Overwriting '{}' ({}) on {}", input.draft.title, existing_id, primary);
                    remove_record(events, &existing_id);
                    self.drop_alarm(alarms, &existing_id).await;
                }
            }
        }

        // An update may have moved dates since last save; sweep its id
        // out of every bucket before re-filing.
        if input.draft.id.is_some() {
            remove_record(events, &id);
        }

        let record = EventRecord {
            id: id.clone(),
            title: input.draft.title,
            date: primary,
            start_time: input.draft.start_time,
            end_time: input.draft.end_time,
            repeat: input.draft.repeat,
            alarm: input.draft.alarm,
            is_multi_day: dates.len() > 1,
            related_dates: dates[1..].to_vec(),
        };
        events.entry(primary).or_default().push(record.clone());

        // The previous registration under this id is always cancelled,
        // even when the new alarm is none.
        self.drop_alarm(alarms, &id).await;
        if record.alarm != AlarmSetting::None {
            let handle =
                schedule_alarm_for_event(self.notifier, &record, Local::now().naive_local()).await;
            alarms.insert(id, AlarmEntry::for_event(&record, handle));
        }

        SaveOutcome::Saved(record)
    }

    async fn drop_alarm(&self, alarms: &mut AlarmMap, id: &str) {
        if let Some(entry) = alarms.remove(id) {
            if let Some(handle) = entry.handle {
                self.notifier.cancel(&handle).await;
            }
        }
    }
}

/// Remove an id from every date bucket, pruning buckets left empty.
/// Returns the first removed record.
fn remove_record(events: &mut EventMap, id: &str) -> Option<EventRecord> {
    let mut removed = None;
    events.retain(|_, bucket| {
        if let Some(pos) = bucket.iter().position(|e| e.id == id) {
            let record = bucket.remove(pos);
            if removed.is_none() {
                removed = Some(record);
            }
        }
        !bucket.is_empty()
    });
    removed
}
