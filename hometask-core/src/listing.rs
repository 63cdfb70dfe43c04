//! Listing support: flattening, dedup, past/upcoming partition, and
//! same-day overlap detection.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};

use crate::event::EventRecord;
use crate::store::EventMap;

/// Flatten the date-keyed store into a single list, deduplicating by id.
///
/// First occurrence wins, walking dates in ascending order. A record can
/// appear under more than one date in documents written by older save
/// paths; consumers must not render it twice.
pub fn flatten(events: &EventMap) -> Vec<EventRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut flat = Vec::new();

    for bucket in events.values() {
        for event in bucket {
            if seen.insert(&event.id) {
                flat.push(event.clone());
            }
        }
    }

    flat
}

/// Find a record by id, searching every date bucket.
pub fn find_by_id(events: &EventMap, id: &str) -> Option<EventRecord> {
    events
        .values()
        .flat_map(|bucket| bucket.iter())
        .find(|e| e.id == id)
        .cloned()
}

/// Events split for list display.
#[derive(Debug, Default)]
pub struct PartitionedEvents {
    /// Today or later, ascending by (date, start time).
    pub upcoming: Vec<EventRecord>,
    /// Strictly before today, descending by (date, start time).
    pub past: Vec<EventRecord>,
}

/// Partition the store's events around `today`.
///
/// Classification compares date components only; an event earlier today
/// is still upcoming. The flattened input is deduplicated by id first.
pub fn partition(events: &EventMap, today: NaiveDate) -> PartitionedEvents {
    let mut partitioned = PartitionedEvents::default();

    for event in flatten(events) {
        if event.date < today {
            partitioned.past.push(event);
        } else {
            partitioned.upcoming.push(event);
        }
    }

    partitioned
        .upcoming
        .sort_by_key(|e| (e.date, e.start_time));
    partitioned
        .past
        .sort_by(|a, b| (b.date, b.start_time).cmp(&(a.date, a.start_time)));

    partitioned
}

/// Find a record on `date` whose time range overlaps `start..end`,
/// skipping `exclude_id` (the record being edited). Ranges that merely
/// touch do not overlap.
pub fn first_conflict<'a>(
    events: &'a EventMap,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    exclude_id: Option<&str>,
) -> Option<&'a EventRecord> {
    events.get(&date)?.iter().find(|event| {
        if exclude_id == Some(event.id.as_str()) {
            return false;
        }
        start < event.end_time && end > event.start_time
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{AlarmSetting, Repeat};

    fn record(id: &str, title: &str, date: &str, start: (u32, u32), end: (u32, u32)) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            title: title.to_string(),
            date: date.parse().unwrap(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            repeat: Repeat::None,
            alarm: AlarmSetting::None,
            is_multi_day: false,
            related_dates: vec![],
        }
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn store(records: Vec<EventRecord>) -> EventMap {
        let mut map = EventMap::new();
        for r in records {
            map.entry(r.date).or_insert_with(Vec::new).push(r);
        }
        map
    }

    // --- flatten ---

    #[test]
    fn flatten_dedups_by_id_first_wins() {
        let mut map = store(vec![record("x", "Gym", "2026-03-01", (9, 0), (10, 0))]);
        // Same id filed under a second date by an older save path.
        map.entry(d("2026-03-02"))
            .or_insert_with(Vec::new)
            .push(record("x", "Gym (stale copy)", "2026-03-02", (9, 0), (10, 0)));

        let flat = flatten(&map);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].title, "Gym");
    }

    // --- partition ---

    #[test]
    fn partition_classifies_and_sorts() {
        let today = d("2026-03-10");
        let map = store(vec![
            record("a", "Old call", "2026-03-01", (9, 0), (10, 0)),
            record("b", "Older call", "2026-02-20", (9, 0), (10, 0)),
            record("c", "Today late", "2026-03-10", (18, 0), (19, 0)),
            record("d", "Today early", "2026-03-10", (8, 0), (9, 0)),
            record("e", "Next week", "2026-03-17", (9, 0), (10, 0)),
        ]);

        let parts = partition(&map, today);

        // On-today events are upcoming, even with the day half gone.
        let upcoming: Vec<&str> = parts.upcoming.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(upcoming, vec!["d", "c", "e"]);

        // Past runs most recent first.
        let past: Vec<&str> = parts.past.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(past, vec!["a", "b"]);
    }

    #[test]
    fn partition_sorts_same_day_by_start_time() {
        let today = d("2026-03-10");
        let map = store(vec![
            record("p2", "Lunch", "2026-03-09", (12, 0), (13, 0)),
            record("p1", "Breakfast", "2026-03-09", (8, 0), (9, 0)),
        ]);

        let parts = partition(&map, today);
        let past: Vec<&str> = parts.past.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(past, vec!["p2", "p1"]);
    }

    // --- find_by_id ---

    #[test]
    fn find_by_id_searches_all_buckets() {
        let map = store(vec![
            record("a", "Gym", "2026-03-01", (9, 0), (10, 0)),
            record("b", "Call", "2026-04-01", (9, 0), (10, 0)),
        ]);
        assert_eq!(find_by_id(&map, "b").unwrap().title, "Call");
        assert!(find_by_id(&map, "zzz").is_none());
    }

    // --- first_conflict ---

    #[test]
    fn overlapping_ranges_conflict() {
        let map = store(vec![record("a", "Gym", "2026-03-01", (9, 0), (10, 0))]);
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();

        assert!(first_conflict(&map, d("2026-03-01"), t(9, 30), t(10, 30), None).is_some());
        assert!(first_conflict(&map, d("2026-03-01"), t(8, 0), t(9, 1), None).is_some());
        // Fully contained.
        assert!(first_conflict(&map, d("2026-03-01"), t(9, 15), t(9, 45), None).is_some());
    }

    #[test]
    fn touching_ranges_do_not_conflict() {
        let map = store(vec![record("a", "Gym", "2026-03-01", (9, 0), (10, 0))]);
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();

        assert!(first_conflict(&map, d("2026-03-01"), t(10, 0), t(11, 0), None).is_none());
        assert!(first_conflict(&map, d("2026-03-01"), t(8, 0), t(9, 0), None).is_none());
    }

    #[test]
    fn conflict_skips_excluded_id_and_other_dates() {
        let map = store(vec![record("a", "Gym", "2026-03-01", (9, 0), (10, 0))]);
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();

        // Editing the event itself is not a self-conflict.
        assert!(first_conflict(&map, d("2026-03-01"), t(9, 0), t(10, 0), Some("a")).is_none());
        // Another date is never checked.
        assert!(first_conflict(&map, d("2026-03-02"), t(9, 0), t(10, 0), None).is_none());
    }
}
