//! Alarm trigger computation and notification registration.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::event::{AlarmSetting, EventRecord};
use crate::notify::{NotificationRequest, Notifier};

/// The instant an alarm should fire: event start minus the alarm offset.
/// `None` for the no-alarm setting.
pub fn alarm_time(date: NaiveDate, start: NaiveTime, setting: AlarmSetting) -> Option<NaiveDateTime> {
    let offset = setting.offset()?;
    Some(date.and_time(start) - offset)
}

/// Register a notification for an event's alarm.
///
/// Returns the backend's opaque handle, or `None` when the event has no
/// alarm, the trigger instant is already in the past (no retroactive
/// firing), or registration failed. The event itself saves either way;
/// alarms are best-effort.
pub async fn schedule_alarm_for_event(
    notifier: &dyn Notifier,
    event: &EventRecord,
    now: NaiveDateTime,
) -> Option<String> {
    let at = alarm_time(event.date, event.start_time, event.alarm)?;

    if at < now {
        return None;
    }

    let request = NotificationRequest {
        event_id: event.id.clone(),
        title: format!("HomeTask: {}", event.title),
        body: format!("Event starts at {}", event.start_time.format("%H:%M")),
        trigger_seconds: (at - now).num_seconds(),
    };

    notifier.schedule(&request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Repeat;
    use crate::notify::recording::RecordingNotifier;

    fn event(alarm: AlarmSetting) -> EventRecord {
        EventRecord {
            id: "100-0".to_string(),
            title: "Standup".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            repeat: Repeat::None,
            alarm,
            is_multi_day: false,
            related_dates: vec![],
        }
    }

    fn at(date: (i32, u32, u32), time: (u32, u32)) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap())
    }

    // --- alarm_time ---

    #[test]
    fn alarm_time_subtracts_offset() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
        let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();

        assert_eq!(
            alarm_time(date, start, AlarmSetting::AtTime),
            Some(at((2026, 3, 20), (9, 0)))
        );
        assert_eq!(
            alarm_time(date, start, AlarmSetting::FifteenMin),
            Some(at((2026, 3, 20), (8, 45)))
        );
        assert_eq!(
            alarm_time(date, start, AlarmSetting::OneDay),
            Some(at((2026, 3, 19), (9, 0)))
        );
    }

    #[test]
    fn alarm_time_none_setting() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
        let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(alarm_time(date, start, AlarmSetting::None), None);
    }

    // --- schedule_alarm_for_event ---

    #[tokio::test]
    async fn schedules_future_alarm() {
        let notifier = RecordingNotifier::new();
        let now = at((2026, 3, 20), (8, 0));

        let handle =
            schedule_alarm_for_event(&notifier, &event(AlarmSetting::FifteenMin), now).await;
        assert_eq!(handle, Some("handle-1".to_string()));

        let scheduled = notifier.scheduled.lock().unwrap();
        let request = &scheduled[0];
        assert_eq!(request.event_id, "100-0");
        assert_eq!(request.title, "HomeTask: Standup");
        assert_eq!(request.body, "Event starts at 09:00");
        // 08:00 -> 08:45 trigger
        assert_eq!(request.trigger_seconds, 45 * 60);
    }

    #[tokio::test]
    async fn no_alarm_setting_registers_nothing() {
        let notifier = RecordingNotifier::new();
        let now = at((2026, 3, 20), (8, 0));

        let handle = schedule_alarm_for_event(&notifier, &event(AlarmSetting::None), now).await;
        assert_eq!(handle, None);
        assert!(notifier.scheduled.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn past_trigger_is_refused() {
        let notifier = RecordingNotifier::new();
        // Trigger would be 08:45; it's already 08:50.
        let now = at((2026, 3, 20), (8, 50));

        let handle =
            schedule_alarm_for_event(&notifier, &event(AlarmSetting::FifteenMin), now).await;
        assert_eq!(handle, None);
        assert!(notifier.scheduled.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn trigger_exactly_now_still_schedules() {
        let notifier = RecordingNotifier::new();
        let now = at((2026, 3, 20), (8, 45));

        let handle =
            schedule_alarm_for_event(&notifier, &event(AlarmSetting::FifteenMin), now).await;
        assert!(handle.is_some());
        assert_eq!(notifier.scheduled.lock().unwrap()[0].trigger_seconds, 0);
    }

    #[tokio::test]
    async fn registration_failure_becomes_none() {
        let notifier = RecordingNotifier::failing();
        let now = at((2026, 3, 20), (8, 0));

        let handle =
            schedule_alarm_for_event(&notifier, &event(AlarmSetting::FiveMin), now).await;
        assert_eq!(handle, None);
    }
}
