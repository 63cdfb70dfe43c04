//! Terminal rendering for hometask types.

use chrono::NaiveDate;
use hometask_core::event::{AlarmSetting, EventRecord};
use owo_colors::OwoColorize;

/// Extension trait for colored terminal rendering.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventRecord {
    fn render(&self) -> String {
        let time = format!(
            "{}-{}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        );

        let mut line = format!("{} {}", time, self.title);
        if self.is_multi_day {
            line.push_str(&format!(" ({} days)", self.related_dates.len() + 1));
        }
        if self.alarm != AlarmSetting::None {
            line.push_str(&format!(" [{}]", self.alarm));
        }

        format!("{} {}", line, format!("({})", self.id).dimmed())
    }
}

/// Format a date like "fri feb 28 2026".
pub fn friendly_date(date: NaiveDate) -> String {
    date.format("%a %b %-d %Y").to_string().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use hometask_core::event::Repeat;

    #[test]
    fn friendly_date_format() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        assert_eq!(friendly_date(date), "sat feb 28 2026");
    }

    #[test]
    fn friendly_date_single_digit_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(friendly_date(date), "thu mar 5 2026");
    }

    #[test]
    fn render_includes_span_and_alarm() {
        let record = EventRecord {
            id: "1-0".to_string(),
            title: "Trip".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            repeat: Repeat::None,
            alarm: AlarmSetting::OneHour,
            is_multi_day: true,
            related_dates: vec![
                NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
            ],
        };

        let line = record.render();
        assert!(line.contains("09:00-17:00"));
        assert!(line.contains("(3 days)"));
        assert!(line.contains("[1hour]"));
        assert!(line.contains("1-0"));
    }
}
