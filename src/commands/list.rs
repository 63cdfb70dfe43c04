use anyhow::Result;
use chrono::{Local, NaiveDate};
use hometask_core::event::EventRecord;
use hometask_core::listing;
use hometask_core::store::Stores;
use owo_colors::OwoColorize;

use crate::render::{friendly_date, Render};

pub async fn run(stores: &Stores, show_past: bool) -> Result<()> {
    let events = stores.events().load().await;
    let today = Local::now().date_naive();
    let parts = listing::partition(&events, today);

    if parts.upcoming.is_empty() && parts.past.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    if parts.upcoming.is_empty() {
        println!("{}", "No upcoming events".dimmed());
    } else {
        println!("{}", format!("Upcoming Events ({})", parts.upcoming.len()).bold());
        print_grouped(&parts.upcoming, today);
    }

    if show_past {
        if !parts.past.is_empty() {
            println!();
            println!("{}", format!("Past Events ({})", parts.past.len()).bold());
            print_grouped(&parts.past, today);
        }
    } else if !parts.past.is_empty() {
        println!();
        println!(
            "{}",
            format!("{} past events hidden (use --past to show them)", parts.past.len()).dimmed()
        );
    }

    Ok(())
}

/// Print events under one date header per day, in the order given.
fn print_grouped(events: &[EventRecord], today: NaiveDate) {
    let mut current_date: Option<NaiveDate> = None;

    for event in events {
        if current_date != Some(event.date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date_label(event.date, today).bold());
            current_date = Some(event.date);
        }
        println!("  {}", event.render());
    }
}

/// Label a date, calling out today and tomorrow.
fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => friendly_date(date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_labels() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        assert_eq!(date_label(today, today), "Today");
        assert_eq!(
            date_label(NaiveDate::from_ymd_opt(2026, 3, 11).unwrap(), today),
            "Tomorrow"
        );
        assert_eq!(
            date_label(NaiveDate::from_ymd_opt(2026, 3, 13).unwrap(), today),
            "fri mar 13 2026"
        );
        // Past dates get the plain form, not a relative label.
        assert_eq!(
            date_label(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(), today),
            "mon mar 9 2026"
        );
    }
}
