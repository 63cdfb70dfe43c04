use anyhow::Result;
use hometask_core::listing;
use hometask_core::store::Stores;
use owo_colors::OwoColorize;

use crate::render::friendly_date;

pub async fn run(stores: &Stores, id: String) -> Result<()> {
    let events = stores.events().load().await;
    let event = match listing::find_by_id(&events, &id) {
        Some(event) => event,
        None => anyhow::bail!("Event not found: {}", id),
    };

    println!("{}", event.title.bold());
    println!("  Date:   {}", friendly_date(event.date));
    if event.is_multi_day {
        let last = event.related_dates.last().copied().unwrap_or(event.date);
        println!("  Until:  {}", friendly_date(last));
    }
    println!(
        "  Time:   {} - {}",
        event.start_time.format("%H:%M"),
        event.end_time.format("%H:%M")
    );
    println!("  Repeat: {}", event.repeat.label());
    println!("  Alarm:  {}", event.alarm.label());

    let alarms = stores.alarms().load().await;
    if let Some(entry) = alarms.get(&id) {
        if entry.handle.is_some() {
            println!("          {}", "notification scheduled".green());
        } else {
            println!("          {}", "notification not registered".dimmed());
        }
    }

    println!("  Id:     {}", event.id.dimmed());

    Ok(())
}
