use anyhow::Result;
use hometask_core::store::Stores;
use owo_colors::OwoColorize;

use crate::render::friendly_date;

pub async fn run(stores: &Stores) -> Result<()> {
    let alarms = stores.alarms().load().await;

    if alarms.is_empty() {
        println!("{}", "No alarms scheduled".dimmed());
        return Ok(());
    }

    println!("{}", format!("Alarms ({})", alarms.len()).bold());
    for (id, entry) in &alarms {
        let status = if entry.handle.is_some() {
            "scheduled".green().to_string()
        } else {
            "not registered".dimmed().to_string()
        };
        println!(
            "  {} {}  {}  {} [{}] {}",
            friendly_date(entry.date),
            entry.time.format("%H:%M"),
            entry.title,
            status,
            entry.alarm_setting.label(),
            format!("({})", id).dimmed()
        );
    }

    Ok(())
}
