use anyhow::Result;
use dialoguer::Confirm;
use hometask_core::listing;
use hometask_core::notify::Notifier;
use hometask_core::reconcile::Reconciler;
use hometask_core::store::Stores;
use owo_colors::OwoColorize;

use crate::render::friendly_date;

pub async fn run(stores: &Stores, notifier: &dyn Notifier, id: String, yes: bool) -> Result<()> {
    let events = stores.events().load().await;
    let existing = match listing::find_by_id(&events, &id) {
        Some(event) => event,
        None => anyhow::bail!("Event not found: {}", id),
    };

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "  Delete \"{}\" on {}?",
                existing.title,
                friendly_date(existing.date)
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let reconciler = Reconciler::new(stores, notifier);
    reconciler.delete(&id).await?;

    println!("{}", format!("Deleted: {}", existing.title).green());
    Ok(())
}
