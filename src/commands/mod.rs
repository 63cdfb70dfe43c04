pub mod alarms;
pub mod delete;
pub mod duplicate;
pub mod edit;
pub mod import;
pub mod list;
pub mod new;
pub mod show;

use anyhow::Result;
use dialoguer::Select;
use hometask_core::event::AlarmSetting;
use hometask_core::notify::Notifier;
use hometask_core::reconcile::{DraftInput, DuplicatePolicy, Reconciler, SaveOutcome};
use hometask_core::store::Stores;
use owo_colors::OwoColorize;

use crate::render;

/// Save one draft, resolving a duplicate-title conflict interactively:
/// the user chooses between skipping and overwriting, unless `force`
/// already decided for overwrite.
pub(crate) async fn save_resolving_duplicates(
    stores: &Stores,
    notifier: &dyn Notifier,
    input: DraftInput,
    force: bool,
) -> Result<()> {
    let reconciler = Reconciler::new(stores, notifier);
    let policy = if force {
        DuplicatePolicy::Overwrite
    } else {
        DuplicatePolicy::Report
    };

    let mut outcome = reconciler.save(input.clone(), policy).await?;

    if let SaveOutcome::Duplicate { title, date, .. } = &outcome {
        println!(
            "{}",
            format!(
                "An event titled \"{}\" already exists on {}",
                title,
                render::friendly_date(*date)
            )
            .yellow()
        );

        let choice = Select::new()
            .with_prompt("  What now?")
            .items(&["Skip", "Overwrite"])
            .default(0)
            .interact()?;

        if choice == 0 {
            println!("{}", "Skipped".dimmed());
            return Ok(());
        }

        outcome = reconciler.save(input, DuplicatePolicy::Overwrite).await?;
    }

    if let SaveOutcome::Saved(record) = outcome {
        println!("{}", format!("Saved: {} ({})", record.title, record.id).green());
        if record.alarm != AlarmSetting::None {
            println!("  Alarm: {}", record.alarm.label());
        }
    }

    Ok(())
}
