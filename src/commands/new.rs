use anyhow::Result;
use chrono::Local;
use dialoguer::Confirm;
use hometask_core::date_range::DateRange;
use hometask_core::event::{parse_time, AlarmSetting, EventDraft, Repeat};
use hometask_core::listing;
use hometask_core::notify::Notifier;
use hometask_core::reconcile::DraftInput;
use hometask_core::store::Stores;
use owo_colors::OwoColorize;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    stores: &Stores,
    notifier: &dyn Notifier,
    title: String,
    date: String,
    end_date: Option<String>,
    start: String,
    end: String,
    repeat: Option<String>,
    alarm: Option<String>,
    force: bool,
) -> Result<()> {
    // --- Validation (the reconciler expects clean input) ---
    let title = title.trim().to_string();
    if title.is_empty() {
        anyhow::bail!("Title cannot be empty");
    }

    let range = DateRange::from_args(&date, end_date.as_deref())?;
    let today = Local::now().date_naive();
    if range.start < today {
        anyhow::bail!("Cannot create events on past dates");
    }

    let start_time = parse_time(&start)?;
    let end_time = parse_time(&end)?;
    if end_time <= start_time {
        anyhow::bail!("End time must be after start time");
    }

    let repeat = match repeat {
        Some(s) => s.parse::<Repeat>().map_err(anyhow::Error::msg)?,
        None => Repeat::None,
    };
    let alarm = match alarm {
        Some(s) => s.parse::<AlarmSetting>().map_err(anyhow::Error::msg)?,
        None => AlarmSetting::None,
    };

    // --- Overlap warning (same day only; never blocks by itself) ---
    let events = stores.events().load().await;
    if let Some(existing) = listing::first_conflict(&events, range.start, start_time, end_time, None)
    {
        println!(
            "{}",
            format!(
                "Time conflict: overlaps \"{}\" ({}-{})",
                existing.title,
                existing.start_time.format("%H:%M"),
                existing.end_time.format("%H:%M")
            )
            .yellow()
        );

        if !force {
            let proceed = Confirm::new()
                .with_prompt("  Create anyway?")
                .default(false)
                .interact()?;
            if !proceed {
                println!("{}", "Cancelled".dimmed());
                return Ok(());
            }
        }
    }

    let draft = EventDraft {
        id: None,
        title,
        start_time,
        end_time,
        repeat,
        alarm,
    };

    super::save_resolving_duplicates(stores, notifier, DraftInput { draft, range }, force).await
}
