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
    id: String,
    title: Option<String>,
    date: Option<String>,
    end_date: Option<String>,
    start: Option<String>,
    end: Option<String>,
    repeat: Option<String>,
    alarm: Option<String>,
    force: bool,
) -> Result<()> {
    let events = stores.events().load().await;
    let existing = match listing::find_by_id(&events, &id) {
        Some(event) => event,
        None => anyhow::bail!("Event not found: {}", id),
    };

    let today = Local::now().date_naive();
    if existing.date < today {
        anyhow::bail!("Cannot edit past events");
    }

    // --- Merge overrides onto the stored record ---
    let title = match title {
        Some(t) => {
            let t = t.trim().to_string();
            if t.is_empty() {
                anyhow::bail!("Title cannot be empty");
            }
            t
        }
        None => existing.title.clone(),
    };

    // Without an explicit date the event keeps its full current span.
    let range = match &date {
        Some(start_date) => DateRange::from_args(start_date, end_date.as_deref())?,
        None => DateRange::new(existing.date, existing.related_dates.last().copied())?,
    };
    if range.start < today {
        anyhow::bail!("Cannot move events to past dates");
    }

    let start_time = match start {
        Some(s) => parse_time(&s)?,
        None => existing.start_time,
    };
    let end_time = match end {
        Some(s) => parse_time(&s)?,
        None => existing.end_time,
    };
    if end_time <= start_time {
        anyhow::bail!("End time must be after start time");
    }

    let repeat = match repeat {
        Some(s) => s.parse::<Repeat>().map_err(anyhow::Error::msg)?,
        None => existing.repeat,
    };
    let alarm = match alarm {
        Some(s) => s.parse::<AlarmSetting>().map_err(anyhow::Error::msg)?,
        None => existing.alarm,
    };

    // --- Overlap warning against the target date, ignoring the event
    // itself ---
    if let Some(conflict) =
        listing::first_conflict(&events, range.start, start_time, end_time, Some(id.as_str()))
    {
        println!(
            "{}",
            format!(
                "Time conflict: overlaps \"{}\" ({}-{})",
                conflict.title,
                conflict.start_time.format("%H:%M"),
                conflict.end_time.format("%H:%M")
            )
            .yellow()
        );

        if !force {
            let proceed = Confirm::new()
                .with_prompt("  Update anyway?")
                .default(false)
                .interact()?;
            if !proceed {
                println!("{}", "Cancelled".dimmed());
                return Ok(());
            }
        }
    }

    let draft = EventDraft {
        id: Some(id),
        title,
        start_time,
        end_time,
        repeat,
        alarm,
    };

    super::save_resolving_duplicates(stores, notifier, DraftInput { draft, range }, force).await
}
