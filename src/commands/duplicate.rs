use anyhow::Result;
use chrono::Local;
use dialoguer::Confirm;
use hometask_core::date_range::DateRange;
use hometask_core::event::EventDraft;
use hometask_core::listing;
use hometask_core::notify::Notifier;
use hometask_core::reconcile::DraftInput;
use hometask_core::store::Stores;
use owo_colors::OwoColorize;

pub async fn run(stores: &Stores, notifier: &dyn Notifier, id: String, yes: bool) -> Result<()> {
    let events = stores.events().load().await;
    let source = match listing::find_by_id(&events, &id) {
        Some(event) => event,
        None => anyhow::bail!("Event not found: {}", id),
    };

    let today = Local::now().date_naive();
    let date = if source.date < today {
        // The copy can't land on a past date; offer today instead.
        let retarget = yes
            || Confirm::new()
                .with_prompt("  This is a past event. Duplicate it to today?")
                .default(true)
                .interact()?;
        if !retarget {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
        today
    } else {
        source.date
    };

    let draft = EventDraft {
        id: None,
        title: format!("Copy of {}", source.title),
        start_time: source.start_time,
        end_time: source.end_time,
        repeat: source.repeat,
        alarm: source.alarm,
    };

    super::save_resolving_duplicates(
        stores,
        notifier,
        DraftInput {
            draft,
            range: DateRange::single(date),
        },
        false,
    )
    .await
}
