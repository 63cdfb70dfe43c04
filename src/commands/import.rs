use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use hometask_core::date_range::DateRange;
use hometask_core::event::EventDraft;
use hometask_core::notify::Notifier;
use hometask_core::reconcile::{DraftInput, DuplicatePolicy, Reconciler, SaveOutcome};
use hometask_core::store::Stores;
use owo_colors::OwoColorize;
use serde::Deserialize;

use crate::render;

/// One entry of the drafts file: the draft fields plus the date range it
/// should cover.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportDraft {
    start_date: String,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(flatten)]
    draft: EventDraft,
}

/// Create events in bulk from a JSON array of drafts. The whole file is
/// applied as one reconciler batch: one store write, duplicates reported
/// per draft.
pub async fn run(
    stores: &Stores,
    notifier: &dyn Notifier,
    file: PathBuf,
    force: bool,
) -> Result<()> {
    let content = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let drafts: Vec<ImportDraft> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    if drafts.is_empty() {
        println!("{}", "Nothing to import".dimmed());
        return Ok(());
    }

    let today = Local::now().date_naive();
    let mut inputs = Vec::with_capacity(drafts.len());
    for entry in drafts {
        if entry.draft.title.trim().is_empty() {
            anyhow::bail!("Draft without a title in {}", file.display());
        }
        if entry.draft.end_time <= entry.draft.start_time {
            anyhow::bail!(
                "End time must be after start time for \"{}\"",
                entry.draft.title
            );
        }

        let range = DateRange::from_args(&entry.start_date, entry.end_date.as_deref())?;
        if range.start < today {
            anyhow::bail!(
                "Cannot create events on past dates (\"{}\" on {})",
                entry.draft.title,
                range.start
            );
        }

        inputs.push(DraftInput {
            draft: entry.draft,
            range,
        });
    }

    let reconciler = Reconciler::new(stores, notifier);
    let policy = if force {
        DuplicatePolicy::Overwrite
    } else {
        DuplicatePolicy::Report
    };
    let outcomes = reconciler.save_batch(inputs, policy).await?;

    let mut saved = 0;
    let mut skipped = 0;
    for outcome in outcomes {
        match outcome {
            SaveOutcome::Saved(record) => {
                saved += 1;
                println!("  {} {}", "+".green(), record.title);
            }
            SaveOutcome::Duplicate { title, date, .. } => {
                skipped += 1;
                println!(
                    "  {} \"{}\" already exists on {}",
                    "!".yellow(),
                    title,
                    render::friendly_date(date)
                );
            }
        }
    }

    let summary = format!("Imported {} events, skipped {}", saved, skipped);
    if skipped > 0 {
        println!("{}", summary.yellow());
    } else {
        println!("{}", summary.green());
    }

    Ok(())
}
