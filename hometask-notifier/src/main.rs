//! Desktop notification backend for hometask.
//!
//! Invoked without a subcommand it speaks the hometask notifier protocol
//! on stdin/stdout, queuing registrations in `notifications.json`.
//! `hometask-notifier run` watches the queue and shows due notifications
//! on the desktop.

mod queue;

use std::path::Path;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use hometask_core::config::GlobalConfig;
use hometask_core::notify::{Command, NotificationRequest, Request, Response};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "hometask-notifier")]
#[command(about = "Desktop notification backend for hometask alarms")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the queue and show due notifications
    Run {
        /// Seconds between queue checks
        #[arg(long, default_value_t = 30)]
        interval: u64,
    },
    /// List queued notifications
    Pending,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = GlobalConfig::load()?;
    let queue_path = config.data_dir()?.join("notifications.json");

    match cli.command {
        None => serve(&queue_path),
        Some(Commands::Run { interval }) => run(&queue_path, interval),
        Some(Commands::Pending) => pending(&queue_path),
    }
}

/// Answer one protocol request from stdin on stdout.
fn serve(queue_path: &Path) -> Result<()> {
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    let response = match serde_json::from_str::<Request>(&line) {
        Ok(request) => handle(queue_path, request),
        Err(e) => Response::Error {
            error: format!("Malformed request: {}", e),
        },
    };

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

fn handle(queue_path: &Path, request: Request) -> Response<serde_json::Value> {
    let result = match request.command {
        Command::Schedule => schedule(queue_path, request.params),
        Command::Cancel => cancel(queue_path, request.params),
    };

    match result {
        Ok(data) => Response::Success { data },
        Err(e) => Response::Error {
            error: e.to_string(),
        },
    }
}

fn schedule(queue_path: &Path, params: serde_json::Value) -> Result<serde_json::Value> {
    let request: NotificationRequest = serde_json::from_value(params)?;

    let mut queue = queue::load(queue_path);
    let handle = queue::enqueue(&mut queue, &request, Local::now().naive_local());
    queue::save(queue_path, &queue)?;

    Ok(serde_json::Value::String(handle))
}

fn cancel(queue_path: &Path, params: serde_json::Value) -> Result<serde_json::Value> {
    #[derive(Deserialize)]
    struct CancelParams {
        handle: String,
    }
    let params: CancelParams = serde_json::from_value(params)?;

    let mut queue = queue::load(queue_path);
    // A handle that already fired or never existed is not an error.
    if queue.remove(&params.handle).is_some() {
        queue::save(queue_path, &queue)?;
    }

    Ok(serde_json::Value::Null)
}

/// Poll the queue, showing and removing entries as they come due.
fn run(queue_path: &Path, interval: u64) -> Result<()> {
    println!(
        "Watching {} (every {}s)",
        queue_path.display(),
        interval
    );

    loop {
        let mut queue = queue::load(queue_path);
        let due = queue::take_due(&mut queue, Local::now().naive_local());
        if !due.is_empty() {
            queue::save(queue_path, &queue)?;
        }

        for entry in &due {
            show(entry);
        }

        std::thread::sleep(std::time::Duration::from_secs(interval));
    }
}

fn show(entry: &queue::PendingNotification) {
    let result = notify_rust::Notification::new()
        .summary(&entry.title)
        .body(&entry.body)
        .show();

    if let Err(e) = result {
        eprintln!("Failed to show notification for {}: {}", entry.event_id, e);
    }
}

fn pending(queue_path: &Path) -> Result<()> {
    let queue = queue::load(queue_path);
    if queue.is_empty() {
        println!("No notifications queued");
        return Ok(());
    }

    for (handle, entry) in &queue {
        println!(
            "{}  {}  ({})",
            entry.fire_at.format("%Y-%m-%d %H:%M"),
            entry.title,
            handle
        );
    }

    Ok(())
}
