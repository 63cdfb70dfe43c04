mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hometask_core::config::GlobalConfig;
use hometask_core::notify;
use hometask_core::store::Stores;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hometask")]
#[command(about = "Manage your hometask calendar events and local alarm notifications")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an event, optionally spanning several days
    New {
        title: String,

        /// Date (YYYY-MM-DD); a multi-day event starts here
        #[arg(long)]
        date: String,

        /// Last date (YYYY-MM-DD) of a multi-day event
        #[arg(long)]
        end_date: Option<String>,

        /// Start time (HH:MM)
        #[arg(long)]
        start: String,

        /// End time (HH:MM)
        #[arg(long)]
        end: String,

        /// none, weekly, biweekly or monthly
        #[arg(long)]
        repeat: Option<String>,

        /// none, at_time, 5min, 15min, 30min, 1hour or 1day
        #[arg(long)]
        alarm: Option<String>,

        /// Overwrite a same-title event on the same date without asking
        #[arg(long)]
        force: bool,
    },
    /// Create events in bulk from a JSON drafts file
    Import {
        file: std::path::PathBuf,

        /// Overwrite same-title events instead of skipping them
        #[arg(long)]
        force: bool,
    },
    /// List upcoming events
    List {
        /// Also show past events
        #[arg(long)]
        past: bool,
    },
    /// Show one event in full
    Show { id: String },
    /// Update an event; omitted options keep their current values
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// New last date (YYYY-MM-DD) of a multi-day event
        #[arg(long)]
        end_date: Option<String>,

        /// New start time (HH:MM)
        #[arg(long)]
        start: Option<String>,

        /// New end time (HH:MM)
        #[arg(long)]
        end: Option<String>,

        /// none, weekly, biweekly or monthly
        #[arg(long)]
        repeat: Option<String>,

        /// none, at_time, 5min, 15min, 30min, 1hour or 1day
        #[arg(long)]
        alarm: Option<String>,

        /// Overwrite a same-title event on the same date without asking
        #[arg(long)]
        force: bool,
    },
    /// Delete an event and cancel its alarm
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Copy an event under a new id
    Duplicate {
        id: String,

        /// Retarget a past event to today without asking
        #[arg(long)]
        yes: bool,
    },
    /// List scheduled alarms
    Alarms,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = GlobalConfig::load()?;
    let stores = Stores::open(&config.data_dir()?);
    let notifier = notify::from_config(config.notifier.as_deref());

    match cli.command {
        Commands::New {
            title,
            date,
            end_date,
            start,
            end,
            repeat,
            alarm,
            force,
        } => {
            commands::new::run(
                &stores,
                notifier.as_ref(),
                title,
                date,
                end_date,
                start,
                end,
                repeat,
                alarm,
                force,
            )
            .await
        }
        Commands::Import { file, force } => {
            commands::import::run(&stores, notifier.as_ref(), file, force).await
        }
        Commands::List { past } => commands::list::run(&stores, past).await,
        Commands::Show { id } => commands::show::run(&stores, id).await,
        Commands::Edit {
            id,
            title,
            date,
            end_date,
            start,
            end,
            repeat,
            alarm,
            force,
        } => {
            commands::edit::run(
                &stores,
                notifier.as_ref(),
                id,
                title,
                date,
                end_date,
                start,
                end,
                repeat,
                alarm,
                force,
            )
            .await
        }
        Commands::Delete { id, yes } => {
            commands::delete::run(&stores, notifier.as_ref(), id, yes).await
        }
        Commands::Duplicate { id, yes } => {
            commands::duplicate::run(&stores, notifier.as_ref(), id, yes).await
        }
        Commands::Alarms => commands::alarms::run(&stores).await,
    }
}
