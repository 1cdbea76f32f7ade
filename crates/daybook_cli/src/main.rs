//! Daybook terminal entry point.
//!
//! # Responsibility
//! - Act as the view layer: render month grids and day listings.
//! - Translate user commands into `EventStore` calls and typed outcomes
//!   into user-facing messages.

mod render;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use daybook_core::db::open_db;
use daybook_core::{
    anchor_wall_clock, default_log_level, init_logging, parse_date_key, CalendarMonth,
    EventDraft, EventStore, EventStoreError, LogLevel, SqliteEventPersistence,
};
use log::{info, warn};
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;

const APP_DIR_NAME: &str = "daybook";
const DB_FILE_NAME: &str = "daybook.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Parser)]
#[command(name = "daybook", version, about = "Month calendar with per-day events")]
struct Cli {
    /// SQLite database file holding saved events.
    #[arg(long, global = true, env = "DAYBOOK_DB")]
    db: Option<PathBuf>,

    /// Directory for rolling log files.
    #[arg(long, global = true, env = "DAYBOOK_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "DAYBOOK_LOG_LEVEL")]
    log_level: Option<LogLevel>,

    /// Replace saved events that cannot be read instead of refusing changes.
    #[arg(long, global = true)]
    discard_unreadable: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show a month grid with event counts (defaults to the current month).
    Month {
        /// Month as YYYY-MM.
        month: Option<CalendarMonth>,
    },
    /// List the events of one day.
    List {
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,
    },
    /// Create an event.
    Add {
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,
        title: String,
        /// Start time as HH:MM.
        start: String,
        /// End time as HH:MM.
        end: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit an event in place.
    Edit {
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
    },
    /// Delete an event; deleting an unknown id is not an error.
    Delete {
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,
        id: Uuid,
    },
}

impl Command {
    fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Add { .. } | Self::Edit { .. } | Self::Delete { .. }
        )
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let db_path = match cli.db {
        Some(path) => path,
        None => app_dir()?.join(DB_FILE_NAME),
    };
    let log_dir = match cli.log_dir {
        Some(path) => path,
        None => app_dir()?.join(LOG_DIR_NAME),
    };
    start_logging(cli.log_level.unwrap_or_else(default_log_level), &log_dir);

    if let Some(parent) = db_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create `{}`", parent.display()))?;
    }
    let conn = open_db(&db_path)
        .with_context(|| format!("cannot open event database `{}`", db_path.display()))?;
    let mut store = EventStore::open(SqliteEventPersistence::new(&conn));

    let command = cli.command.unwrap_or(Command::Month { month: None });
    if let Some(warning) = store.load_warning() {
        warn!("event=events_load module=cli status=fallback");
        eprintln!("warning: saved events could not be read ({warning}); showing an empty calendar");
        if command.is_mutation() {
            if !cli.discard_unreadable {
                bail!(
                    "nothing was changed; repair `{}` or rerun with --discard-unreadable \
                     to replace the unreadable events",
                    db_path.display()
                );
            }
            store
                .discard_unreadable()
                .context("cannot replace the unreadable events")?;
            warn!("event=events_discard module=cli status=ok");
        }
    }

    let today = Local::now().date_naive();
    match command {
        Command::Month { month } => {
            let month = month.unwrap_or_else(|| CalendarMonth::from_date(today));
            let cells = month.grid(today);
            let counts = store.count_events_in(&cells);
            print!("{}", render::render_month(&month, &cells, &counts));
        }
        Command::List { date } => {
            print!("{}", render::render_day(date, store.list_events(date)));
        }
        Command::Add {
            date,
            title,
            start,
            end,
            description,
        } => {
            let mut draft = EventDraft::at_wall_clock(date, title, &start, &end)
                .map_err(|err| user_error(EventStoreError::Validation(err)))?;
            if let Some(description) = description {
                draft = draft.with_description(description);
            }
            let event = store.create_event(date, draft).map_err(user_error)?;
            info!("event=event_create module=cli status=ok");
            println!("Created {} ({})", event.title, event.id);
        }
        Command::Edit {
            date,
            id,
            title,
            start,
            end,
            description,
            clear_description,
        } => {
            let mut updated = store
                .get_event(date, id)
                .cloned()
                .ok_or_else(|| user_error(EventStoreError::NotFound { date, id }))?;
            if let Some(title) = title {
                updated.title = title;
            }
            if let Some(start) = start {
                updated.start_time = anchor_wall_clock(date, &start)
                    .map_err(|err| user_error(EventStoreError::Validation(err)))?;
            }
            if let Some(end) = end {
                updated.end_time = anchor_wall_clock(date, &end)
                    .map_err(|err| user_error(EventStoreError::Validation(err)))?;
            }
            if clear_description {
                updated.description = None;
            } else if let Some(description) = description {
                updated.description = Some(description).filter(|text| !text.trim().is_empty());
            }
            let event = store.edit_event(date, updated).map_err(user_error)?;
            info!("event=event_edit module=cli status=ok");
            println!("Updated {} ({})", event.title, event.id);
        }
        Command::Delete { date, id } => {
            store.delete_event(date, id).map_err(user_error)?;
            info!("event=event_delete module=cli status=ok");
            println!("Deleted {id} (if it existed)");
        }
    }
    Ok(())
}

fn app_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .context("cannot determine a data directory; pass --db and --log-dir")
}

fn start_logging(level: LogLevel, log_dir: &std::path::Path) {
    let Some(log_dir) = log_dir.to_str() else {
        eprintln!("warning: log directory is not valid UTF-8; logging disabled");
        return;
    };
    if let Err(err) = init_logging(level.as_str(), log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date_key(value).ok_or_else(|| format!("invalid date `{value}`; expected YYYY-MM-DD"))
}

/// Maps a typed store outcome to the message shown to the user.
fn user_error(err: EventStoreError) -> anyhow::Error {
    match err {
        EventStoreError::Validation(err) => anyhow!("please fix the input: {err}"),
        EventStoreError::Conflict { existing, .. } => anyhow!(
            "that time overlaps `{}` ({}-{}); pick another slot",
            existing.title,
            existing.start_time.format("%H:%M"),
            existing.end_time.format("%H:%M")
        ),
        EventStoreError::NotFound { date, id } => anyhow!(
            "event {id} no longer exists on {date}; run `daybook list {date}` to refresh"
        ),
        EventStoreError::Persistence { source, .. } => {
            warn!("event=events_save module=cli status=error");
            anyhow!("the change could not be saved and will not survive a restart: {source}")
        }
    }
}
