mod commands;
mod render;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use dayplan_core::Planner;
use dayplan_core::clock::{Clock, SystemClock};
use dayplan_core::config::PlanConfig;
use dayplan_core::store::JsonFileStore;
use tracing_subscriber::{EnvFilter, fmt};

use crate::render::TerminalNotifier;

pub type CliPlanner = Planner<JsonFileStore, TerminalNotifier>;

#[derive(Parser)]
#[command(name = "dayplan")]
#[command(about = "Plan your events, spot time conflicts and get reminded before they start")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new event
    Add {
        title: String,

        /// Where it happens
        #[arg(short, long)]
        location: String,

        /// Day of the event (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Start time (HH:MM, defaults to now)
        #[arg(short, long)]
        time: Option<String>,

        /// Length in minutes
        #[arg(long, default_value_t = dayplan_core::form::DEFAULT_DURATION)]
        duration: i64,

        #[arg(long)]
        description: Option<String>,
    },
    /// List events for a day
    List {
        /// Day to show (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show everything from tomorrow onward, grouped by day
    Upcoming,
    /// Show the next event that is not done yet
    Next,
    /// Show every pair of overlapping events
    Conflicts,
    /// Change fields of an event
    Edit {
        /// Event id (a unique prefix is enough)
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,

        #[arg(long)]
        clear_description: bool,

        /// New day (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// New start time (HH:MM)
        #[arg(short, long)]
        time: Option<String>,

        /// New length in minutes
        #[arg(long)]
        duration: Option<i64>,
    },
    /// Mark an event as done
    Done { id: String },
    /// Mark an event as not done
    Undone { id: String },
    /// Remove an event
    Remove { id: String },
    /// Move an event to tomorrow, keeping its time of day
    Tomorrow { id: String },
    /// Remove unfinished events from previous days
    Cleanup,
    /// Show totals and the next event
    Stats,
    /// Show a month grid with event counts per day
    Month {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Stay running: remind about upcoming events and clean up at midnight
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = PlanConfig::load()?;
    let now = SystemClock.now();
    let mut planner = open_planner(&config, now);

    match cli.command {
        Commands::Add {
            title,
            location,
            date,
            time,
            duration,
            description,
        } => {
            let date = parse_date_or(date.as_deref(), now.date())?;
            let time = time.unwrap_or_else(|| now.format("%H:%M").to_string());
            commands::add::run(&mut planner, title, location, date, time, duration, description)
        }
        Commands::List { date } => {
            let date = parse_date_or(date.as_deref(), now.date())?;
            commands::list::run(&planner, date, now)
        }
        Commands::Upcoming => commands::upcoming::run(&planner, now),
        Commands::Next => commands::upcoming::next(&planner, now),
        Commands::Conflicts => commands::conflicts::run(&planner),
        Commands::Edit {
            id,
            title,
            location,
            description,
            clear_description,
            date,
            time,
            duration,
        } => {
            let description = if clear_description {
                Some(None)
            } else {
                description.map(Some)
            };
            let date = date.as_deref().map(parse_date).transpose()?;
            let edit = commands::edit::Edit {
                title,
                location,
                description,
                date,
                time,
                duration,
            };
            commands::edit::run(&mut planner, &id, edit)
        }
        Commands::Done { id } => commands::lifecycle::set_completed(&mut planner, &id, true),
        Commands::Undone { id } => commands::lifecycle::set_completed(&mut planner, &id, false),
        Commands::Remove { id } => commands::lifecycle::remove(&mut planner, &id),
        Commands::Tomorrow { id } => commands::lifecycle::tomorrow(&mut planner, &id, now),
        Commands::Cleanup => commands::lifecycle::cleanup(&mut planner, now),
        Commands::Stats => commands::stats::run(&planner, now),
        Commands::Month { month } => {
            let first = match month {
                Some(m) => parse_month(&m)?,
                None => now.date().with_day(1).unwrap_or(now.date()),
            };
            commands::month::run(&planner, first, now.date())
        }
        Commands::Watch => commands::watch::run(planner, &config).await,
    }
}

fn open_planner(config: &PlanConfig, now: NaiveDateTime) -> CliPlanner {
    let store = JsonFileStore::new(config.data_path());
    Planner::open(store, TerminalNotifier, now).with_reminder_lead(config.reminder_lead())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
}

fn parse_date_or(s: Option<&str>, default: NaiveDate) -> Result<NaiveDate> {
    s.map(parse_date).unwrap_or(Ok(default))
}

/// Parse YYYY-MM into the first day of that month
fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .with_context(|| format!("Invalid month format '{}'. Expected YYYY-MM", s))
}
