//! `freetime` CLI — find free time in a calendar day and schedule tasks into it.
//!
//! ## Usage
//!
//! ```sh
//! # Free slots in today's 08:00-22:00 window (UTC)
//! freetime slots --events calendar.json
//!
//! # Free slots for a given day in a named zone, 09:00-18:00
//! freetime slots --events calendar.json --date 2026-03-16 --tz America/Chicago \
//!     --start-hour 9 --end-hour 18
//!
//! # Schedule a task batch and write the events to create
//! freetime schedule --events calendar.json --tasks tasks.csv -o new_events.json
//!
//! # Place one task, due by tomorrow at this time unless --deadline is given
//! freetime add --events calendar.json --name "Call the bank" --duration 20
//!
//! # Next five events
//! freetime upcoming --events calendar.json -n 5
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

mod calendar;
mod config;
mod report;
mod tasks;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use freetime_engine::{find_free_slots, parse_instant, schedule, PoolOrder};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, Settings, WindowArgs};

#[derive(Parser)]
#[command(
    name = "freetime",
    version,
    about = "Find free time in a calendar day and schedule tasks into it"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML settings file (timezone, work hours, pool order)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the free slots in the work window
    Slots {
        /// Calendar events JSON (reads from stdin if omitted)
        #[arg(short, long)]
        events: Option<String>,
        #[command(flatten)]
        window: WindowArgs,
        /// Print slots as JSON
        #[arg(long)]
        json: bool,
    },
    /// Place a batch of tasks into the free slots
    Schedule {
        /// Calendar events JSON (reads from stdin if omitted)
        #[arg(short, long)]
        events: Option<String>,
        /// Task CSV with columns Task,DurationMinutes,Deadline
        #[arg(short, long)]
        tasks: String,
        /// Write the events to create as JSON to this file
        #[arg(short, long)]
        output: Option<String>,
        /// Put leftover gap time at the end of the pool instead of in start order
        #[arg(long)]
        append_residuals: bool,
        #[command(flatten)]
        window: WindowArgs,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Place a single task into the first free slot that fits
    Add {
        /// Calendar events JSON (reads from stdin if omitted)
        #[arg(short, long)]
        events: Option<String>,
        /// Task name
        #[arg(long)]
        name: String,
        /// Duration in whole minutes
        #[arg(long)]
        duration: String,
        /// Latest instant the chosen slot may end (defaults to one day from now)
        #[arg(long)]
        deadline: Option<String>,
        /// Reference instant for the default deadline (defaults to the current time)
        #[arg(long)]
        now: Option<String>,
        /// Write the event to create as JSON to this file
        #[arg(short, long)]
        output: Option<String>,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// List the next events on the calendar
    Upcoming {
        /// Calendar events JSON (reads from stdin if omitted)
        #[arg(short, long)]
        events: Option<String>,
        /// Number of events to show
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
        /// Reference instant (defaults to the current time)
        #[arg(long)]
        now: Option<String>,
        #[command(flatten)]
        window: WindowArgs,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Slots {
            events,
            window,
            json,
        } => {
            let settings = Settings::resolve(&config, &window)?;
            let loaded = calendar::parse_events(&read_input(events.as_deref())?, &settings.policy)?;
            let scan = find_free_slots(&loaded.busy, &settings.window);

            if json {
                println!("{}", serde_json::to_string_pretty(&scan.free)?);
            } else {
                print!("{}", report::free_slots_text(&scan.free, settings.tz));
            }
        }
        Commands::Schedule {
            events,
            tasks: tasks_path,
            output,
            append_residuals,
            window,
            json,
        } => {
            let mut settings = Settings::resolve(&config, &window)?;
            if append_residuals {
                settings.order = PoolOrder::Append;
            }

            let loaded = calendar::parse_events(&read_input(events.as_deref())?, &settings.policy)?;
            let task_csv = read_input(Some(&tasks_path))?;
            let batch = tasks::parse_tasks(&task_csv, &settings.policy)
                .with_context(|| format!("Failed to load tasks from {}", tasks_path))?;

            let pass = schedule(&loaded.busy, &batch.tasks, &settings.window, settings.order);
            let overlaps = pass.audit(&loaded.busy);
            if !overlaps.is_empty() {
                error!(count = overlaps.len(), "placements overlap existing events");
            }

            let proposed = pass.proposed_events(settings.tz.name());
            if let Some(path) = output.as_deref() {
                let body = serde_json::to_string_pretty(&proposed)?;
                write_output(path, &body)?;
            }

            if json {
                let body = report::pass_json(&pass, &proposed, &batch.rejected, &loaded.skipped)?;
                println!("{}", body);
            } else {
                print!("{}", report::pass_text(&pass, &batch.rejected, settings.tz));
            }
        }
        Commands::Add {
            events,
            name,
            duration,
            deadline,
            now,
            output,
            window,
        } => {
            let settings = Settings::resolve(&config, &window)?;
            let deadline = match deadline {
                Some(text) => text,
                None => (reference_now(now.as_deref(), &settings)? + Duration::days(1)).to_rfc3339(),
            };
            let task = tasks::build_task(&name, &duration, &deadline, &settings.policy)?;
            let loaded = calendar::parse_events(&read_input(events.as_deref())?, &settings.policy)?;

            let pass = schedule(&loaded.busy, &[task], &settings.window, settings.order);
            if let Some(path) = output.as_deref() {
                let body = serde_json::to_string_pretty(&pass.proposed_events(settings.tz.name()))?;
                write_output(path, &body)?;
            }

            match pass.placements.first() {
                Some(placement) => println!(
                    "Scheduled: {} {}",
                    placement.task.name,
                    report::describe(&placement.interval, settings.tz)
                ),
                None => println!("No free slot found before {}", deadline),
            }
        }
        Commands::Upcoming {
            events,
            count,
            now,
            window,
        } => {
            let settings = Settings::resolve(&config, &window)?;
            let now = reference_now(now.as_deref(), &settings)?;
            let loaded = calendar::parse_events(&read_input(events.as_deref())?, &settings.policy)?;
            let next = calendar::upcoming(&loaded.busy, now, count);

            if next.is_empty() {
                println!("No upcoming events found.");
            }
            for event in next {
                println!(
                    "{} - {}",
                    event.start.with_timezone(&settings.tz).to_rfc3339(),
                    event.summary.as_deref().unwrap_or("(untitled)")
                );
            }
        }
    }

    Ok(())
}

/// `--now` if given, otherwise the current time.
fn reference_now(now: Option<&str>, settings: &Settings) -> Result<DateTime<Utc>> {
    Ok(match now {
        Some(text) => parse_instant(text, &settings.policy)?,
        None => Utc::now(),
    })
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: &str, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path))
}
