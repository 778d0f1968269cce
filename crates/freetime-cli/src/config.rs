//! Scheduling settings: optional TOML file, overridden by command-line flags.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::Args;
use freetime_engine::window::{DEFAULT_DAY_END_HOUR, DEFAULT_DAY_START_HOUR};
use freetime_engine::{parse_timezone, NaivePolicy, PoolOrder, WorkWindow};
use serde::Deserialize;

/// Contents of a `freetime.toml` file. Every key is optional.
///
/// ```toml
/// timezone = "America/Chicago"
/// day_start_hour = 9
/// day_end_hour = 18
/// pool_order = "append"
/// strict_offsets = false
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Reference zone for naive instants, the work window, and emitted events.
    pub timezone: String,
    pub day_start_hour: u32,
    pub day_end_hour: u32,
    pub pool_order: PoolOrder,
    /// Reject instants without an offset instead of reading them in `timezone`.
    pub strict_offsets: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            day_start_hour: DEFAULT_DAY_START_HOUR,
            day_end_hour: DEFAULT_DAY_END_HOUR,
            pool_order: PoolOrder::default(),
            strict_offsets: false,
        }
    }
}

impl Config {
    /// Load from `path`, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Flags shared by every subcommand that works on a day.
#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// Day to schedule, YYYY-MM-DD (defaults to today in the reference zone)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// First schedulable hour, 0-23
    #[arg(long)]
    pub start_hour: Option<u32>,
    /// Hour the work day ends, 1-24
    #[arg(long)]
    pub end_hour: Option<u32>,
    /// IANA reference timezone (e.g. "America/Chicago")
    #[arg(long)]
    pub tz: Option<String>,
    /// Reject instants that carry no UTC offset
    #[arg(long)]
    pub strict_offsets: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub tz: Tz,
    pub window: WorkWindow,
    pub policy: NaivePolicy,
    pub order: PoolOrder,
}

impl Settings {
    pub fn resolve(config: &Config, args: &WindowArgs) -> Result<Self> {
        let tz_name = args.tz.as_deref().unwrap_or(&config.timezone);
        let tz = parse_timezone(tz_name)?;
        let date = args
            .date
            .unwrap_or_else(|| Utc::now().with_timezone(&tz).date_naive());
        let window = WorkWindow::for_day(
            date,
            args.start_hour.unwrap_or(config.day_start_hour),
            args.end_hour.unwrap_or(config.day_end_hour),
            tz,
        )?;
        let policy = if args.strict_offsets || config.strict_offsets {
            NaivePolicy::Reject
        } else {
            NaivePolicy::AssumeZone(tz)
        };

        Ok(Self {
            tz,
            window,
            policy,
            order: config.pool_order,
        })
    }
}
