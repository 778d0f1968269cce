//! Calendar collaborator: reads existing events from a JSON export.
//!
//! Accepts either a bare array of events or the `{ "items": [...] }` shape
//! returned by the Google Calendar events list. Each event needs `start` and
//! `end` objects carrying `dateTime` (timed events) or `date` (all-day events).

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use freetime_engine::normalize::parse_busy;
use freetime_engine::{BusyInterval, EngineError, NaivePolicy};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

#[derive(Deserialize)]
#[serde(untagged)]
enum EventFile {
    Bare(Vec<Value>),
    Listing { items: Vec<Value> },
}

#[derive(Deserialize)]
struct EventTime {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
    date: Option<String>,
}

impl EventTime {
    fn text(&self) -> Option<&str> {
        self.date_time.as_deref().or(self.date.as_deref())
    }
}

#[derive(Deserialize)]
struct CalendarItem {
    summary: Option<String>,
    start: EventTime,
    end: EventTime,
}

/// Busy intervals read from a calendar export, plus the records that were skipped.
#[derive(Debug, Default)]
pub struct LoadedEvents {
    pub busy: Vec<BusyInterval>,
    pub skipped: Vec<EngineError>,
}

/// Parse a calendar export. Only a file that is not JSON at all is fatal;
/// individual unreadable events are skipped with a warning.
pub fn parse_events(json: &str, policy: &NaivePolicy) -> Result<LoadedEvents> {
    let file: EventFile =
        serde_json::from_str(json).context("Calendar file is not an event list")?;
    let items = match file {
        EventFile::Bare(items) => items,
        EventFile::Listing { items } => items,
    };

    let mut loaded = LoadedEvents::default();
    for (index, item) in items.into_iter().enumerate() {
        match to_busy(item, policy) {
            Ok(busy) => loaded.busy.push(busy),
            Err(err) => {
                warn!(index, error = %err, "skipping calendar event");
                loaded.skipped.push(err);
            }
        }
    }
    Ok(loaded)
}

fn to_busy(item: Value, policy: &NaivePolicy) -> freetime_engine::error::Result<BusyInterval> {
    let item: CalendarItem =
        serde_json::from_value(item).map_err(|e| EngineError::MalformedInterval {
            reason: e.to_string(),
        })?;
    let summary = item.summary.as_deref();
    let missing = |which: &str| EngineError::MalformedInterval {
        reason: format!("'{}' has no {} time", summary.unwrap_or("(untitled)"), which),
    };
    let start = item.start.text().ok_or_else(|| missing("start"))?;
    let end = item.end.text().ok_or_else(|| missing("end"))?;
    parse_busy(start, end, summary, policy)
}

/// The next `limit` events that have not ended by `now`, earliest start first.
///
/// An event already in progress at `now` is included.
pub fn upcoming(busy: &[BusyInterval], now: DateTime<Utc>, limit: usize) -> Vec<&BusyInterval> {
    let mut next: Vec<&BusyInterval> = busy.iter().filter(|b| b.end > now).collect();
    next.sort_by_key(|b| (b.start, b.end));
    next.truncate(limit);
    next
}
