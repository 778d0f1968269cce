//! The bounded portion of a day eligible for scheduling.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::interval::Interval;

/// First schedulable hour of the day (wall clock, reference zone).
pub const DEFAULT_DAY_START_HOUR: u32 = 8;
/// Hour at which the schedulable day ends (wall clock, reference zone).
pub const DEFAULT_DAY_END_HOUR: u32 = 22;

/// Work window `[day_start, day_end)` with `day_start < day_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkWindow {
    pub day_start: DateTime<Utc>,
    pub day_end: DateTime<Utc>,
}

impl WorkWindow {
    pub fn new(day_start: DateTime<Utc>, day_end: DateTime<Utc>) -> Result<Self> {
        if day_start >= day_end {
            return Err(EngineError::InvalidWindow(format!(
                "day start {} is not before day end {}",
                day_start.to_rfc3339(),
                day_end.to_rfc3339()
            )));
        }
        Ok(Self { day_start, day_end })
    }

    /// Build the window for `date` between two wall-clock hours in `tz`.
    ///
    /// `end_hour` may be 24 (midnight at the end of `date`). A wall-clock time
    /// skipped by a DST transition resolves to the first valid instant after the
    /// gap; a repeated one resolves to its earlier occurrence.
    pub fn for_day(date: NaiveDate, start_hour: u32, end_hour: u32, tz: Tz) -> Result<Self> {
        if end_hour > 24 || start_hour >= end_hour {
            return Err(EngineError::InvalidWindow(format!(
                "hours {}..{} do not form a range within 0..=24",
                start_hour, end_hour
            )));
        }
        let day_start = resolve_local(&tz, wall_clock(date, start_hour)?)?;
        let day_end = resolve_local(&tz, wall_clock(date, end_hour)?)?;
        Self::new(day_start, day_end)
    }

    /// The default 08:00-22:00 window for `date` in `tz`.
    pub fn default_for_day(date: NaiveDate, tz: Tz) -> Result<Self> {
        Self::for_day(date, DEFAULT_DAY_START_HOUR, DEFAULT_DAY_END_HOUR, tz)
    }

    pub fn duration(&self) -> Duration {
        self.day_end - self.day_start
    }

    pub fn as_interval(&self) -> Interval {
        Interval {
            start: self.day_start,
            end: self.day_end,
        }
    }
}

fn wall_clock(date: NaiveDate, hour: u32) -> Result<NaiveDateTime> {
    let (date, hour) = if hour == 24 {
        let next = date
            .succ_opt()
            .ok_or_else(|| EngineError::InvalidWindow(format!("no day after {}", date)))?;
        (next, 0)
    } else {
        (date, hour)
    };
    date.and_hms_opt(hour, 0, 0)
        .ok_or_else(|| EngineError::InvalidWindow(format!("invalid hour {}", hour)))
}

/// Map a wall-clock time in `tz` onto the UTC timeline.
pub(crate) fn resolve_local(tz: &Tz, naive: NaiveDateTime) -> Result<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier.with_timezone(&Utc)),
        // Inside a DST gap: walk forward minute by minute to the first valid instant.
        LocalResult::None => (1..=24 * 60)
            .find_map(|m| {
                tz.from_local_datetime(&(naive + Duration::minutes(m)))
                    .earliest()
            })
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| {
                EngineError::TimezoneAmbiguity(format!("{} does not exist in {}", naive, tz))
            }),
    }
}
