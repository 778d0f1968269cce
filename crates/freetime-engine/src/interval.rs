//! Half-open time intervals on the UTC timeline.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::window::WorkWindow;

/// A half-open interval `[start, end)` with `start <= end`.
///
/// Deserialization goes through [`Interval::new`], so an inverted interval is
/// rejected on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for Interval {
    type Error = EngineError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Interval::new(raw.start, raw.end)
    }
}

impl Interval {
    /// Build an interval, rejecting one that ends before it starts.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end < start {
            return Err(EngineError::MalformedInterval {
                reason: format!("end {} is before start {}", end.to_rfc3339(), start.to_rfc3339()),
            });
        }
        Ok(Self { start, end })
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    ///
    /// Adjacent intervals (one ends exactly where the other starts) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The part of this interval inside the work window, or `None` if nothing
    /// of positive length remains.
    pub fn clip(&self, window: &WorkWindow) -> Option<Interval> {
        let start = self.start.max(window.day_start);
        let end = self.end.min(window.day_end);
        (start < end).then_some(Interval { start, end })
    }
}

/// A block of time occupied by an existing calendar event.
///
/// Busy intervals come from outside the engine and are read as-is: an inverted
/// interval is representable here so the gap finder can skip and report it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// The validated interval, or `MalformedInterval` if it ends before it starts.
    pub fn interval(&self) -> Result<Interval> {
        Interval::new(self.start, self.end).map_err(|e| match (e, &self.summary) {
            (EngineError::MalformedInterval { reason }, Some(summary)) => {
                EngineError::MalformedInterval {
                    reason: format!("'{}': {}", summary, reason),
                }
            }
            (e, _) => e,
        })
    }
}

impl From<Interval> for BusyInterval {
    fn from(interval: Interval) -> Self {
        Self::new(interval.start, interval.end)
    }
}
