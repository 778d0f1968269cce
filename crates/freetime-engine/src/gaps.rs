//! Gap finder: the free intervals left in a work window by a day's busy intervals.
//!
//! Busy intervals are sorted by start before the sweep, so callers need not
//! rely on the calendar provider returning them in order. Each one is clipped
//! to the window; overlapping blocks merge naturally because the cursor only
//! ever moves forward.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::EngineError;
use crate::interval::{BusyInterval, Interval};
use crate::window::WorkWindow;

/// Result of one gap scan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GapScan {
    /// Free intervals, ordered by start and pairwise disjoint.
    pub free: Vec<Interval>,
    /// Busy records that were skipped as malformed.
    #[serde(skip)]
    pub skipped: Vec<EngineError>,
}

/// Validate and sort busy intervals, reporting (not aborting on) malformed ones.
fn sorted_busy(busy: &[BusyInterval], skipped: &mut Vec<EngineError>) -> Vec<Interval> {
    let mut intervals: Vec<Interval> = Vec::with_capacity(busy.len());
    for record in busy {
        match record.interval() {
            Ok(interval) => intervals.push(interval),
            Err(err) => {
                warn!(error = %err, "skipping busy interval");
                skipped.push(err);
            }
        }
    }
    // (start, end) ordering, so equal starts are stable across runs.
    intervals.sort();
    intervals
}

/// Find the free intervals of `window` not covered by any busy interval.
///
/// Zero-length busy intervals are no-ops. Inverted ones (`end < start`) are
/// skipped and reported in [`GapScan::skipped`]. The returned free list plus
/// the clipped busy blocks exactly cover `[day_start, day_end)`.
pub fn find_free_slots(busy: &[BusyInterval], window: &WorkWindow) -> GapScan {
    let mut skipped = Vec::new();
    let intervals = sorted_busy(busy, &mut skipped);

    let mut free = Vec::new();
    let mut cursor = window.day_start;

    for interval in intervals {
        let Some(block) = interval.clip(window) else {
            continue;
        };
        if block.start > cursor {
            free.push(Interval {
                start: cursor,
                end: block.start,
            });
        }
        cursor = cursor.max(block.end);
        if cursor >= window.day_end {
            break;
        }
    }

    // Trailing free slot after the last busy block.
    if cursor < window.day_end {
        free.push(Interval {
            start: cursor,
            end: window.day_end,
        });
    }

    GapScan { free, skipped }
}

/// The busy intervals clipped to `window` and merged into disjoint blocks.
///
/// Adjacent blocks are merged. Malformed records are ignored; use
/// [`find_free_slots`] to have them reported.
pub fn busy_within(busy: &[BusyInterval], window: &WorkWindow) -> Vec<Interval> {
    let mut ignored = Vec::new();
    let mut merged: Vec<Interval> = Vec::new();

    for block in sorted_busy(busy, &mut ignored)
        .iter()
        .filter_map(|interval| interval.clip(window))
    {
        if let Some(last) = merged.last_mut() {
            if block.start <= last.end {
                last.end = last.end.max(block.end);
                continue;
            }
        }
        merged.push(block);
    }

    merged
}
