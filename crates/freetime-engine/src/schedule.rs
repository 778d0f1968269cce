//! One scheduling pass: gap finding followed by task placement.
//!
//! The pass owns its free pool outright; nothing it mutates outlives the call.
//! It always completes, returning a possibly partial set of placements along
//! with the tasks it could not place and any busy records it skipped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::conflict::{find_overlaps, find_self_overlaps, Overlap};
use crate::error::EngineError;
use crate::gaps::find_free_slots;
use crate::interval::{BusyInterval, Interval};
use crate::placer::{place_tasks, Placement, TaskRequest, UnplacedTask};
use crate::pool::{FreePool, PoolOrder};
use crate::window::WorkWindow;

/// Everything a scheduling pass produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulePass {
    pub window: WorkWindow,
    /// Free intervals as found before any task was placed.
    pub free_slots: Vec<Interval>,
    pub placements: Vec<Placement>,
    pub unplaced: Vec<UnplacedTask>,
    /// The free pool after the last task, in pool order.
    pub remaining: Vec<Interval>,
    /// Busy records skipped as malformed.
    pub warnings: Vec<EngineError>,
}

/// A calendar event the output sink should persist for one placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedEvent {
    pub summary: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
    pub time_zone: String,
}

/// Run one pass over a single work window.
pub fn schedule(
    busy: &[BusyInterval],
    tasks: &[TaskRequest],
    window: &WorkWindow,
    order: PoolOrder,
) -> SchedulePass {
    let scan = find_free_slots(busy, window);
    let mut pool = FreePool::new(scan.free.iter().copied(), order);
    let outcome = place_tasks(tasks, &mut pool);

    info!(
        busy = busy.len(),
        free_slots = scan.free.len(),
        placed = outcome.placed.len(),
        unplaced = outcome.unplaced.len(),
        skipped = scan.skipped.len(),
        "scheduling pass complete"
    );

    SchedulePass {
        window: *window,
        free_slots: scan.free,
        placements: outcome.placed,
        unplaced: outcome.unplaced,
        remaining: pool.into_slots(),
        warnings: scan.skipped,
    }
}

impl SchedulePass {
    /// True when every task was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    pub fn placed_intervals(&self) -> Vec<Interval> {
        self.placements.iter().map(|p| p.interval).collect()
    }

    /// Events for the calendar collaborator, one per placement, in placement order.
    pub fn proposed_events(&self, time_zone: &str) -> Vec<ProposedEvent> {
        self.placements
            .iter()
            .map(|p| ProposedEvent {
                summary: p.task.name.clone(),
                start: p.interval.start,
                end: p.interval.end,
                description: format!("Auto-scheduled task before {}", p.task.deadline.to_rfc3339()),
                time_zone: time_zone.to_string(),
            })
            .collect()
    }

    /// Overlaps between placements and busy intervals, then among placements.
    ///
    /// Empty for every pass produced by [`schedule`].
    pub fn audit(&self, busy: &[BusyInterval]) -> Vec<Overlap> {
        let busy: Vec<Interval> = busy.iter().filter_map(|b| b.interval().ok()).collect();
        let placed = self.placed_intervals();
        let mut overlaps = find_overlaps(&placed, &busy);
        overlaps.extend(find_self_overlaps(&placed));
        overlaps
    }
}
