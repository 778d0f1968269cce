//! Output sink: renders scheduling results for a terminal or as JSON.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use freetime_engine::{EngineError, Interval, ProposedEvent, SchedulePass};
use serde::Serialize;

fn clock(instant: DateTime<Utc>, tz: Tz, with_seconds: bool) -> String {
    let format = if with_seconds { "%H:%M:%S" } else { "%H:%M" };
    instant.with_timezone(&tz).format(format).to_string()
}

fn length(interval: &Interval) -> String {
    let seconds = interval.duration().num_seconds();
    match (seconds / 60, seconds % 60) {
        (minutes, 0) => format!("{} min", minutes),
        (0, secs) => format!("{} s", secs),
        (minutes, secs) => format!("{} min {} s", minutes, secs),
    }
}

/// `HH:MM-HH:MM (N min)` in the reference zone, with seconds shown when
/// either bound is not on a whole minute.
pub fn describe(interval: &Interval, tz: Tz) -> String {
    let with_seconds = interval.start.second() != 0 || interval.end.second() != 0;
    format!(
        "{}-{} ({})",
        clock(interval.start, tz, with_seconds),
        clock(interval.end, tz, with_seconds),
        length(interval)
    )
}

pub fn free_slots_text(slots: &[Interval], tz: Tz) -> String {
    if slots.is_empty() {
        return "No free time in the work window.\n".to_string();
    }
    slots
        .iter()
        .map(|slot| format!("{}\n", describe(slot, tz)))
        .collect()
}

pub fn pass_text(pass: &SchedulePass, rejected: &[EngineError], tz: Tz) -> String {
    let mut out = String::new();
    for placement in &pass.placements {
        out.push_str(&format!(
            "Scheduled: {} {}\n",
            placement.task.name,
            describe(&placement.interval, tz)
        ));
    }
    for unplaced in &pass.unplaced {
        match &unplaced.reason {
            EngineError::NoSlotAvailable { task, .. } => out.push_str(&format!(
                "Could not schedule: {} (no slot found before deadline)\n",
                task
            )),
            other => out.push_str(&format!("Could not schedule: {}\n", other)),
        }
    }
    for err in rejected {
        out.push_str(&format!("Rejected: {}\n", err));
    }
    out.push_str(&format!(
        "{} scheduled, {} unscheduled, {} rejected\n",
        pass.placements.len(),
        pass.unplaced.len(),
        rejected.len()
    ));
    out
}

#[derive(Serialize)]
struct UnplacedDto<'a> {
    task: &'a str,
    reason: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PassDto<'a> {
    free_slots: &'a [Interval],
    proposed_events: &'a [ProposedEvent],
    unplaced: Vec<UnplacedDto<'a>>,
    rejected: Vec<String>,
    remaining: &'a [Interval],
    warnings: Vec<String>,
}

/// Machine-readable summary of a pass.
pub fn pass_json(
    pass: &SchedulePass,
    events: &[ProposedEvent],
    rejected: &[EngineError],
    skipped: &[EngineError],
) -> serde_json::Result<String> {
    let dto = PassDto {
        free_slots: &pass.free_slots,
        proposed_events: events,
        unplaced: pass
            .unplaced
            .iter()
            .map(|u| UnplacedDto {
                task: &u.task.name,
                reason: u.reason.to_string(),
            })
            .collect(),
        rejected: rejected.iter().map(ToString::to_string).collect(),
        remaining: &pass.remaining,
        warnings: skipped
            .iter()
            .chain(&pass.warnings)
            .map(ToString::to_string)
            .collect(),
    };
    serde_json::to_string_pretty(&dto)
}
