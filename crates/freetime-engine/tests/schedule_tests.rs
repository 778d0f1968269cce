//! End-to-end tests for a scheduling pass.

use chrono::{DateTime, TimeZone, Utc};
use freetime_engine::{schedule, BusyInterval, Interval, PoolOrder, TaskRequest, WorkWindow};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
}

fn slot(start: (u32, u32), end: (u32, u32)) -> Interval {
    Interval::new(at(start.0, start.1), at(end.0, end.1)).unwrap()
}

fn day() -> WorkWindow {
    WorkWindow::new(at(8, 0), at(22, 0)).unwrap()
}

fn task(name: &str, minutes: i64, deadline: (u32, u32)) -> TaskRequest {
    TaskRequest::from_minutes(name, minutes, at(deadline.0, deadline.1)).unwrap()
}

#[test]
fn pass_reports_initial_slots_placements_and_remaining_pool() {
    let busy = vec![BusyInterval::new(at(9, 0), at(10, 0)).with_summary("Standup")];
    let tasks = vec![task("Review", 30, (9, 30)), task("Essay", 60, (8, 30))];

    let pass = schedule(&busy, &tasks, &day(), PoolOrder::Sorted);

    assert_eq!(pass.free_slots, vec![slot((8, 0), (9, 0)), slot((10, 0), (22, 0))]);
    assert_eq!(pass.placements.len(), 1);
    assert_eq!(pass.placements[0].interval, slot((8, 0), (8, 30)));
    assert_eq!(pass.unplaced.len(), 1);
    assert_eq!(pass.unplaced[0].task.name, "Essay");
    assert_eq!(pass.remaining, vec![slot((8, 30), (9, 0)), slot((10, 0), (22, 0))]);
    assert!(!pass.is_complete());
    assert!(pass.warnings.is_empty());
}

#[test]
fn pass_surfaces_skipped_busy_records() {
    let busy = vec![
        BusyInterval::new(at(12, 0), at(11, 0)).with_summary("Broken"),
        BusyInterval::new(at(9, 0), at(10, 0)),
    ];
    let pass = schedule(&busy, &[], &day(), PoolOrder::Sorted);

    assert_eq!(pass.warnings.len(), 1);
    assert_eq!(pass.free_slots.len(), 2);
    assert!(pass.is_complete());
}

#[test]
fn placements_never_overlap_busy_or_each_other() {
    let busy = vec![
        BusyInterval::new(at(9, 0), at(10, 0)),
        BusyInterval::new(at(13, 0), at(14, 30)),
        BusyInterval::new(at(16, 0), at(16, 15)),
    ];
    let tasks: Vec<TaskRequest> = (0..12)
        .map(|i| task(&format!("Task {}", i), 25 + 10 * i, (22, 0)))
        .collect();

    for order in [PoolOrder::Sorted, PoolOrder::Append] {
        let pass = schedule(&busy, &tasks, &day(), order);
        assert!(pass.audit(&busy).is_empty(), "overlap with {:?}", order);
        for p in &pass.placements {
            assert_eq!(p.interval.duration(), p.task.duration);
            assert!(p.interval.end <= p.task.deadline);
        }
    }
}

#[test]
fn proposed_events_mirror_placements() {
    let tasks = vec![task("Read chapter 4", 50, (18, 0))];
    let pass = schedule(&[], &tasks, &day(), PoolOrder::Sorted);

    let events = pass.proposed_events("America/Chicago");

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].summary, "Read chapter 4");
    assert_eq!(events[0].start, at(8, 0));
    assert_eq!(events[0].end, at(8, 50));
    assert_eq!(events[0].time_zone, "America/Chicago");
    assert_eq!(
        events[0].description,
        "Auto-scheduled task before 2026-03-16T18:00:00+00:00"
    );

    let json = serde_json::to_value(&events[0]).unwrap();
    assert_eq!(json["timeZone"], "America/Chicago");
}
