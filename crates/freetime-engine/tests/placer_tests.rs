//! Tests for first-fit task placement.

use chrono::{DateTime, Duration, TimeZone, Utc};
use freetime_engine::{place_task, place_tasks, EngineError, FreePool, Interval, PoolOrder, TaskRequest};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
}

fn slot(start: (u32, u32), end: (u32, u32)) -> Interval {
    Interval::new(at(start.0, start.1), at(end.0, end.1)).unwrap()
}

fn task(name: &str, minutes: i64, deadline: (u32, u32)) -> TaskRequest {
    TaskRequest::from_minutes(name, minutes, at(deadline.0, deadline.1)).unwrap()
}

/// Free pool left by a single 09:00-10:00 meeting in an 08:00-22:00 day.
fn morning_meeting_pool() -> FreePool {
    FreePool::new(
        vec![slot((8, 0), (9, 0)), slot((10, 0), (22, 0))],
        PoolOrder::Sorted,
    )
}

// ── Task validation ─────────────────────────────────────────────────────────

#[test]
fn zero_duration_task_is_rejected() {
    let err = TaskRequest::from_minutes("Nothing", 0, at(12, 0)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidTaskRequest { ref task, .. } if task == "Nothing"));
}

#[test]
fn negative_duration_task_is_rejected() {
    assert!(TaskRequest::from_minutes("Backwards", -15, at(12, 0)).is_err());
}

#[test]
fn hand_built_invalid_task_is_rejected_at_placement() {
    let mut pool = morning_meeting_pool();
    let bad = TaskRequest {
        name: "Hand built".to_string(),
        duration: Duration::zero(),
        deadline: at(22, 0),
    };
    assert!(matches!(
        place_task(&bad, &mut pool),
        Err(EngineError::InvalidTaskRequest { .. })
    ));
    assert_eq!(pool.len(), 2);
}

// ── Single placements ───────────────────────────────────────────────────────

#[test]
fn short_task_goes_into_first_gap_before_deadline() {
    let mut pool = morning_meeting_pool();
    let placement = place_task(&task("Review", 30, (9, 30)), &mut pool).unwrap();

    assert_eq!(placement.interval, slot((8, 0), (8, 30)));
    assert_eq!(pool.slots(), &[slot((8, 30), (9, 0)), slot((10, 0), (22, 0))]);
}

#[test]
fn task_with_no_room_before_deadline_is_unplaced_and_pool_unchanged() {
    let mut pool = morning_meeting_pool();
    let before = pool.clone();

    let err = place_task(&task("Essay", 60, (8, 30)), &mut pool).unwrap_err();

    assert_eq!(
        err,
        EngineError::NoSlotAvailable {
            task: "Essay".to_string(),
            duration_minutes: 60,
            deadline: at(8, 30),
        }
    );
    assert_eq!(pool, before);
}

#[test]
fn long_task_skips_short_gap() {
    let mut pool = morning_meeting_pool();
    let placement = place_task(&task("Deep work", 90, (22, 0)), &mut pool).unwrap();
    assert_eq!(placement.interval, slot((10, 0), (11, 30)));
}

#[test]
fn gap_must_end_by_deadline_not_just_the_task() {
    // 10:00-22:00 could hold a 30 minute task ending 10:30, but the gap itself
    // ends after the 12:00 deadline, so it is not eligible.
    let mut pool = FreePool::new(vec![slot((10, 0), (22, 0))], PoolOrder::Sorted);
    assert!(place_task(&task("Call", 30, (12, 0)), &mut pool).is_err());
}

// ── Batches ─────────────────────────────────────────────────────────────────

#[test]
fn two_tasks_share_one_gap_back_to_back() {
    let mut pool = FreePool::new(vec![slot((8, 0), (22, 0))], PoolOrder::Sorted);
    let tasks = vec![task("First", 45, (22, 0)), task("Second", 45, (22, 0))];

    let outcome = place_tasks(&tasks, &mut pool);

    assert!(outcome.unplaced.is_empty());
    assert_eq!(outcome.placed[0].interval, slot((8, 0), (8, 45)));
    assert_eq!(outcome.placed[1].interval, slot((8, 45), (9, 30)));
    assert_eq!(pool.slots(), &[slot((9, 30), (22, 0))]);
}

#[test]
fn failure_does_not_stop_later_tasks() {
    let mut pool = morning_meeting_pool();
    let tasks = vec![
        task("Too early", 60, (8, 30)),
        task("Fits", 30, (22, 0)),
    ];

    let outcome = place_tasks(&tasks, &mut pool);

    assert_eq!(outcome.placed.len(), 1);
    assert_eq!(outcome.placed[0].task.name, "Fits");
    assert_eq!(outcome.unplaced.len(), 1);
    assert_eq!(outcome.unplaced[0].task.name, "Too early");
    assert!(matches!(
        outcome.unplaced[0].reason,
        EngineError::NoSlotAvailable { .. }
    ));
}

#[test]
fn tasks_are_placed_in_list_order_not_by_deadline() {
    let mut pool = FreePool::new(vec![slot((8, 0), (9, 0))], PoolOrder::Sorted);
    // The later-deadline task comes first and takes the only hour.
    let tasks = vec![task("Relaxed", 60, (22, 0)), task("Urgent", 60, (9, 0))];

    let outcome = place_tasks(&tasks, &mut pool);

    assert_eq!(outcome.placed[0].task.name, "Relaxed");
    assert_eq!(outcome.unplaced[0].task.name, "Urgent");
}

#[test]
fn residual_order_changes_the_next_choice() {
    let slots = vec![slot((8, 0), (10, 0)), slot((12, 0), (13, 0))];
    let tasks = vec![task("A", 30, (22, 0)), task("B", 30, (22, 0))];

    let mut sorted = FreePool::new(slots.clone(), PoolOrder::Sorted);
    let sorted_outcome = place_tasks(&tasks, &mut sorted);
    assert_eq!(sorted_outcome.placed[1].interval, slot((8, 30), (9, 0)));

    let mut appended = FreePool::new(slots, PoolOrder::Append);
    let appended_outcome = place_tasks(&tasks, &mut appended);
    assert_eq!(appended_outcome.placed[1].interval, slot((12, 0), (12, 30)));
}

#[test]
fn task_request_serializes_duration_as_minutes() {
    let json = serde_json::to_value(task("Write", 45, (17, 0))).unwrap();
    assert_eq!(json["duration_minutes"], 45);
    assert_eq!(json["name"], "Write");

    let back: TaskRequest = serde_json::from_value(json).unwrap();
    assert_eq!(back.duration, Duration::minutes(45));
}

#[test]
fn deserializing_a_zero_duration_task_fails() {
    let err = serde_json::from_str::<TaskRequest>(
        r#"{"name":"Nothing","duration_minutes":0,"deadline":"2026-03-16T12:00:00Z"}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("duration must be positive"));
}
