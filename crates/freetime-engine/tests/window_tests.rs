//! Tests for work window construction.

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use freetime_engine::{EngineError, WorkWindow};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn default_window_is_eight_to_ten_in_utc() {
    let window = WorkWindow::default_for_day(date(2026, 3, 16), Tz::UTC).unwrap();
    assert_eq!(window.day_start, Utc.with_ymd_and_hms(2026, 3, 16, 8, 0, 0).unwrap());
    assert_eq!(window.day_end, Utc.with_ymd_and_hms(2026, 3, 16, 22, 0, 0).unwrap());
    assert_eq!(window.duration().num_hours(), 14);
}

#[test]
fn window_in_named_zone_maps_to_utc() {
    let window = WorkWindow::default_for_day(date(2026, 3, 16), Tz::America__Chicago).unwrap();
    assert_eq!(window.day_start, Utc.with_ymd_and_hms(2026, 3, 16, 13, 0, 0).unwrap());
    assert_eq!(window.day_end, Utc.with_ymd_and_hms(2026, 3, 17, 3, 0, 0).unwrap());
}

#[test]
fn hour_24_is_end_of_day() {
    let window = WorkWindow::for_day(date(2026, 3, 16), 0, 24, Tz::UTC).unwrap();
    assert_eq!(window.day_end, Utc.with_ymd_and_hms(2026, 3, 17, 0, 0, 0).unwrap());
}

#[test]
fn start_inside_dst_gap_moves_forward() {
    // 02:00 does not exist in Chicago on 2026-03-08; the window opens at 03:00 CDT.
    let window = WorkWindow::for_day(date(2026, 3, 8), 2, 22, Tz::America__Chicago).unwrap();
    assert_eq!(window.day_start, Utc.with_ymd_and_hms(2026, 3, 8, 8, 0, 0).unwrap());
}

#[test]
fn repeated_hour_resolves_to_earlier_instant() {
    // 01:00 happens twice in Chicago on 2026-11-01; the CDT occurrence is earlier.
    let window = WorkWindow::for_day(date(2026, 11, 1), 1, 22, Tz::America__Chicago).unwrap();
    assert_eq!(window.day_start, Utc.with_ymd_and_hms(2026, 11, 1, 6, 0, 0).unwrap());
}

#[test]
fn inverted_or_empty_windows_are_rejected() {
    assert!(matches!(
        WorkWindow::for_day(date(2026, 3, 16), 22, 8, Tz::UTC),
        Err(EngineError::InvalidWindow(_))
    ));
    assert!(WorkWindow::for_day(date(2026, 3, 16), 9, 9, Tz::UTC).is_err());
    assert!(WorkWindow::for_day(date(2026, 3, 16), 8, 25, Tz::UTC).is_err());

    let t = Utc.with_ymd_and_hms(2026, 3, 16, 8, 0, 0).unwrap();
    assert!(WorkWindow::new(t, t).is_err());
}
