//! Overlap audit between interval lists.
//!
//! Adjacent intervals (one ends exactly when the other starts) are NOT overlaps.

use crate::interval::Interval;

/// A detected overlap between two intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    pub a: Interval,
    pub b: Interval,
    pub overlap_minutes: i64,
}

fn overlap_between(a: &Interval, b: &Interval) -> Option<Overlap> {
    if !a.overlaps(b) {
        return None;
    }
    let start = a.start.max(b.start);
    let end = a.end.min(b.end);
    Some(Overlap {
        a: *a,
        b: *b,
        overlap_minutes: (end - start).num_minutes(),
    })
}

/// Find all pairwise overlaps between two interval lists.
pub fn find_overlaps(list_a: &[Interval], list_b: &[Interval]) -> Vec<Overlap> {
    list_a
        .iter()
        .flat_map(|a| list_b.iter().filter_map(move |b| overlap_between(a, b)))
        .collect()
}

/// Find all overlapping pairs within a single list (each pair reported once).
pub fn find_self_overlaps(intervals: &[Interval]) -> Vec<Overlap> {
    let mut overlaps = Vec::new();
    for (i, a) in intervals.iter().enumerate() {
        for b in &intervals[i + 1..] {
            if let Some(overlap) = overlap_between(a, b) {
                overlaps.push(overlap);
            }
        }
    }
    overlaps
}
