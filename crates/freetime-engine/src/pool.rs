//! The free pool: the mutable set of gaps a single scheduling pass carves tasks from.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// Where the residual of a partially consumed gap goes back into the pool.
///
/// The choice changes which gap later first-fit scans see first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolOrder {
    /// Keep the pool ordered by start instant after every mutation.
    #[default]
    Sorted,
    /// Append residuals at the end of the pool (legacy behavior).
    Append,
}

/// Free intervals owned by one scheduling pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FreePool {
    slots: Vec<Interval>,
    order: PoolOrder,
}

impl FreePool {
    /// Create a pool from free intervals. Zero-length intervals are dropped.
    ///
    /// With [`PoolOrder::Sorted`] the slots are sorted by start; with
    /// [`PoolOrder::Append`] the given order is kept.
    pub fn new(slots: impl IntoIterator<Item = Interval>, order: PoolOrder) -> Self {
        let mut slots: Vec<Interval> = slots.into_iter().filter(|s| !s.is_empty()).collect();
        if order == PoolOrder::Sorted {
            slots.sort();
        }
        Self { slots, order }
    }

    pub fn order(&self) -> PoolOrder {
        self.order
    }

    pub fn slots(&self) -> &[Interval] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Sum of the durations of all free intervals.
    pub fn total_free(&self) -> Duration {
        self.slots
            .iter()
            .fold(Duration::zero(), |acc, slot| acc + slot.duration())
    }

    pub fn into_slots(self) -> Vec<Interval> {
        self.slots
    }

    /// Index of the first gap, in current pool order, at least `duration` long
    /// that ends no later than `deadline`.
    pub fn first_fit(&self, duration: Duration, deadline: DateTime<Utc>) -> Option<usize> {
        self.slots
            .iter()
            .position(|gap| gap.duration() >= duration && gap.end <= deadline)
    }

    /// Consume `duration` from the start of the gap at `index`.
    ///
    /// The gap is removed and any residual `[start + duration, end)` is put
    /// back according to the pool order. Returns the consumed interval, or
    /// `None` (leaving the pool untouched) if the index is out of range or the
    /// gap is too short.
    pub fn carve(&mut self, index: usize, duration: Duration) -> Option<Interval> {
        let gap = *self.slots.get(index)?;
        if duration <= Duration::zero() || gap.duration() < duration {
            return None;
        }

        self.slots.remove(index);
        let taken = Interval {
            start: gap.start,
            end: gap.start + duration,
        };

        if gap.end > taken.end {
            let residual = Interval {
                start: taken.end,
                end: gap.end,
            };
            match self.order {
                PoolOrder::Sorted => {
                    let at = self.slots.partition_point(|s| s.start < residual.start);
                    self.slots.insert(at, residual);
                }
                PoolOrder::Append => self.slots.push(residual),
            }
        }

        Some(taken)
    }
}
