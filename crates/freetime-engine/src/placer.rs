//! Task placer: first-fit assignment of tasks into the free pool.
//!
//! Tasks are processed strictly in list order. Each one takes the start of the
//! first gap (in current pool order) that is long enough and ends by the
//! task's deadline. A task that fits nowhere is reported and the pass moves on.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::interval::Interval;
use crate::pool::FreePool;

/// A unit of work to be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTaskRequest")]
pub struct TaskRequest {
    pub name: String,
    /// Must be positive.
    #[serde(rename = "duration_minutes", with = "minutes")]
    pub duration: Duration,
    /// Absolute instant; the chosen gap must end at or before it.
    pub deadline: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawTaskRequest {
    name: String,
    #[serde(rename = "duration_minutes", with = "minutes")]
    duration: Duration,
    deadline: DateTime<Utc>,
}

impl TryFrom<RawTaskRequest> for TaskRequest {
    type Error = EngineError;

    fn try_from(raw: RawTaskRequest) -> Result<Self> {
        TaskRequest::new(raw.name, raw.duration, raw.deadline)
    }
}

impl TaskRequest {
    pub fn new(name: impl Into<String>, duration: Duration, deadline: DateTime<Utc>) -> Result<Self> {
        let task = Self {
            name: name.into(),
            duration,
            deadline,
        };
        task.validate()?;
        Ok(task)
    }

    pub fn from_minutes(name: impl Into<String>, minutes: i64, deadline: DateTime<Utc>) -> Result<Self> {
        Self::new(name, Duration::minutes(minutes), deadline)
    }

    /// Reject a task whose duration is not positive.
    pub fn validate(&self) -> Result<()> {
        if self.duration <= Duration::zero() {
            return Err(EngineError::InvalidTaskRequest {
                task: self.name.clone(),
                reason: format!("duration must be positive, got {} min", self.duration.num_minutes()),
            });
        }
        Ok(())
    }

    fn no_slot(&self) -> EngineError {
        EngineError::NoSlotAvailable {
            task: self.name.clone(),
            duration_minutes: self.duration.num_minutes(),
            deadline: self.deadline,
        }
    }
}

/// A task and the interval it was given.
///
/// `interval.duration() == task.duration` and `interval.end <= task.deadline`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub task: TaskRequest,
    pub interval: Interval,
}

/// A task the pass could not place, with the reason (normally `NoSlotAvailable`).
#[derive(Debug, Clone, PartialEq)]
pub struct UnplacedTask {
    pub task: TaskRequest,
    pub reason: EngineError,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlacementOutcome {
    pub placed: Vec<Placement>,
    pub unplaced: Vec<UnplacedTask>,
}

/// Place one task into the pool.
///
/// On success the consumed gap is removed and its residual returned to the
/// pool. On failure the pool is left unchanged.
pub fn place_task(task: &TaskRequest, pool: &mut FreePool) -> Result<Placement> {
    task.validate()?;

    let interval = pool
        .first_fit(task.duration, task.deadline)
        .and_then(|index| pool.carve(index, task.duration))
        .ok_or_else(|| task.no_slot())?;

    debug!(
        task = %task.name,
        start = %interval.start.to_rfc3339(),
        end = %interval.end.to_rfc3339(),
        "placed task"
    );

    Ok(Placement {
        task: task.clone(),
        interval,
    })
}

/// Place every task in list order. Never stops early on a failed task.
pub fn place_tasks(tasks: &[TaskRequest], pool: &mut FreePool) -> PlacementOutcome {
    let mut outcome = PlacementOutcome::default();
    for task in tasks {
        match place_task(task, pool) {
            Ok(placement) => outcome.placed.push(placement),
            Err(reason) => {
                debug!(task = %task.name, %reason, "task not placed");
                outcome.unplaced.push(UnplacedTask {
                    task: task.clone(),
                    reason,
                });
            }
        }
    }
    outcome
}

/// Serde adapter storing a [`Duration`] as whole minutes.
mod minutes {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_minutes())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        i64::deserialize(deserializer).map(Duration::minutes)
    }
}
