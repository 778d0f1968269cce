//! Error types for freetime-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Everything that can go wrong in a scheduling pass or at its input boundary.
///
/// Only some variants are ever fatal to a caller. The engine itself reports
/// `MalformedInterval` as a skipped-record warning and `NoSlotAvailable` as an
/// unplaced task; neither aborts a pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A busy interval that is structurally invalid (e.g. ends before it starts)
    /// or whose bounds could not be read.
    #[error("Malformed interval: {reason}")]
    MalformedInterval { reason: String },

    /// A task rejected before placement.
    #[error("Invalid task request '{task}': {reason}")]
    InvalidTaskRequest { task: String, reason: String },

    /// No free interval fits the task's duration before its deadline.
    #[error("No slot available for '{task}' ({duration_minutes} min before {deadline})")]
    NoSlotAvailable {
        task: String,
        duration_minutes: i64,
        deadline: DateTime<Utc>,
    },

    /// An instant without offset information under a policy that refuses to guess.
    #[error("Instant has no UTC offset: {0}")]
    TimezoneAmbiguity(String),

    /// Text that is not any recognised instant format.
    #[error("Invalid instant: {0}")]
    InvalidInstant(String),

    #[error("Invalid work window: {0}")]
    InvalidWindow(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
