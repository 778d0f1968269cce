//! # freetime-engine
//!
//! Deterministic free-time scheduling for a single work day.
//!
//! Given the busy intervals of a day and a list of tasks (each with a duration
//! and a deadline), the engine finds the gaps in the day and assigns each task,
//! in list order, to the first gap that fits it and ends by its deadline. All
//! instants are absolute points on the UTC timeline; textual input is
//! normalized once at the boundary by [`normalize`].
//!
//! ## Modules
//!
//! - [`interval`] — half-open intervals and externally owned busy intervals
//! - [`window`] — the schedulable portion of a day
//! - [`gaps`] — busy intervals → ordered free intervals
//! - [`pool`] — the mutable free pool carved by placement
//! - [`placer`] — first-fit task placement
//! - [`schedule`] — one full scheduling pass and the events it proposes
//! - [`conflict`] — overlap audit
//! - [`normalize`] — text → UTC instants under one naive-time policy
//! - [`error`] — Error types

pub mod conflict;
pub mod error;
pub mod gaps;
pub mod interval;
pub mod normalize;
pub mod placer;
pub mod pool;
pub mod schedule;
pub mod window;

pub use conflict::{find_overlaps, Overlap};
pub use error::EngineError;
pub use gaps::{find_free_slots, GapScan};
pub use interval::{BusyInterval, Interval};
pub use normalize::{parse_instant, parse_timezone, NaivePolicy};
pub use placer::{place_task, place_tasks, Placement, PlacementOutcome, TaskRequest, UnplacedTask};
pub use pool::{FreePool, PoolOrder};
pub use schedule::{schedule, ProposedEvent, SchedulePass};
pub use window::WorkWindow;
