//! Task source collaborator: reads a batch of tasks from CSV.
//!
//! Expected header: `Task,DurationMinutes,Deadline`. Rows that do not describe
//! a valid task are rejected individually; the rest of the batch is kept.

use anyhow::{bail, Context, Result};
use freetime_engine::{parse_instant, EngineError, NaivePolicy, TaskRequest};
use serde::Deserialize;
use tracing::warn;

const REQUIRED_COLUMNS: [&str; 3] = ["Task", "DurationMinutes", "Deadline"];

#[derive(Deserialize)]
struct TaskRow {
    #[serde(rename = "Task")]
    task: String,
    #[serde(rename = "DurationMinutes")]
    duration_minutes: String,
    #[serde(rename = "Deadline")]
    deadline: String,
}

#[derive(Debug, Default)]
pub struct LoadedTasks {
    pub tasks: Vec<TaskRequest>,
    /// One `InvalidTaskRequest` per rejected row.
    pub rejected: Vec<EngineError>,
}

pub fn parse_tasks(csv_text: &str, policy: &NaivePolicy) -> Result<LoadedTasks> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let headers = reader.headers().context("Failed to read task CSV header")?;
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        bail!("Task CSV is missing column(s): {}", missing.join(", "));
    }

    let mut loaded = LoadedTasks::default();
    for (index, row) in reader.deserialize::<TaskRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let result = row
            .map_err(|e| EngineError::InvalidTaskRequest {
                task: format!("line {}", line),
                reason: e.to_string(),
            })
            .and_then(|row| to_task(row, policy));
        match result {
            Ok(task) => loaded.tasks.push(task),
            Err(err) => {
                warn!(line, error = %err, "rejecting task row");
                loaded.rejected.push(err);
            }
        }
    }
    Ok(loaded)
}

fn to_task(row: TaskRow, policy: &NaivePolicy) -> freetime_engine::error::Result<TaskRequest> {
    build_task(&row.task, &row.duration_minutes, &row.deadline, policy)
}

/// Validate one task from its text fields, as typed into a row or on the command line.
pub fn build_task(
    name: &str,
    duration_minutes: &str,
    deadline: &str,
    policy: &NaivePolicy,
) -> freetime_engine::error::Result<TaskRequest> {
    let name = name.trim();
    let invalid = |reason: String| EngineError::InvalidTaskRequest {
        task: name.to_string(),
        reason,
    };
    if name.is_empty() {
        return Err(invalid("task name is empty".to_string()));
    }
    let minutes: i64 = duration_minutes.trim().parse().map_err(|_| {
        invalid(format!(
            "duration '{}' is not a whole number of minutes",
            duration_minutes
        ))
    })?;
    let deadline = parse_instant(deadline, policy).map_err(|e| invalid(format!("deadline: {}", e)))?;
    TaskRequest::from_minutes(name, minutes, deadline)
}
