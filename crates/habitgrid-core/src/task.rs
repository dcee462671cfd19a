//! Task model and in-memory task store.
//!
//! [`TaskStore`] owns the live task list and implements the four lifecycle
//! operations (add, complete, submit progress, delete). Completion state is
//! always derived from accumulated progress against the canonical target;
//! awards are computed by the [`ActivityLedger`] at the moment an event is
//! logged and attributed back to the task's cumulative `points` field.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::activity::ActivityLedger;
use crate::clock::Clock;
use crate::error::ValidationError;
use crate::units::Unit;

/// How often a task recurs, and therefore when it resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        };
        f.write_str(label)
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(Frequency::Daily),
            "weekly" | "week" => Ok(Frequency::Weekly),
            "monthly" | "month" => Ok(Frequency::Monthly),
            other => Err(ValidationError::UnknownLabel {
                what: "frequency",
                value: other.to_string(),
            }),
        }
    }
}

/// A recurring task.
///
/// `target` and `progress` are canonical magnitudes (seconds for time
/// units). The wire name `progressInSeconds` is kept for compatibility
/// with previously persisted data even though non-time units store their
/// raw value there. `points` accumulates every award the task has ever
/// earned; period resets never subtract from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub frequency: Frequency,
    pub unit: Unit,
    pub target: i64,
    #[serde(rename = "progressInSeconds")]
    pub progress: i64,
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<i64>,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub created_at: i64,
}

impl Task {
    fn create(new: NewTask, now_ms: i64) -> Self {
        Task {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            frequency: new.frequency,
            unit: new.unit,
            target: new.unit.to_canonical(new.target),
            progress: 0,
            completed: false,
            completed_at: None,
            points: 0,
            created_at: now_ms,
        }
    }

    /// Progress as a fraction of target, clamped to `0.0..=1.0`.
    pub fn progress_ratio(&self) -> f64 {
        if self.target <= 0 {
            if self.progress > 0 {
                1.0
            } else {
                0.0
            }
        } else {
            (self.progress as f64 / self.target as f64).clamp(0.0, 1.0)
        }
    }
}

/// Parameters for creating a task. `target` is in the declared unit and is
/// converted to its canonical magnitude on insert.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub frequency: Frequency,
    pub unit: Unit,
    pub target: i64,
}

/// What a progress submission did to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressOutcome {
    /// Accumulated canonical progress after the submission.
    pub progress: i64,
    /// Completion state after the submission.
    pub completed: bool,
    /// Points granted by this submission; zero unless the submission left
    /// the task at or over its target.
    pub points_awarded: u32,
}

/// In-memory collection of live tasks.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Insert a new task and return a copy of it.
    pub fn add(&mut self, new: NewTask, clock: &dyn Clock) -> Task {
        let task = Task::create(new, clock.now_ms());
        self.tasks.push(task.clone());
        task
    }

    /// Mark a task completed regardless of progress.
    ///
    /// The logged event carries the full target as its progress delta, so
    /// the award is the plain base for the frequency. Progress itself is
    /// left at whatever was accrued. Returns the points awarded, `Some(0)`
    /// when the task was already complete this period, or `None` when no
    /// such task exists.
    pub fn complete(
        &mut self,
        id: &str,
        ledger: &mut ActivityLedger,
        clock: &dyn Clock,
    ) -> Option<u32> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        if task.completed {
            return Some(0);
        }
        let awarded = ledger.log_activity(task, task.target, true, clock.today());
        task.completed = true;
        task.completed_at = Some(clock.now_ms());
        task.points = task.points.saturating_add(awarded);
        Some(awarded)
    }

    /// Add a canonical progress amount to a task and recompute completion.
    ///
    /// Every submission is logged to the ledger; a submission that leaves
    /// the task at or over its target is a completion event and earns
    /// points for its own delta, including repeat submissions on an
    /// already-completed task. Returns `None` when no such task exists.
    pub fn submit_progress(
        &mut self,
        id: &str,
        delta: i64,
        ledger: &mut ActivityLedger,
        clock: &dyn Clock,
    ) -> Option<ProgressOutcome> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        let new_progress = task.progress.saturating_add(delta);
        let is_completed = new_progress >= task.target;
        let awarded = ledger.log_activity(task, delta, is_completed, clock.today());
        task.progress = new_progress;
        task.completed = is_completed;
        task.completed_at = if is_completed {
            Some(clock.now_ms())
        } else {
            None
        };
        task.points = task.points.saturating_add(awarded);
        Some(ProgressOutcome {
            progress: new_progress,
            completed: is_completed,
            points_awarded: awarded,
        })
    }

    /// Remove a task. Returns it, or `None` when no such task exists.
    /// The task's historical ledger entries are untouched.
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }
}
