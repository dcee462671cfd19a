use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::task::Frequency;

/// Every state change in the engine produces an Event.
/// The CLI prints them; tests assert on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TaskAdded {
        task_id: String,
        title: String,
        frequency: Frequency,
        at: DateTime<Local>,
    },
    TaskCompleted {
        task_id: String,
        points_awarded: u32,
        at: DateTime<Local>,
    },
    ProgressLogged {
        task_id: String,
        delta: i64,
        completed: bool,
        points_awarded: u32,
        at: DateTime<Local>,
    },
    TaskDeleted {
        task_id: String,
        at: DateTime<Local>,
    },
    /// A period rollover returned the task to incomplete.
    TaskReset {
        task_id: String,
        frequency: Frequency,
        at: DateTime<Local>,
    },
    SessionStarted {
        task_id: String,
        at: DateTime<Local>,
    },
    /// Session ended; its elapsed time was submitted as progress.
    SessionStopped {
        task_id: String,
        elapsed_seconds: i64,
        at: DateTime<Local>,
    },
}

impl Event {
    /// Task id the event concerns.
    pub fn task_id(&self) -> &str {
        match self {
            Event::TaskAdded { task_id, .. }
            | Event::TaskCompleted { task_id, .. }
            | Event::ProgressLogged { task_id, .. }
            | Event::TaskDeleted { task_id, .. }
            | Event::TaskReset { task_id, .. }
            | Event::SessionStarted { task_id, .. }
            | Event::SessionStopped { task_id, .. } => task_id,
        }
    }
}
