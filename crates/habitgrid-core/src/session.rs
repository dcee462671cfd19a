//! Elapsed-time tracking against a single task.
//!
//! A session is nothing but a start stamp; elapsed time is derived from
//! the clock on demand. There is no internal ticking: whoever stops the
//! session reports the final duration once, and that duration becomes a
//! plain progress submission.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// A running time-tracking session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub task_id: String,
    /// Epoch milliseconds at which tracking began.
    pub started_at: i64,
}

impl Session {
    pub fn start(task_id: impl Into<String>, clock: &dyn Clock) -> Self {
        Session {
            task_id: task_id.into(),
            started_at: clock.now_ms(),
        }
    }

    /// Whole seconds since the session started. Clamped to zero if the
    /// clock has moved backwards past the start stamp.
    pub fn elapsed_seconds(&self, clock: &dyn Clock) -> i64 {
        clock.now_ms().saturating_sub(self.started_at).max(0) / 1000
    }
}
