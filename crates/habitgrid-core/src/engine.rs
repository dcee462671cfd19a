//! Engine facade.
//!
//! [`HabitEngine`] wires the task store and activity ledger to a
//! key-value backend and a clock. All mutations go memory-first: the
//! in-memory collections are updated, then flushed to the store, and a
//! failed flush is recorded for [`take_store_errors`] instead of undoing
//! the mutation. Loading tolerates corrupt payloads by clearing the
//! offending key and starting that collection empty.
//!
//! [`take_store_errors`]: HabitEngine::take_store_errors

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::activity::{ActivityLedger, DailyActivity};
use crate::clock::Clock;
use crate::error::{Result, StoreError, ValidationError};
use crate::events::Event;
use crate::reset::{self, ResetTask};
use crate::session::Session;
use crate::storage::{keys, KvStore};
use crate::task::{NewTask, ProgressOutcome, Task, TaskStore};

/// What stopping a session did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub task_id: String,
    pub elapsed_seconds: i64,
    /// `None` when the tracked task no longer exists.
    pub progress: Option<ProgressOutcome>,
}

/// Task store, activity ledger, reset sweep, and session tracking behind
/// one persistence-aware front.
pub struct HabitEngine {
    tasks: TaskStore,
    ledger: ActivityLedger,
    session: Option<Session>,
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    events: Vec<Event>,
    store_errors: Vec<StoreError>,
}

impl HabitEngine {
    /// Load persisted state and run a startup sweep.
    pub fn load(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        let mut store_errors = Vec::new();
        let tasks: Vec<Task> =
            load_collection(store.as_ref(), keys::TASKS, &mut store_errors);
        let days: Vec<DailyActivity> =
            load_collection(store.as_ref(), keys::ACTIVITY_LOG, &mut store_errors);
        let session: Option<Session> =
            load_collection(store.as_ref(), keys::SESSION, &mut store_errors);

        let mut engine = HabitEngine {
            tasks: TaskStore::from_tasks(tasks),
            ledger: ActivityLedger::from_days(days),
            session,
            store,
            clock,
            events: Vec::new(),
            store_errors,
        };
        engine.run_sweep();
        engine
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn ledger(&self) -> &ActivityLedger {
        &self.ledger
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Create a task. The title must be non-blank; the target is given in
    /// the declared unit.
    pub fn add_task(&mut self, new: NewTask) -> Result<Task> {
        let title = new.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "title".into(),
                message: "must not be blank".into(),
            }
            .into());
        }
        let task = self.tasks.add(NewTask { title, ..new }, self.clock.as_ref());
        self.events.push(Event::TaskAdded {
            task_id: task.id.clone(),
            title: task.title.clone(),
            frequency: task.frequency,
            at: self.clock.now(),
        });
        self.persist_tasks();
        Ok(task)
    }

    /// Mark a task completed. Returns the award, `Some(0)` if it was
    /// already complete, `None` if no such task exists.
    pub fn complete_task(&mut self, id: &str) -> Option<u32> {
        let awarded = self
            .tasks
            .complete(id, &mut self.ledger, self.clock.as_ref())?;
        if awarded > 0 {
            self.events.push(Event::TaskCompleted {
                task_id: id.to_string(),
                points_awarded: awarded,
                at: self.clock.now(),
            });
            self.persist_tasks();
            self.persist_ledger();
        }
        Some(awarded)
    }

    /// Submit a canonical progress delta (seconds for time units).
    pub fn submit_progress(&mut self, id: &str, delta: i64) -> Option<ProgressOutcome> {
        let outcome = self
            .tasks
            .submit_progress(id, delta, &mut self.ledger, self.clock.as_ref())?;
        self.events.push(Event::ProgressLogged {
            task_id: id.to_string(),
            delta,
            completed: outcome.completed,
            points_awarded: outcome.points_awarded,
            at: self.clock.now(),
        });
        self.persist_tasks();
        self.persist_ledger();
        Some(outcome)
    }

    /// Delete a task, dropping any session tracking it. Ledger history is
    /// kept.
    pub fn delete_task(&mut self, id: &str) -> Option<Task> {
        let task = self.tasks.remove(id)?;
        if self.session.as_ref().is_some_and(|s| s.task_id == task.id) {
            self.session = None;
            self.persist_session();
        }
        self.events.push(Event::TaskDeleted {
            task_id: task.id.clone(),
            at: self.clock.now(),
        });
        self.persist_tasks();
        Some(task)
    }

    /// Reset completed tasks whose period has rolled over.
    pub fn run_sweep(&mut self) -> Vec<ResetTask> {
        let now = self.clock.now();
        let swept = reset::sweep(self.tasks.tasks_mut(), now);
        if !swept.is_empty() {
            for reset in &swept {
                self.events.push(Event::TaskReset {
                    task_id: reset.task_id.clone(),
                    frequency: reset.frequency,
                    at: now,
                });
            }
            self.persist_tasks();
        }
        swept
    }

    /// Begin tracking time against a task, replacing any earlier session.
    ///
    /// # Errors
    /// Fails when the task does not exist or does not measure time.
    pub fn start_session(&mut self, id: &str) -> Result<Session> {
        let task = self
            .tasks
            .get(id)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "task".into(),
                message: format!("no task with id {id}"),
            })?;
        if !task.unit.is_time() {
            return Err(ValidationError::InvalidValue {
                field: "unit".into(),
                message: format!("'{}' tracks {}, not time", task.title, task.unit),
            }
            .into());
        }
        let session = Session::start(&task.id, self.clock.as_ref());
        self.session = Some(session.clone());
        self.persist_session();
        self.events.push(Event::SessionStarted {
            task_id: session.task_id.clone(),
            at: self.clock.now(),
        });
        Ok(session)
    }

    /// Stop the running session and submit its elapsed seconds as
    /// progress. Returns `None` when nothing is being tracked.
    pub fn stop_session(&mut self) -> Option<SessionOutcome> {
        let session = self.session.take()?;
        self.persist_session();
        let elapsed = session.elapsed_seconds(self.clock.as_ref());
        let progress = self.submit_progress(&session.task_id, elapsed);
        self.events.push(Event::SessionStopped {
            task_id: session.task_id.clone(),
            elapsed_seconds: elapsed,
            at: self.clock.now(),
        });
        Some(SessionOutcome {
            task_id: session.task_id,
            elapsed_seconds: elapsed,
            progress,
        })
    }

    /// The running session, if any.
    pub fn active_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Events emitted since the last drain.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Store failures observed since the last drain. Mutations behind a
    /// failed flush are still live in memory; callers decide how loudly
    /// to report the risk of losing them on reload.
    pub fn take_store_errors(&mut self) -> Vec<StoreError> {
        std::mem::take(&mut self.store_errors)
    }

    pub fn has_store_errors(&self) -> bool {
        !self.store_errors.is_empty()
    }

    fn persist_tasks(&mut self) {
        let payload = serde_json::to_string(self.tasks.tasks());
        self.persist_payload(keys::TASKS, payload);
    }

    fn persist_ledger(&mut self) {
        let payload = serde_json::to_string(self.ledger.days());
        self.persist_payload(keys::ACTIVITY_LOG, payload);
    }

    fn persist_session(&mut self) {
        match self.session.as_ref() {
            Some(session) => {
                let payload = serde_json::to_string(session);
                self.persist_payload(keys::SESSION, payload);
            }
            None => {
                if let Err(e) = self.store.remove(keys::SESSION) {
                    self.store_errors.push(e);
                }
            }
        }
    }

    fn persist_payload(&mut self, key: &str, payload: serde_json::Result<String>) {
        match payload {
            Ok(raw) => {
                if let Err(e) = self.store.set(key, &raw) {
                    self.store_errors.push(e);
                }
            }
            Err(e) => self.store_errors.push(StoreError::write(key, e)),
        }
    }
}

/// Read and decode one collection, falling back to its default.
///
/// A corrupt payload is cleared from the store so the next run starts
/// clean; the decode error is kept for the engine's error channel.
fn load_collection<T: DeserializeOwned + Default>(
    store: &dyn KvStore,
    key: &str,
    errors: &mut Vec<StoreError>,
) -> T {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                if let Err(remove_err) = store.remove(key) {
                    errors.push(remove_err);
                }
                errors.push(StoreError::read(key, e));
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            errors.push(e);
            T::default()
        }
    }
}
