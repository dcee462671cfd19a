//! Time source abstraction.
//!
//! Everything date-sensitive in the engine (reset boundaries, activity
//! dates, streaks) asks a [`Clock`] instead of calling `Local::now()`
//! directly. Production code uses [`SystemClock`]; tests and the debug
//! surface use [`DebugClock`], which can freeze time and jump across reset
//! boundaries without waiting for real midnights.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Local, NaiveDate};

use crate::error::StoreError;
use crate::storage::{keys, KvStore};

/// Source of "now" for the engine.
pub trait Clock: Send + Sync {
    /// Current local time.
    fn now(&self) -> DateTime<Local>;

    /// Current time as milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock implementation backed by `Local::now()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock with an optional frozen override.
///
/// While an override is set, `now()` returns it verbatim (time does not
/// flow). Releasing the override falls back to the wall clock.
#[derive(Debug, Default)]
pub struct DebugClock {
    override_at: Mutex<Option<DateTime<Local>>>,
}

impl DebugClock {
    /// New clock with no override; behaves like [`SystemClock`].
    pub fn new() -> Self {
        Self::default()
    }

    /// New clock frozen at `at`.
    pub fn frozen_at(at: DateTime<Local>) -> Self {
        Self {
            override_at: Mutex::new(Some(at)),
        }
    }

    /// Freeze the clock at `at`.
    pub fn freeze(&self, at: DateTime<Local>) {
        *self.lock() = Some(at);
    }

    /// Shift the effective time forward (or backward, with a negative
    /// duration) and freeze there. Starts from the wall clock when no
    /// override is set.
    pub fn advance(&self, by: Duration) {
        let mut guard = self.lock();
        let base = guard.unwrap_or_else(Local::now);
        *guard = Some(base + by);
    }

    /// Drop the override and return to the wall clock.
    pub fn release(&self) {
        *self.lock() = None;
    }

    /// The frozen time, if any.
    pub fn override_time(&self) -> Option<DateTime<Local>> {
        *self.lock()
    }

    /// Rebuild a clock from the override persisted in `store`.
    ///
    /// A missing, unreadable, or unparseable value yields a released
    /// clock; an unparseable one is also cleared so it cannot keep
    /// shadowing real time.
    pub fn restore(store: &dyn KvStore) -> Self {
        let raw = match store.get(keys::DEBUG_CLOCK) {
            Ok(Some(raw)) => raw,
            _ => return Self::new(),
        };
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(at) => Self::frozen_at(at.with_timezone(&Local)),
            Err(_) => {
                let _ = store.remove(keys::DEBUG_CLOCK);
                Self::new()
            }
        }
    }

    /// Persist the current override state to `store`.
    pub fn persist(&self, store: &dyn KvStore) -> Result<(), StoreError> {
        match self.override_time() {
            Some(at) => store.set(keys::DEBUG_CLOCK, &at.to_rfc3339()),
            None => store.remove(keys::DEBUG_CLOCK),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<DateTime<Local>>> {
        self.override_at
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for DebugClock {
    fn now(&self) -> DateTime<Local> {
        self.lock().unwrap_or_else(Local::now)
    }
}
