//! Key-value persistence backends.
//!
//! The engine persists each collection as one JSON payload under a fixed
//! key. [`SqliteStore`] is the durable backend; [`MemoryStore`] backs
//! tests and can be told to fail writes to exercise the engine's error
//! channel.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::error::{CoreError, StoreError};

use super::data_dir;

/// Keys the engine persists under.
pub mod keys {
    /// Ordered sequence of Task records.
    pub const TASKS: &str = "tasks";
    /// Ordered sequence of DailyActivity records.
    pub const ACTIVITY_LOG: &str = "activityLog";
    /// Frozen debug-clock override, if any.
    pub const DEBUG_CLOCK: &str = "debugClock";
    /// Running time-tracking session, if any.
    pub const SESSION: &str = "session";
}

/// Synchronous, fallible string store.
///
/// `get` distinguishes "absent" from failure. A failed `set` must leave
/// the previously stored value intact; callers keep operating on their
/// in-memory state either way.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// SQLite-backed store.
///
/// Lives at `~/.config/habitgrid/habitgrid.db` (see
/// [`data_dir`](super::data_dir)); a single `kv` table holds one row per
/// persisted collection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store in the data directory, creating file and schema as
    /// needed.
    ///
    /// # Errors
    /// Returns an error if the data directory, database, or schema cannot
    /// be created.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("habitgrid.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|source| StoreError::OpenFailed {
                path: std::path::PathBuf::from(":memory:"),
                source,
            })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv WHERE key = ?1")
            .map_err(|e| StoreError::read(key, e))?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::read(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(|e| StoreError::write(key, e))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(|e| StoreError::write(key, e))?;
        Ok(())
    }
}

/// In-memory store.
///
/// Writes can be switched to fail, standing in for a full or read-only
/// backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write (and removal) fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::write(key, "store quota exceeded"));
        }
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::write(key, "store quota exceeded"));
        }
        self.lock().remove(key);
        Ok(())
    }
}
