//! # Habitgrid Core Library
//!
//! This library provides the core engine for the Habitgrid habit tracker.
//! It implements a CLI-first philosophy where all operations are available
//! via a standalone CLI binary, with any GUI being a thin layer over the
//! same core library.
//!
//! ## Architecture
//!
//! - **Task Store**: In-memory task list with completion derived from
//!   accumulated progress against canonical targets
//! - **Activity Ledger**: Append-only daily history that computes point
//!   awards at the moment activity is logged
//! - **Reset Sweep**: Idempotent rollover of completed tasks at daily,
//!   weekly, and monthly period boundaries
//! - **Storage**: SQLite-backed key-value persistence and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`HabitEngine`]: Persistence-aware front over the store and ledger
//! - [`TaskStore`]: Task lifecycle operations
//! - [`ActivityLedger`]: Daily activity and points history
//! - [`Clock`]: Time source abstraction, overridable for tests and the
//!   debug surface

pub mod activity;
pub mod clock;
pub mod engine;
pub mod error;
pub mod events;
pub mod points;
pub mod reset;
pub mod session;
pub mod stats;
pub mod storage;
pub mod task;
pub mod units;

pub use activity::{ActivityEntry, ActivityLedger, DailyActivity};
pub use clock::{Clock, DebugClock, SystemClock};
pub use engine::{HabitEngine, SessionOutcome};
pub use error::{ConfigError, CoreError, Result, StoreError, ValidationError};
pub use events::Event;
pub use points::{base_points, calculate_points};
pub use reset::{period_start, ResetTask};
pub use session::Session;
pub use stats::{current_streak, heatmap, intensity, summarize, DayCell, Heatmap, PointsSummary};
pub use storage::{data_dir, keys, Config, KvStore, MemoryStore, SqliteStore};
pub use task::{Frequency, NewTask, ProgressOutcome, Task, TaskStore};
pub use units::{format_date_time, Unit};
