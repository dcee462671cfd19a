//! Command implementations.
//!
//! Every command opens the store, restores any persisted debug-clock
//! override, and loads the engine (which sweeps on load). Store failures
//! never abort a command: the in-memory mutation already happened, so
//! they are reported as warnings on stderr instead.

pub mod activity;
pub mod config;
pub mod debug;
pub mod stats;
pub mod sweep;
pub mod task;
pub mod track;

use std::sync::Arc;

use habitgrid_core::{CoreError, DebugClock, HabitEngine, SqliteStore};

/// The handles a command works with: the engine plus the pieces the
/// debug surface needs to reach past it.
pub struct Ctx {
    pub engine: HabitEngine,
    pub clock: Arc<DebugClock>,
    pub store: Arc<SqliteStore>,
}

pub fn open() -> Result<Ctx, CoreError> {
    let store = Arc::new(SqliteStore::open()?);
    let clock = Arc::new(DebugClock::restore(store.as_ref()));
    let engine = HabitEngine::load(store.clone(), clock.clone());
    Ok(Ctx {
        engine,
        clock,
        store,
    })
}

pub fn finish(engine: &mut HabitEngine) {
    for err in engine.take_store_errors() {
        eprintln!("warning: {err}");
    }
}
