//! Integration tests for the engine lifecycle.
//!
//! These tests drive the full workflow (tasks, progress, awards, resets,
//! sessions, stats) through the public engine API against both the
//! in-memory and the SQLite store.

use std::sync::Arc;

use chrono::{Duration, Local, TimeZone};
use habitgrid_core::storage::keys;
use habitgrid_core::{
    heatmap, summarize, DebugClock, Frequency, HabitEngine, KvStore, MemoryStore, NewTask,
    SqliteStore, StoreError, Unit,
};

fn clock_at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Arc<DebugClock> {
    Arc::new(DebugClock::frozen_at(
        Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap(),
    ))
}

fn reading(target_minutes: i64) -> NewTask {
    NewTask {
        title: "Read".into(),
        frequency: Frequency::Daily,
        unit: Unit::Minutes,
        target: target_minutes,
    }
}

#[test]
fn test_daily_lifecycle_and_rollover() {
    let store = Arc::new(MemoryStore::new());
    // Sunday evening.
    let clock = clock_at(2025, 6, 1, 21, 0);
    let mut engine = HabitEngine::load(store, clock.clone());

    let task = engine.add_task(reading(10)).unwrap();
    let outcome = engine.submit_progress(&task.id, 600).unwrap();
    assert!(outcome.completed);
    assert_eq!(outcome.points_awarded, 1);

    // Same period: nothing to sweep.
    clock.advance(Duration::hours(1));
    assert!(engine.run_sweep().is_empty());

    // Monday morning: the daily task rolls over, points stay.
    clock.advance(Duration::hours(10));
    let swept = engine.run_sweep();
    assert_eq!(swept.len(), 1);
    assert_eq!(swept[0].task_id, task.id);

    let task = engine.task(&task.id).unwrap();
    assert!(!task.completed);
    assert_eq!(task.progress, 0);
    assert_eq!(task.completed_at, None);
    assert_eq!(task.points, 1);

    // Sweeping again is a no-op.
    assert!(engine.run_sweep().is_empty());
}

#[test]
fn test_weekly_and_monthly_rollover() {
    let store = Arc::new(MemoryStore::new());
    // Sunday 2025-06-01.
    let clock = clock_at(2025, 6, 1, 9, 0);
    let mut engine = HabitEngine::load(store, clock.clone());

    let weekly = engine
        .add_task(NewTask {
            title: "Long run".into(),
            frequency: Frequency::Weekly,
            unit: Unit::Kilometers,
            target: 20,
        })
        .unwrap();
    let monthly = engine
        .add_task(NewTask {
            title: "Budget review".into(),
            frequency: Frequency::Monthly,
            unit: Unit::Count,
            target: 1,
        })
        .unwrap();
    engine.complete_task(&weekly.id).unwrap();
    engine.complete_task(&monthly.id).unwrap();

    // Monday starts a new week but not a new month.
    clock.freeze(Local.with_ymd_and_hms(2025, 6, 2, 0, 30, 0).unwrap());
    let swept = engine.run_sweep();
    assert_eq!(swept.len(), 1);
    assert_eq!(swept[0].task_id, weekly.id);
    assert!(engine.task(&monthly.id).unwrap().completed);

    // July 1st starts a new month.
    clock.freeze(Local.with_ymd_and_hms(2025, 7, 1, 0, 30, 0).unwrap());
    let swept = engine.run_sweep();
    assert_eq!(swept.len(), 1);
    assert_eq!(swept[0].task_id, monthly.id);
}

#[test]
fn test_partial_progress_survives_rollover() {
    let store = Arc::new(MemoryStore::new());
    let clock = clock_at(2025, 6, 1, 21, 0);
    let mut engine = HabitEngine::load(store, clock.clone());

    let task = engine.add_task(reading(10)).unwrap();
    let outcome = engine.submit_progress(&task.id, 300).unwrap();
    assert!(!outcome.completed);

    clock.advance(Duration::days(3));
    assert!(engine.run_sweep().is_empty());
    assert_eq!(engine.task(&task.id).unwrap().progress, 300);
}

#[test]
fn test_points_accumulate_across_periods() {
    let store = Arc::new(MemoryStore::new());
    let clock = clock_at(2025, 6, 2, 9, 0);
    let mut engine = HabitEngine::load(store, clock.clone());

    let task = engine.add_task(reading(10)).unwrap();
    engine.submit_progress(&task.id, 600).unwrap();

    clock.advance(Duration::days(1));
    engine.run_sweep();
    engine.submit_progress(&task.id, 900).unwrap();

    let task = engine.task(&task.id).unwrap();
    assert_eq!(task.points, 1 + 3);
    assert_eq!(engine.ledger().total_points(), 4);
    assert_eq!(engine.ledger().days().len(), 2);
}

#[test]
fn test_stats_pipeline_over_several_days() {
    let store = Arc::new(MemoryStore::new());
    // Monday through Wednesday.
    let clock = clock_at(2025, 6, 2, 9, 0);
    let mut engine = HabitEngine::load(store, clock.clone());
    let task = engine.add_task(reading(10)).unwrap();

    for _ in 0..3 {
        engine.submit_progress(&task.id, 600).unwrap();
        clock.advance(Duration::days(1));
        engine.run_sweep();
    }

    // Thursday, with no activity yet today.
    let today = engine.clock().today();
    let summary = summarize(engine.ledger(), today, 90, 7);
    assert_eq!(summary.total_points, 3);
    assert_eq!(summary.recent_points, 3);
    assert_eq!(summary.current_streak, 3);
    assert_eq!(summary.level, 1);
    assert_eq!(summary.points_to_next_level, 97);

    let grid = heatmap(engine.ledger(), today, 91);
    let cells: Vec<_> = grid
        .weeks
        .iter()
        .flatten()
        .filter_map(|c| c.as_ref())
        .filter(|c| c.total_points > 0)
        .collect();
    assert_eq!(cells.len(), 3);
    assert!(cells.iter().all(|c| c.intensity == 1));
}

#[test]
fn test_sqlite_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habitgrid.db");
    let clock = clock_at(2025, 6, 2, 9, 0);

    let id = {
        let store = Arc::new(SqliteStore::open_at(&path).unwrap());
        let mut engine = HabitEngine::load(store, clock.clone());
        let task = engine.add_task(reading(10)).unwrap();
        engine.submit_progress(&task.id, 720).unwrap();
        engine.start_session(&task.id).unwrap();
        assert!(!engine.has_store_errors());
        task.id
    };

    let store = Arc::new(SqliteStore::open_at(&path).unwrap());
    let mut engine = HabitEngine::load(store, clock.clone());
    let task = engine.task(&id).unwrap();
    assert!(task.completed);
    assert_eq!(task.progress, 720);
    assert_eq!(task.points, 2);
    assert_eq!(engine.ledger().total_points(), 2);

    // The session survived the restart and keeps counting.
    assert_eq!(engine.active_session().unwrap().task_id, id);
    clock.advance(Duration::seconds(120));
    let outcome = engine.stop_session().unwrap();
    assert_eq!(outcome.elapsed_seconds, 120);
}

#[test]
fn test_corrupt_log_is_discarded_but_tasks_survive() {
    let store = Arc::new(MemoryStore::new());
    let clock = clock_at(2025, 6, 2, 9, 0);
    {
        let mut engine = HabitEngine::load(store.clone(), clock.clone());
        let task = engine.add_task(reading(10)).unwrap();
        engine.submit_progress(&task.id, 600).unwrap();
    }
    store.set(keys::ACTIVITY_LOG, "[{\"date\": 42}]").unwrap();

    let mut engine = HabitEngine::load(store.clone(), clock);
    assert_eq!(engine.tasks().len(), 1);
    assert!(engine.ledger().is_empty());

    let errors = engine.take_store_errors();
    assert_eq!(errors.len(), 1);
    assert!(
        matches!(&errors[0], StoreError::ReadFailed { key, .. } if key == keys::ACTIVITY_LOG)
    );
    assert!(store.get(keys::ACTIVITY_LOG).unwrap().is_none());
}

#[test]
fn test_write_outage_is_reported_and_recovered_from() {
    let store = Arc::new(MemoryStore::new());
    let clock = clock_at(2025, 6, 2, 9, 0);
    let mut engine = HabitEngine::load(store.clone(), clock.clone());
    let task = engine.add_task(reading(10)).unwrap();

    store.fail_writes(true);
    let outcome = engine.submit_progress(&task.id, 300).unwrap();
    assert_eq!(outcome.progress, 300);
    assert!(engine.has_store_errors());
    assert!(!engine.take_store_errors().is_empty());

    // Collections are flushed whole, so the next successful mutation
    // also carries the progress made during the outage.
    store.fail_writes(false);
    engine.complete_task(&task.id).unwrap();
    assert!(!engine.has_store_errors());

    let reloaded = HabitEngine::load(store, clock);
    let task = reloaded.task(&task.id).unwrap();
    assert_eq!(task.progress, 300);
    assert!(task.completed);
}

#[test]
fn test_legacy_records_load_and_stale_state_is_repaired() {
    let store = Arc::new(MemoryStore::new());
    // A completed daily task persisted with Sunday's stamp, in the wire
    // shape older builds wrote (no points, no createdAt).
    let sunday_stamp = Local
        .with_ymd_and_hms(2025, 6, 1, 22, 0, 0)
        .unwrap()
        .timestamp_millis();
    store
        .set(
            keys::TASKS,
            &format!(
                r#"[{{
                    "id": "t1",
                    "title": "Stretch",
                    "frequency": "daily",
                    "unit": "minutes",
                    "target": 300,
                    "progressInSeconds": 340,
                    "completed": true,
                    "completedAt": {sunday_stamp}
                }}]"#
            ),
        )
        .unwrap();
    store
        .set(
            keys::ACTIVITY_LOG,
            r#"[{
                "date": "2025-06-01",
                "totalPoints": 1,
                "completedTasks": 1,
                "entries": [{
                    "date": "2025-06-01",
                    "taskId": "t1",
                    "taskTitle": "Stretch",
                    "taskFrequency": "daily",
                    "progress": 340,
                    "completed": true,
                    "points": 1
                }]
            }]"#,
        )
        .unwrap();

    let mut engine = HabitEngine::load(store.clone(), clock_at(2025, 6, 2, 9, 0));
    assert!(!engine.has_store_errors());

    // The startup sweep rolled the stale completion over.
    let task = engine.task("t1").unwrap();
    assert!(!task.completed);
    assert_eq!(task.progress, 0);
    assert_eq!(task.points, 0);
    assert_eq!(engine.ledger().total_points(), 1);

    // The repaired state was flushed in the historical wire shape.
    let raw = store.get(keys::TASKS).unwrap().unwrap();
    assert!(raw.contains("\"progressInSeconds\":0"));
    assert!(raw.contains("\"completedAt\":null"));

    engine.submit_progress("t1", 340).unwrap();
    assert_eq!(engine.task("t1").unwrap().points, 1);
}
