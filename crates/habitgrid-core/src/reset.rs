//! Period rollover for completed tasks.
//!
//! A completed task stays completed until the calendar rolls into a new
//! period for its frequency; the sweep then returns it to incomplete with
//! zero progress. Points already earned are never revoked. Boundaries are
//! local midnights: today for daily tasks, the most recent Monday for
//! weekly, the 1st of the month for monthly.

use chrono::{DateTime, Datelike, Days, Local, NaiveDateTime, NaiveTime, TimeZone};

use crate::task::{Frequency, Task};

/// Record of one task returned to incomplete by a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetTask {
    pub task_id: String,
    pub title: String,
    pub frequency: Frequency,
}

/// Start of the current period for `frequency`, as naive local time.
pub fn period_start(frequency: Frequency, now: DateTime<Local>) -> NaiveDateTime {
    let today = now.date_naive();
    let first_day = match frequency {
        Frequency::Daily => today,
        Frequency::Weekly => today
            .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
            .unwrap_or(today),
        Frequency::Monthly => today.with_day(1).unwrap_or(today),
    };
    first_day.and_time(NaiveTime::MIN)
}

/// Whether a task's completion stamp predates the current period.
///
/// A completion at the boundary instant itself belongs to the new period
/// and survives; only strictly-earlier stamps are stale. A completed task
/// whose stamp is missing or unrepresentable violates the completion
/// invariant, and counts as stale so the sweep repairs it.
pub fn is_stale(task: &Task, now: DateTime<Local>) -> bool {
    if !task.completed {
        return false;
    }
    let boundary = period_start(task.frequency, now);
    match task
        .completed_at
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
    {
        Some(at) => at.naive_local() < boundary,
        None => true,
    }
}

/// Return every stale task to incomplete, leaving `points` untouched.
///
/// Idempotent: a second sweep at the same instant finds nothing stale.
/// Incomplete tasks are never touched, whatever their age.
pub fn sweep(tasks: &mut [Task], now: DateTime<Local>) -> Vec<ResetTask> {
    let mut swept = Vec::new();
    for task in tasks.iter_mut() {
        if is_stale(task, now) {
            task.completed = false;
            task.progress = 0;
            task.completed_at = None;
            swept.push(ResetTask {
                task_id: task.id.clone(),
                title: task.title.clone(),
                frequency: task.frequency,
            });
        }
    }
    swept
}
