//! Daily activity ledger.
//!
//! Every progress submission and completion is logged here as an immutable
//! [`ActivityEntry`], bucketed into one [`DailyActivity`] per calendar day.
//! The ledger is the source of truth for points: it computes the award for
//! each event and hands it back to the caller for attribution. Buckets are
//! created lazily and never deleted, so history survives task deletion.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::points::calculate_points;
use crate::task::{Frequency, Task};

/// One logged action against a task, with the task's identity snapshotted
/// at logging time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub date: NaiveDate,
    pub task_id: String,
    pub task_title: String,
    pub task_frequency: Frequency,
    /// Canonical progress delta this event contributed.
    pub progress: i64,
    /// Whether this event was a completion.
    pub completed: bool,
    /// Points granted by this event; zero unless completed.
    pub points: u32,
}

/// All activity for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub total_points: u32,
    pub completed_tasks: u32,
    pub entries: Vec<ActivityEntry>,
}

impl DailyActivity {
    fn empty(date: NaiveDate) -> Self {
        DailyActivity {
            date,
            total_points: 0,
            completed_tasks: 0,
            entries: Vec::new(),
        }
    }
}

/// In-memory activity history, ordered by date.
#[derive(Debug, Default)]
pub struct ActivityLedger {
    days: Vec<DailyActivity>,
}

impl ActivityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted buckets. Order in storage is not
    /// trusted; buckets are re-sorted so date lookups can bisect.
    pub fn from_days(mut days: Vec<DailyActivity>) -> Self {
        days.sort_by_key(|d| d.date);
        Self { days }
    }

    pub fn days(&self) -> &[DailyActivity] {
        &self.days
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Log one event against `task` dated `date`.
    ///
    /// Completion events earn `calculate_points` for their own delta;
    /// plain progress events earn nothing. Returns the awarded points so
    /// the caller can attribute them to the task.
    pub fn log_activity(
        &mut self,
        task: &Task,
        delta: i64,
        completed_by_this_event: bool,
        date: NaiveDate,
    ) -> u32 {
        let points = if completed_by_this_event {
            calculate_points(task.frequency, delta, task.target)
        } else {
            0
        };
        let entry = ActivityEntry {
            date,
            task_id: task.id.clone(),
            task_title: task.title.clone(),
            task_frequency: task.frequency,
            progress: delta,
            completed: completed_by_this_event,
            points,
        };

        let day = match self.days.binary_search_by_key(&date, |d| d.date) {
            Ok(i) => &mut self.days[i],
            Err(i) => {
                self.days.insert(i, DailyActivity::empty(date));
                &mut self.days[i]
            }
        };
        day.total_points = day.total_points.saturating_add(points);
        if completed_by_this_event {
            day.completed_tasks += 1;
        }
        day.entries.push(entry);
        points
    }

    /// Exact-date lookup.
    pub fn activity_for_date(&self, date: NaiveDate) -> Option<&DailyActivity> {
        self.days
            .binary_search_by_key(&date, |d| d.date)
            .ok()
            .map(|i| &self.days[i])
    }

    /// All buckets dated on or after `today - days`.
    pub fn activities_in_period(
        &self,
        days: u32,
        today: NaiveDate,
    ) -> impl Iterator<Item = &DailyActivity> {
        let cutoff = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        self.days.iter().filter(move |d| d.date >= cutoff)
    }

    /// Points logged on `date`, zero when nothing was.
    pub fn points_on(&self, date: NaiveDate) -> u32 {
        self.activity_for_date(date).map_or(0, |d| d.total_points)
    }

    /// Sum of points across all history.
    pub fn total_points(&self) -> u64 {
        self.days.iter().map(|d| u64::from(d.total_points)).sum()
    }
}
