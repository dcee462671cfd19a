//! Streak, level, and points summary.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::activity::ActivityLedger;

/// Rolled-up points figures for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsSummary {
    pub total_points: u64,
    /// Points earned in the trailing recent window.
    pub recent_points: u64,
    /// Consecutive days with points, counted back from today.
    pub current_streak: u32,
    /// Level, advancing every 100 points.
    pub level: u32,
    pub points_to_next_level: u32,
    /// Progress through the current level, 0-100.
    pub level_progress_pct: u32,
}

/// Count consecutive days with points, walking back from `today`.
///
/// A day counts when its bucket has `total_points > 0`. If today has no
/// points yet, the walk starts at yesterday so an unbroken run is not
/// broken before the day is over. Bounded by `lookback_days` dates
/// examined, today included.
pub fn current_streak(ledger: &ActivityLedger, today: NaiveDate, lookback_days: u32) -> u32 {
    let has_points = |date: NaiveDate| ledger.points_on(date) > 0;
    let start = if has_points(today) { 0 } else { 1 };
    let mut streak = 0;
    for i in start..lookback_days {
        let Some(date) = today.checked_sub_days(Days::new(u64::from(i))) else {
            break;
        };
        if has_points(date) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Points earned on days dated within the trailing `window_days` window.
pub fn recent_points(ledger: &ActivityLedger, today: NaiveDate, window_days: u32) -> u64 {
    ledger
        .activities_in_period(window_days, today)
        .map(|d| u64::from(d.total_points))
        .sum()
}

/// Full summary for the stats display.
pub fn summarize(
    ledger: &ActivityLedger,
    today: NaiveDate,
    streak_lookback_days: u32,
    recent_window_days: u32,
) -> PointsSummary {
    let total = ledger.total_points();
    let into_level = (total % 100) as u32;
    PointsSummary {
        total_points: total,
        recent_points: recent_points(ledger, today, recent_window_days),
        current_streak: current_streak(ledger, today, streak_lookback_days),
        level: u32::try_from(total / 100 + 1).unwrap_or(u32::MAX),
        points_to_next_level: 100 - into_level,
        level_progress_pct: into_level,
    }
}
