//! Contribution-style heatmap over daily activity.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::activity::ActivityLedger;

/// One day's cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    pub total_points: u32,
    pub completed_tasks: u32,
    /// Intensity bucket, 0..=4.
    pub intensity: u8,
}

/// Monday-first weekly grid covering a trailing window of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    /// Rows of Monday..Sunday cells; `None` pads the partial first and
    /// last weeks of the window.
    pub weeks: Vec<[Option<DayCell>; 7]>,
}

/// Intensity bucket for a day's points: 0, 1-2, 3-5, 6-10, >10 map to
/// 0 through 4.
pub fn intensity(points: u32) -> u8 {
    match points {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=10 => 3,
        _ => 4,
    }
}

/// Build the grid for the `days`-day window ending `today`.
///
/// Every date in the window gets a cell; days without logged activity
/// appear with zero points and intensity 0.
pub fn heatmap(ledger: &ActivityLedger, today: NaiveDate, days: u32) -> Heatmap {
    let days = days.max(1);
    let start = today
        .checked_sub_days(Days::new(u64::from(days - 1)))
        .unwrap_or(today);

    let mut weeks = Vec::new();
    let mut week: [Option<DayCell>; 7] = [None; 7];
    let mut filled = false;
    let mut date = start;
    while date <= today {
        let idx = date.weekday().num_days_from_monday() as usize;
        if idx == 0 && filled {
            weeks.push(week);
            week = [None; 7];
            filled = false;
        }
        let (points, completed) = ledger
            .activity_for_date(date)
            .map_or((0, 0), |d| (d.total_points, d.completed_tasks));
        week[idx] = Some(DayCell {
            date,
            total_points: points,
            completed_tasks: completed,
            intensity: intensity(points),
        });
        filled = true;

        let Some(next) = date.checked_add_days(Days::new(1)) else {
            break;
        };
        date = next;
    }
    if filled {
        weeks.push(week);
    }
    Heatmap { weeks }
}
