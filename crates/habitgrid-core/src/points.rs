//! Points awarded when a task completes.
//!
//! The award is a flat base per frequency tier plus an overachievement
//! bonus derived from the progress-to-target ratio at completion time.
//! Points are computed once and stored on the activity entry; historical
//! awards never change retroactively.

use crate::task::Frequency;

/// Base award for completing a task of the given frequency.
pub fn base_points(frequency: Frequency) -> u32 {
    match frequency {
        Frequency::Daily => 1,
        Frequency::Weekly => 5,
        Frequency::Monthly => 20,
    }
}

/// Full award: base plus overachievement bonus.
pub fn calculate_points(frequency: Frequency, progress: i64, target: i64) -> u32 {
    base_points(frequency) + overachievement_bonus(progress, target)
}

/// Bonus for overshooting the target: +2 at 150% of target or more,
/// +1 at 120% or more, otherwise nothing.
///
/// A zero target cannot form a ratio; any progress on such a task counts
/// as maximal overachievement, none as no bonus.
fn overachievement_bonus(progress: i64, target: i64) -> u32 {
    if target == 0 {
        return if progress > 0 { 2 } else { 0 };
    }
    let ratio = progress as f64 / target as f64;
    if ratio >= 1.5 {
        2
    } else if ratio >= 1.2 {
        1
    } else {
        0
    }
}
