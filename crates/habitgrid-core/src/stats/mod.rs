//! Derived, read-only views over the activity ledger.
//!
//! Nothing in here is persisted; streaks, levels, and the heatmap are
//! recomputed from ledger primitives on every query.

mod heatmap;
mod summary;

pub use heatmap::{heatmap, intensity, DayCell, Heatmap};
pub use summary::{current_streak, recent_points, summarize, PointsSummary};
