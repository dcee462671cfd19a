//! Measurement units and canonical-magnitude conversion.
//!
//! Targets and progress are stored as a single canonical `i64`: seconds for
//! the time-based units, the raw value for everything else. Conversion
//! happens once at the edge (task creation, progress submission); all
//! arithmetic downstream compares canonical magnitudes directly.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Unit a task's target is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Seconds,
    Minutes,
    Hours,
    Count,
    Pages,
    Kilometers,
}

impl Unit {
    /// Convert a value expressed in this unit to its canonical magnitude.
    pub fn to_canonical(self, value: i64) -> i64 {
        match self {
            Unit::Minutes => value.saturating_mul(60),
            Unit::Hours => value.saturating_mul(3600),
            _ => value,
        }
    }

    /// Whether the canonical magnitude counts seconds.
    pub fn is_time(self) -> bool {
        matches!(self, Unit::Seconds | Unit::Minutes | Unit::Hours)
    }

    /// Render a canonical magnitude for display.
    ///
    /// Time values cascade down to the largest denomination that is
    /// non-zero ("2m 5s", "1h 1m 11s", but "45s" for sub-minute values);
    /// other units get a plain suffix.
    pub fn format_value(self, canonical: i64) -> String {
        let v = canonical.unsigned_abs();
        let body = match self {
            Unit::Seconds => format!("{v}s"),
            Unit::Minutes => format_minutes(v),
            Unit::Hours => {
                let h = v / 3600;
                if h == 0 {
                    format_minutes(v)
                } else {
                    let m = (v % 3600) / 60;
                    let s = v % 60;
                    match (m, s) {
                        (0, 0) => format!("{h}h"),
                        (_, 0) => format!("{h}h {m}m"),
                        _ => format!("{h}h {m}m {s}s"),
                    }
                }
            }
            Unit::Count => format!("{v}x"),
            Unit::Pages => format!("{v} pages"),
            Unit::Kilometers => format!("{v}km"),
        };
        if canonical < 0 {
            format!("-{body}")
        } else {
            body
        }
    }
}

fn format_minutes(v: u64) -> String {
    let m = v / 60;
    let s = v % 60;
    if m == 0 {
        format!("{s}s")
    } else if s == 0 {
        format!("{m}m")
    } else {
        format!("{m}m {s}s")
    }
}

/// Render an epoch-millis stamp as local `YYYY/MM/DD HH:MM`, or `-` when
/// the stamp is unrepresentable.
pub fn format_date_time(epoch_ms: i64) -> String {
    match Local.timestamp_millis_opt(epoch_ms).single() {
        Some(at) => at.format("%Y/%m/%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Unit::Seconds => "seconds",
            Unit::Minutes => "minutes",
            Unit::Hours => "hours",
            Unit::Count => "count",
            Unit::Pages => "pages",
            Unit::Kilometers => "kilometers",
        };
        f.write_str(label)
    }
}

impl FromStr for Unit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seconds" | "secs" | "s" => Ok(Unit::Seconds),
            "minutes" | "mins" | "m" => Ok(Unit::Minutes),
            "hours" | "hrs" | "h" => Ok(Unit::Hours),
            "count" | "times" | "x" => Ok(Unit::Count),
            "pages" | "page" => Ok(Unit::Pages),
            "kilometers" | "km" => Ok(Unit::Kilometers),
            other => Err(ValidationError::UnknownLabel {
                what: "unit",
                value: other.to_string(),
            }),
        }
    }
}
