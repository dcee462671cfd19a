//! Debug clock commands.
//!
//! The override is persisted, so a frozen clock stays frozen across
//! invocations until released. Every change sweeps immediately, so a jump
//! across midnight shows its rollovers in the same command.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use clap::Subcommand;
use habitgrid_core::HabitEngine;

use super::{finish, open};

#[derive(Subcommand)]
pub enum DebugAction {
    /// Freeze the clock at a given local time
    Freeze {
        /// "YYYY-MM-DD", "YYYY-MM-DD HH:MM", or RFC 3339
        when: String,
    },
    /// Shift the frozen clock (freezes first when running on real time)
    Advance {
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        days: i64,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        hours: i64,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        minutes: i64,
    },
    /// Drop the override and return to real time
    Release,
    /// Show the effective clock
    Status,
}

pub fn run(action: DebugAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = open()?;

    match action {
        DebugAction::Freeze { when } => {
            let at = parse_when(&when)?;
            ctx.clock.freeze(at);
            ctx.clock.persist(ctx.store.as_ref())?;
            report_sweep(&mut ctx.engine);
            println!("clock frozen at {}", at.to_rfc3339());
        }
        DebugAction::Advance {
            days,
            hours,
            minutes,
        } => {
            ctx.clock
                .advance(Duration::days(days) + Duration::hours(hours) + Duration::minutes(minutes));
            ctx.clock.persist(ctx.store.as_ref())?;
            report_sweep(&mut ctx.engine);
            print_status(ctx.clock.override_time());
        }
        DebugAction::Release => {
            ctx.clock.release();
            ctx.clock.persist(ctx.store.as_ref())?;
            print_status(None);
        }
        DebugAction::Status => print_status(ctx.clock.override_time()),
    }

    finish(&mut ctx.engine);
    Ok(())
}

fn report_sweep(engine: &mut HabitEngine) {
    for reset in engine.run_sweep() {
        println!("reset: {} ({})", reset.title, reset.frequency);
    }
}

fn print_status(override_time: Option<DateTime<Local>>) {
    match override_time {
        Some(at) => println!("clock frozen at {}", at.to_rfc3339()),
        None => println!("clock running on real time"),
    }
}

fn parse_when(s: &str) -> Result<DateTime<Local>, Box<dyn std::error::Error>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Ok(at.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|_| format!("cannot parse '{s}' as a local time"))?;
    naive
        .and_local_timezone(Local)
        .earliest()
        .ok_or_else(|| format!("'{s}' does not exist in the local timezone").into())
}
