//! Reset sweep commands.

use std::thread;
use std::time::Duration;

use clap::Subcommand;
use habitgrid_core::{Config, Event, HabitEngine};

use super::{finish, open};

#[derive(Subcommand)]
pub enum SweepAction {
    /// Sweep once and report what rolled over
    Run,
    /// Keep sweeping at the configured interval
    Watch {
        /// Seconds between sweeps (defaults to sweep.interval_secs)
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

pub fn run(action: SweepAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = open()?;

    match action {
        // The engine sweeps when it loads, so a one-shot run only has to
        // report what that sweep caught. This is the hook for cron.
        SweepAction::Run => {
            let resets = drain_resets(&mut ctx.engine);
            if resets.is_empty() {
                println!("Nothing to reset");
            } else {
                println!("{}", serde_json::to_string_pretty(&resets)?);
            }
        }
        SweepAction::Watch { interval_secs } => {
            let interval = interval_secs
                .unwrap_or_else(|| Config::load_or_default().sweep.interval_secs)
                .max(1);
            for reset in drain_resets(&mut ctx.engine) {
                println!("{}", serde_json::to_string_pretty(&reset)?);
            }
            loop {
                finish(&mut ctx.engine);
                thread::sleep(Duration::from_secs(interval));
                for reset in ctx.engine.run_sweep() {
                    println!("reset: {} ({})", reset.title, reset.frequency);
                }
                // Printed from the sweep's own return value, so the event
                // buffer can be dropped instead of growing unbounded.
                ctx.engine.take_events();
            }
        }
    }

    finish(&mut ctx.engine);
    Ok(())
}

fn drain_resets(engine: &mut HabitEngine) -> Vec<Event> {
    engine
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, Event::TaskReset { .. }))
        .collect()
}
