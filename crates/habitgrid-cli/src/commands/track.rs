//! Time-tracking commands for CLI.

use clap::Subcommand;
use habitgrid_core::format_date_time;

use super::{finish, open};

#[derive(Subcommand)]
pub enum TrackAction {
    /// Start tracking time against a task
    Start {
        /// Task ID (must have a time-based unit)
        id: String,
    },
    /// Stop tracking and log the elapsed time as progress
    Stop,
    /// Print the running session, if any
    Status,
}

pub fn run(action: TrackAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = open()?;

    match action {
        TrackAction::Start { id } => {
            let session = ctx.engine.start_session(&id)?;
            let title = ctx
                .engine
                .task(&session.task_id)
                .map(|t| t.title.clone())
                .unwrap_or_default();
            println!("Tracking '{title}'");
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        TrackAction::Stop => match ctx.engine.stop_session() {
            Some(outcome) => {
                println!("Stopped after {}s", outcome.elapsed_seconds);
                for event in ctx.engine.take_events() {
                    println!("{}", serde_json::to_string_pretty(&event)?);
                }
            }
            None => println!("No session running"),
        },
        TrackAction::Status => match ctx.engine.active_session() {
            Some(session) => {
                println!("Tracking since {}", format_date_time(session.started_at));
                let status = serde_json::json!({
                    "taskId": session.task_id,
                    "startedAt": session.started_at,
                    "elapsedSeconds": session.elapsed_seconds(ctx.engine.clock()),
                });
                println!("{}", serde_json::to_string_pretty(&status)?);
            }
            None => println!("No session running"),
        },
    }

    finish(&mut ctx.engine);
    Ok(())
}
