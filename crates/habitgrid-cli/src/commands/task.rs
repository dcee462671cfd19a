//! Task management commands for CLI.

use clap::Subcommand;
use habitgrid_core::{Frequency, NewTask, Unit};

use super::{finish, open};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// How often the task recurs: daily, weekly, or monthly
        #[arg(long, default_value = "daily")]
        frequency: Frequency,
        /// Unit the target is declared in (minutes, hours, count, pages, km)
        #[arg(long, default_value = "minutes")]
        unit: Unit,
        /// Target amount per period, in the declared unit
        #[arg(long)]
        target: i64,
    },
    /// List tasks
    List,
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Mark a task completed without logging exact progress
    Complete {
        /// Task ID
        id: String,
    },
    /// Log progress in the task's declared unit
    Log {
        /// Task ID
        id: String,
        /// Amount done, in the task's declared unit
        amount: i64,
    },
    /// Delete a task (its activity history is kept)
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = open()?;

    match action {
        TaskAction::Add {
            title,
            frequency,
            unit,
            target,
        } => {
            let task = ctx.engine.add_task(NewTask {
                title,
                frequency,
                unit,
                target,
            })?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List => {
            println!("{}", serde_json::to_string_pretty(ctx.engine.tasks())?);
        }
        TaskAction::Get { id } => match ctx.engine.task(&id) {
            Some(task) => println!("{}", serde_json::to_string_pretty(task)?),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Complete { id } => match ctx.engine.complete_task(&id) {
            Some(0) => println!("Already completed this period"),
            Some(points) => println!("Completed (+{points} pts)"),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Log { id, amount } => {
            let Some(unit) = ctx.engine.task(&id).map(|t| t.unit) else {
                println!("Task not found: {id}");
                return Ok(());
            };
            let delta = unit.to_canonical(amount);
            if let Some(outcome) = ctx.engine.submit_progress(&id, delta) {
                if outcome.points_awarded > 0 {
                    println!(
                        "Logged {} (+{} pts)",
                        unit.format_value(delta),
                        outcome.points_awarded
                    );
                } else {
                    println!("Logged {}", unit.format_value(delta));
                }
                if let Some(task) = ctx.engine.task(&id) {
                    println!("{}", serde_json::to_string_pretty(task)?);
                }
            }
        }
        TaskAction::Delete { id } => match ctx.engine.delete_task(&id) {
            Some(task) => println!("Task deleted: {} ({})", task.id, task.title),
            None => println!("Task not found: {id}"),
        },
    }

    finish(&mut ctx.engine);
    Ok(())
}
