//! Activity history commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;

use super::{finish, open};

#[derive(Subcommand)]
pub enum ActivityAction {
    /// Daily activity in a trailing window
    Period {
        /// Trailing window in days
        #[arg(long, default_value = "7")]
        days: u32,
    },
    /// Activity for one calendar day
    Date {
        /// Day to look up (YYYY-MM-DD)
        date: NaiveDate,
    },
    /// Total points across all history
    Total,
}

pub fn run(action: ActivityAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = open()?;

    match action {
        ActivityAction::Period { days } => {
            let today = ctx.engine.clock().today();
            let recent: Vec<_> = ctx
                .engine
                .ledger()
                .activities_in_period(days, today)
                .collect();
            println!("{}", serde_json::to_string_pretty(&recent)?);
        }
        ActivityAction::Date { date } => match ctx.engine.ledger().activity_for_date(date) {
            Some(day) => println!("{}", serde_json::to_string_pretty(day)?),
            None => println!("No activity on {date}"),
        },
        ActivityAction::Total => {
            println!("{}", ctx.engine.ledger().total_points());
        }
    }

    finish(&mut ctx.engine);
    Ok(())
}
