//! Stats commands for CLI.

use clap::Subcommand;
use habitgrid_core::{heatmap, summarize, Config, Heatmap};

use super::{finish, open};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Points, level, and streak summary
    Summary,
    /// Contribution-style activity grid
    Heatmap {
        /// Days to include (defaults to stats.heatmap_days)
        #[arg(long)]
        days: Option<u32>,
        /// Emit the grid as JSON instead of drawing it
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = open()?;
    let config = Config::load_or_default();
    let today = ctx.engine.clock().today();

    match action {
        StatsAction::Summary => {
            let summary = summarize(
                ctx.engine.ledger(),
                today,
                config.stats.streak_lookback_days,
                config.stats.recent_window_days,
            );
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::Heatmap { days, json } => {
            let days = days.unwrap_or(config.stats.heatmap_days);
            let grid = heatmap(ctx.engine.ledger(), today, days);
            if json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                print!("{}", render_grid(&grid));
            }
        }
    }

    finish(&mut ctx.engine);
    Ok(())
}

/// One line per weekday, one column per week, oldest week first.
fn render_grid(grid: &Heatmap) -> String {
    const GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];
    const LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

    let mut out = String::new();
    for (row, label) in LABELS.iter().enumerate() {
        out.push_str(label);
        out.push(' ');
        for week in &grid.weeks {
            out.push(match &week[row] {
                Some(cell) => GLYPHS[usize::from(cell.intensity.min(4))],
                None => ' ',
            });
        }
        out.push('\n');
    }
    out
}
