use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "habitgrid", version, about = "Habitgrid CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Time tracking against a task
    Track {
        #[command(subcommand)]
        action: commands::track::TrackAction,
    },
    /// Activity history queries
    Activity {
        #[command(subcommand)]
        action: commands::activity::ActivityAction,
    },
    /// Points, streaks, and the contribution grid
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Roll over completed tasks whose period has ended
    Sweep {
        #[command(subcommand)]
        action: commands::sweep::SweepAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Clock override for exercising resets
    Debug {
        #[command(subcommand)]
        action: commands::debug::DebugAction,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate for
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Track { action } => commands::track::run(action),
        Commands::Activity { action } => commands::activity::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Sweep { action } => commands::sweep::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Debug { action } => commands::debug::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "habitgrid",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
