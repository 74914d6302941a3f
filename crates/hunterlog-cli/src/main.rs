use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "hunterlog-cli", version, about = "Hunterlog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit and quest management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Success rates, streaks, and trends
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Hunter profile: XP and ranks
    Status,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Status => commands::status::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
