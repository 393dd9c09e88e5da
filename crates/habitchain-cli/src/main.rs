use clap::{Parser, Subcommand};
use habitchain_core::streak::MAX_HISTORY_DAYS;
use habitchain_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "habitchain", version, about = "Habitchain CLI")]
struct Cli {
    /// Evaluate as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE")]
    today: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Edit a single day of a habit
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Streak information
    Streak {
        /// Habit ID
        id: Option<String>,
        /// Every habit, ranked by current streak
        #[arg(long)]
        all: bool,
    },
    /// Recent day states of a habit
    History {
        /// Habit ID
        id: String,
        /// Number of days to show (default from display.history_days)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_HISTORY_DAYS as i64))]
        days: Option<u32>,
    },
    /// Profile settings
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log.level.as_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&Config::load_or_default());

    let result = common::clock(cli.today.as_deref()).and_then(|clock| match cli.command {
        Commands::Habit { action } => commands::habit::run(action, &clock),
        Commands::Day { action } => commands::day::run(action, &clock),
        Commands::Streak { id, all } => commands::streak::run(id.as_deref(), all, &clock),
        Commands::History { id, days } => commands::history::run(&id, days, &clock),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Config { action } => commands::config::run(action),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
