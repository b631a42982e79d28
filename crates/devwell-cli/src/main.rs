use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "devwell-cli", version, about = "DevWell CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current wellness state
    Status,
    /// Sensor input and the periodic tick
    Activity {
        #[command(subcommand)]
        action: commands::activity::ActivityAction,
    },
    /// Break lifecycle
    Break {
        #[command(subcommand)]
        action: commands::breaks::BreakAction,
    },
    /// Stress tracking
    Stress {
        #[command(subcommand)]
        action: commands::stress::StressAction,
    },
    /// Account and onboarding
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status => commands::status::run(),
        Commands::Activity { action } => commands::activity::run(action),
        Commands::Break { action } => commands::breaks::run(action),
        Commands::Stress { action } => commands::stress::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
