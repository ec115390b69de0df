use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod common;
mod runner;
mod shell;

#[derive(Parser)]
#[command(name = "quillfit-cli", version, about = "Quillfit CLI: poem timers and a 7-minute workout")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poem timers, drafts and saved poems
    Poem {
        #[command(subcommand)]
        action: commands::poem::PoemAction,
    },
    /// Run the 7-minute workout in the foreground
    Workout,
    /// Interactive session with every timer
    Session,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Poem { action } => commands::poem::run(action),
        Commands::Workout => commands::workout::run(),
        Commands::Session => commands::session::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
