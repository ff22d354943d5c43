use clap::{Parser, Subcommand};
use devhub_core::Config;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "devhub", version, about = "DevTools Hub CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Countdown timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Task checklist
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Light/dark theme
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Logs go to stderr; `DEVHUB_LOG` overrides the configured level.
///
/// Config errors are reported once the subscriber is installed.
fn init_tracing() {
    let config = Config::load();
    let level = match &config {
        Ok(cfg) => cfg.log.level.clone(),
        Err(_) => Config::default().log.level,
    };
    let filter = EnvFilter::try_from_env("DEVHUB_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("devhub_core={level},devhub={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    if let Err(e) = config {
        warn!("using default config: {e}");
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Theme { action } => commands::theme::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
