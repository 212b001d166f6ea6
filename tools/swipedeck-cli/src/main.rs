//! SwipeDeck CLI: command-line interface for decks and gesture traces.
//!
//! Usage:
//!   swipedeck init [OPTIONS]             Write the sample deck and a demo trace
//!   swipedeck info <DECK>                Show deck contents
//!   swipedeck classify --dx <X> --dy <Y> Classify a single release
//!   swipedeck replay <DECK> <TRACE>      Replay a touch trace against a deck
//!   swipedeck config                     Show the effective configuration

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use swipedeck_common::config::{config_file_path, AppConfig};
use swipedeck_common::error::SwipedeckError;

mod commands;

#[derive(Parser)]
#[command(
    name = "swipedeck",
    about = "Swipe through activity decks from recorded touch traces",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/swipedeck/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the sample deck and a demo touch trace
    Init {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Show deck contents
    Info {
        /// Path to deck.json
        deck: PathBuf,
    },

    /// Classify a single release displacement
    Classify {
        /// Horizontal displacement in points (positive = right)
        #[arg(long, allow_hyphen_values = true)]
        dx: f64,

        /// Vertical displacement in points (negative = up)
        #[arg(long, allow_hyphen_values = true)]
        dy: f64,
    },

    /// Replay a touch trace against a deck
    Replay {
        /// Path to deck.json
        deck: PathBuf,

        /// Path to the JSONL touch trace
        trace: PathBuf,

        /// Write committed decisions to this JSONL file
        #[arg(short, long)]
        log: Option<PathBuf>,

        /// Pace events and animations in real time
        #[arg(long)]
        realtime: bool,
    },

    /// Show the effective configuration
    Config {
        /// Save the effective configuration to the standard location
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, load_error) = load_config(cli.config.as_deref(), &config_file_path())?;

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    swipedeck_common::logging::init_logging(&logging);

    if let Some(e) = load_error {
        tracing::warn!("Failed to load config at {:?}, using defaults: {}", config_file_path(), e);
    }

    match cli.command {
        Commands::Init { output } => commands::init::run(output, &config),
        Commands::Info { deck } => commands::info::run(deck),
        Commands::Classify { dx, dy } => commands::classify::run(dx, dy, &config),
        Commands::Replay {
            deck,
            trace,
            log,
            realtime,
        } => commands::replay::run(deck, trace, log, realtime, config).await,
        Commands::Config { write } => commands::config::run(write, &config),
    }
}

/// Resolve the effective config before logging is initialized.
///
/// An explicit `--config` must load. A broken file at the standard
/// location falls back to defaults; the error is handed back so it can be
/// logged once a subscriber exists.
fn load_config(
    explicit: Option<&Path>,
    standard: &Path,
) -> anyhow::Result<(AppConfig, Option<SwipedeckError>)> {
    if let Some(path) = explicit {
        let config = AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?;
        return Ok((config, None));
    }

    match AppConfig::try_load_at(standard) {
        Ok(config) => Ok((config.unwrap_or_default(), None)),
        Err(e) => Ok((AppConfig::default(), Some(e))),
    }
}
