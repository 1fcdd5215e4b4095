//! Imagetrack CLI - scenario replay and configuration tools

#![warn(missing_docs)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{check, replay};

#[derive(Parser)]
#[command(name = "imagetrack")]
#[command(about = "Image-target tracking tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, env = "IMAGETRACK_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded scenario through a tracking session
    Replay {
        /// Path to the scenario JSON file
        scenario: PathBuf,

        /// Print one JSON document instead of a per-tick summary
        #[arg(long)]
        json: bool,
    },

    /// Parse and validate a configuration file
    CheckConfig {
        /// Path to the configuration file (.toml or .json)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Replay { scenario, json } => {
            let config = config::load_config(cli.config)?;
            replay::replay(&config, &scenario, json)?;
        }
        Commands::CheckConfig { file } => {
            check::check_config(&file)?;
        }
    }

    Ok(())
}
