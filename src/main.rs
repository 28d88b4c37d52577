//! HTC Vive Driver CLI
//!
//! Lists attached headsets and runs the bring-up and shutdown sequences
//! from the command line.

use clap::Parser;

mod cli;
use cli::{Cli, Commands};

mod commands;
mod config;
use config::DriverConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(DriverConfig::default_path);
    let config = DriverConfig::load(&config_path)?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command.unwrap_or(Commands::List { json: false }) {
        Commands::List { json } => commands::query::list(&config, json),
        Commands::Hid => commands::query::hid(),
        Commands::Open { index, hold } => commands::session::open(&config, index, hold),
        Commands::Haptic { index, repeat } => commands::session::haptic(&config, index, repeat),
        Commands::InitConfig { force } => commands::init_config(&config_path, force),
    }
}
