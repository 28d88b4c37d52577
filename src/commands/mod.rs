//! Command handlers for the CLI application.
//!
//! - `query`: read-only commands (list, hid)
//! - `session`: commands that bring a headset up (open, haptic)

pub mod query;
pub mod session;

use std::path::Path;

use anyhow::bail;
use vive_hmd::ViveDriver;

use crate::config::DriverConfig;

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Create a driver over hidapi with the configured bring-up options
pub fn open_driver(config: &DriverConfig) -> anyhow::Result<ViveDriver> {
    let driver = ViveDriver::with_hidapi()?.with_options(config.bringup_options());
    Ok(driver)
}

/// Write the default configuration
pub fn init_config(path: &Path, force: bool) -> CommandResult {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    DriverConfig::default().save(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
