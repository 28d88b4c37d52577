//! Driver configuration
//!
//! Stored as TOML. A missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vive_hmd::{BringupOptions, HapticPulse};

/// Bring-up diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BringupConfig {
    /// Log manufacturer/product/serial strings of the HMD
    pub dump_info_strings: bool,
    /// USB string descriptor indices to read from the HMD
    pub indexed_strings: Vec<i32>,
}

impl Default for BringupConfig {
    fn default() -> Self {
        let options = BringupOptions::default();
        Self {
            dump_info_strings: options.dump_info_strings,
            indexed_strings: options.indexed_strings,
        }
    }
}

/// Haptic pulse parameters for the `haptic` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HapticConfig {
    pub motor: u8,
    pub pulse_high: u16,
    pub pulse_low: u16,
    pub repeat: u16,
}

impl Default for HapticConfig {
    fn default() -> Self {
        let pulse = HapticPulse::default();
        Self {
            motor: pulse.motor(),
            pulse_high: pulse.pulse_high(),
            pulse_low: pulse.pulse_low(),
            repeat: pulse.repeat(),
        }
    }
}

/// Complete driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Log level used when RUST_LOG is unset
    pub log_level: String,
    pub bringup: BringupConfig,
    pub haptic: HapticConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            bringup: BringupConfig::default(),
            haptic: HapticConfig::default(),
        }
    }
}

impl DriverConfig {
    /// Default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vive-driver")
            .join("config.toml")
    }

    /// Load from file, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: DriverConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to file, creating parent directories
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn bringup_options(&self) -> BringupOptions {
        BringupOptions {
            dump_info_strings: self.bringup.dump_info_strings,
            indexed_strings: self.bringup.indexed_strings.clone(),
        }
    }

    pub fn haptic_pulse(&self, repeat: Option<u16>) -> HapticPulse {
        HapticPulse::new(
            self.haptic.motor,
            self.haptic.pulse_high,
            self.haptic.pulse_low,
            repeat.unwrap_or(self.haptic.repeat),
        )
    }
}
