// CLI definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vive_driver")]
#[command(author, version, about = "HTC Vive HID bring-up driver")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path (default: ~/.config/vive-driver/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); overrides the config file
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List attached headsets as device descriptors
    #[command(visible_aliases = ["ls", "l"])]
    List {
        /// Print descriptors as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the raw HID listing grouped into devices and interfaces
    Hid,

    /// Bring up a headset, power the display on, then shut it down again
    #[command(visible_alias = "o")]
    Open {
        /// Headset index from `list`
        #[arg(default_value_t = 0)]
        index: usize,
        /// Keep the session open until Ctrl-C
        #[arg(long)]
        hold: bool,
    },

    /// Send a haptic pulse to a controller paired with the headset's dongle
    Haptic {
        /// Headset index from `list`
        #[arg(default_value_t = 0)]
        index: usize,
        /// Override the configured repeat count
        #[arg(long)]
        repeat: Option<u16>,
    },

    /// Write the default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_open_defaults_to_first_headset() {
        let cli = Cli::parse_from(["vive_driver", "open"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Open {
                index: 0,
                hold: false
            })
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "vive_driver",
            "haptic",
            "1",
            "--repeat",
            "4",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(
            cli.command,
            Some(Commands::Haptic {
                index: 1,
                repeat: Some(4)
            })
        ));
    }
}
