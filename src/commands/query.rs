//! Read-only commands: list, hid

use vive_hmd::{HidApiBackend, HidBackend, HmdDriver};
use vive_transport::{select_interface, BRINGUP_CHANNELS};

use super::{open_driver, CommandResult};
use crate::config::DriverConfig;

/// List headsets as the host would see them
pub fn list(config: &DriverConfig, json: bool) -> CommandResult {
    let driver = open_driver(config)?;
    let devices = driver.device_list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    if devices.is_empty() {
        println!("No HTC Vive found");
        return Ok(());
    }

    for desc in &devices {
        println!(
            "  [{}] {} {} (driver: {}, rev {})",
            desc.path, desc.vendor, desc.product, desc.driver, desc.revision
        );
    }
    Ok(())
}

/// Show every interface bring-up would look at, with the position the
/// enumerator assigns it
pub fn hid() -> CommandResult {
    let backend = HidApiBackend::new()?;

    for spec in &BRINGUP_CHANNELS {
        let entries = backend.enumerate(spec.vid, spec.pid)?;
        println!(
            "{} ({:04x}:{:04x}, interface {} of {}): {} entries",
            spec.role,
            spec.vid,
            spec.pid,
            spec.interface,
            spec.interfaces_per_device,
            entries.len()
        );

        let per_device = spec.interfaces_per_device.max(1);
        for (i, entry) in entries.iter().enumerate() {
            let device = i / per_device;
            let marker = if select_interface(&entries, spec.interface, per_device, device)
                == Some(i)
            {
                "*"
            } else {
                " "
            };
            println!(
                "  {} device={} if={} usb_if={} path={}",
                marker,
                device,
                i % per_device,
                entry.interface_number,
                entry.path_lossy()
            );
        }
    }
    Ok(())
}
