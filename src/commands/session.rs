//! Commands that bring a headset up: open, haptic

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use vive_hmd::{DeviceDescriptor, FloatValue, HmdDevice, Session};
use vive_transport::BRINGUP_CHANNELS;

use super::{open_driver, CommandResult};
use crate::config::DriverConfig;

fn bring_up(config: &DriverConfig, index: usize) -> anyhow::Result<Session> {
    let driver = open_driver(config)?;
    driver
        .open_session(&DeviceDescriptor::for_ordinal(index))
        .with_context(|| format!("failed to open HTC Vive {index}"))
}

fn print_float(session: &Session, kind: FloatValue) {
    let mut out = vec![0.0f32; kind.value_count()];
    match session.get_float_value(kind, &mut out) {
        Ok(()) => println!("  {kind}: {out:?}"),
        Err(e) => println!("  {kind}: {e}"),
    }
}

/// Bring a headset up, print what we know about it, then close it
pub fn open(config: &DriverConfig, index: usize, hold: bool) -> CommandResult {
    let session = bring_up(config, index)?;

    let desc = session.descriptor();
    println!("{} {} (path {})", desc.vendor, desc.product, desc.path);
    for spec in &BRINGUP_CHANNELS {
        println!("  {}: {}", spec.role, session.channel(spec.role).path());
    }

    let info = session.info();
    println!(
        "  manufacturer: {}",
        info.manufacturer.as_deref().unwrap_or("?")
    );
    println!("  product: {}", info.product.as_deref().unwrap_or("?"));
    println!("  serial: {}", info.serial_number.as_deref().unwrap_or("?"));
    for (idx, value) in &info.indexed {
        println!("  string 0x{idx:02x}: {value}");
    }
    for kind in [
        FloatValue::RotationQuat,
        FloatValue::PositionVector,
        FloatValue::DistortionK,
    ] {
        print_float(&session, kind);
    }

    if hold {
        let running = Arc::new(AtomicBool::new(true));
        let r = running.clone();
        ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))?;

        println!("Display on. Press Ctrl-C to power off.");
        while running.load(Ordering::SeqCst) {
            std::thread::sleep(Duration::from_millis(100));
        }
    }

    session.close();
    info!("Session closed");
    Ok(())
}

/// Pulse a controller through the dongle
pub fn haptic(config: &DriverConfig, index: usize, repeat: Option<u16>) -> CommandResult {
    let session = bring_up(config, index)?;
    let pulse = config.haptic_pulse(repeat);

    let result = session.haptic_pulse(&pulse);
    session.close();
    result?;

    println!(
        "Sent haptic pulse (motor {}, high {}, low {}, repeat {})",
        pulse.motor(),
        pulse.pulse_high(),
        pulse.pulse_low(),
        pulse.repeat()
    );
    Ok(())
}
