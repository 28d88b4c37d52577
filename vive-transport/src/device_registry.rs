//! Device registry - USB ids and the channel layout of one Vive unit
//!
//! One physical Vive shows up as three USB devices. Two of them (the
//! lighthouse receiver and the Watchman dongle) expose two HID interfaces
//! each, and the platform lists one entry per interface, so every channel
//! is described by the interface ordinal within its device and the number
//! of interfaces each device contributes to the listing.

use std::fmt;

/// HTC vendor ID
pub const HTC_ID: u16 = 0x0bb4;
/// Vive HMD control interface
pub const VIVE_HMD: u16 = 0x2c87;

/// Valve vendor ID
pub const VALVE_ID: u16 = 0x28de;
/// Watchman wireless controller dongle
pub const VIVE_WATCHMAN_DONGLE: u16 = 0x2101;
/// Lighthouse FPGA receiver (IMU + light sensors)
pub const VIVE_LIGHTHOUSE_FPGA_RX: u16 = 0x2000;

/// The four channels a session needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelRole {
    /// HMD display/control interface
    Hmd,
    /// IMU interface of the lighthouse receiver
    Imu,
    /// Light sensor interface of the lighthouse receiver
    LighthouseSensor,
    /// Wireless controller dongle
    WatchmanDongle,
}

impl ChannelRole {
    /// Human readable name used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            ChannelRole::Hmd => "hmd",
            ChannelRole::Imu => "imu",
            ChannelRole::LighthouseSensor => "lighthouse sensor",
            ChannelRole::WatchmanDongle => "watchman dongle",
        }
    }
}

impl fmt::Display for ChannelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where to find one channel in the platform's HID listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSpec {
    pub role: ChannelRole,
    pub vid: u16,
    pub pid: u16,
    /// Interface ordinal within one physical device
    pub interface: usize,
    /// How many consecutive listing entries belong to one physical device
    pub interfaces_per_device: usize,
}

/// Channels opened during bring-up, in opening order
pub const BRINGUP_CHANNELS: [ChannelSpec; 4] = [
    ChannelSpec {
        role: ChannelRole::Hmd,
        vid: HTC_ID,
        pid: VIVE_HMD,
        interface: 0,
        interfaces_per_device: 1,
    },
    ChannelSpec {
        role: ChannelRole::Imu,
        vid: VALVE_ID,
        pid: VIVE_LIGHTHOUSE_FPGA_RX,
        interface: 0,
        interfaces_per_device: 2,
    },
    ChannelSpec {
        role: ChannelRole::LighthouseSensor,
        vid: VALVE_ID,
        pid: VIVE_LIGHTHOUSE_FPGA_RX,
        interface: 1,
        interfaces_per_device: 2,
    },
    ChannelSpec {
        role: ChannelRole::WatchmanDongle,
        vid: VALVE_ID,
        pid: VIVE_WATCHMAN_DONGLE,
        interface: 1,
        interfaces_per_device: 2,
    },
];
