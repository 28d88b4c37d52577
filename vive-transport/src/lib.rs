//! HID transport layer for the HTC Vive
//!
//! The Vive exposes several USB devices that share vendor and product ids:
//!
//! - the HMD control interface (HTC)
//! - the lighthouse FPGA receiver, with an IMU and a sensor interface (Valve)
//! - the Watchman wireless controller dongle (Valve)
//!
//! This crate finds the right interface among them, opens it as a
//! non-blocking [`DeviceChannel`] and carries the fixed vendor feature
//! reports the hardware understands.

pub mod backend;
pub mod channel;
pub mod device_registry;
pub mod enumerator;
pub mod error;
pub mod protocol;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use backend::{HidApiBackend, HidBackend, HidChannel, HidEntry};
pub use channel::DeviceChannel;
pub use device_registry::{
    ChannelRole, ChannelSpec, BRINGUP_CHANNELS, HTC_ID, VALVE_ID, VIVE_HMD,
    VIVE_LIGHTHOUSE_FPGA_RX, VIVE_WATCHMAN_DONGLE,
};
pub use enumerator::{find_interface, select_interface};
pub use error::TransportError;
pub use protocol::{HapticPulse, VendorCommand};
