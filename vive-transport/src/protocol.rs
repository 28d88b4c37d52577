//! Vendor feature reports understood by the Vive hardware
//!
//! The display and dongle commands are opaque captures. They are sent
//! bit-exact and never built or patched at runtime.

use std::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Size of the HMD power reports (report ID included)
pub const POWER_REPORT_SIZE: usize = 64;

/// An immutable feature report with a known meaning
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct VendorCommand {
    /// Name used in logs
    pub name: &'static str,
    /// Wire bytes, report ID first
    pub bytes: &'static [u8],
}

impl VendorCommand {
    /// Report ID (first byte on the wire)
    pub fn report_id(&self) -> u8 {
        self.bytes.first().copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for VendorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} bytes, report 0x{:02x})",
            self.name,
            self.bytes.len(),
            self.report_id()
        )
    }
}

#[rustfmt::skip]
const POWER_ON_BYTES: [u8; POWER_REPORT_SIZE] = [
    0x04, 0x78, 0x29, 0x38, 0x08, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0xa8, 0x0d,
    0x76, 0x00, 0x40, 0xfc, 0x01, 0x05, 0xfa, 0xec,
    0xd1, 0x6d, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const POWER_OFF1_BYTES: [u8; POWER_REPORT_SIZE] = [
    0x04, 0x78, 0x29, 0x38, 0x08, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x30, 0x05,
    0x77, 0x00, 0x30, 0x05, 0x77, 0x00, 0x6c, 0x4d,
    0x37, 0x65, 0x40, 0xf9, 0x33, 0x00, 0x04, 0xf8,
    0xa3, 0x04, 0x04, 0x00, 0x00, 0x00, 0x70, 0xb0,
    0x72, 0x00, 0xf4, 0xf7, 0xa3, 0x04, 0x7c, 0xf8,
    0x33, 0x00, 0x0c, 0xf8, 0xa3, 0x04, 0x0a, 0x6e,
    0x29, 0x65, 0x24, 0xf9, 0x33, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
const POWER_OFF2_BYTES: [u8; POWER_REPORT_SIZE] = [
    0x04, 0x78, 0x29, 0x38, 0x08, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Report 0xFF, command 0x9F, length 4, payload "off!"
const CONTROLLER_POWER_OFF_BYTES: [u8; 7] = [0xff, 0x9f, 0x04, b'o', b'f', b'f', b'!'];

/// Turn the HMD display on
pub const DISPLAY_POWER_ON: VendorCommand = VendorCommand {
    name: "display power on",
    bytes: &POWER_ON_BYTES,
};

/// First half of the HMD display power-off sequence
pub const DISPLAY_POWER_OFF1: VendorCommand = VendorCommand {
    name: "display power off 1",
    bytes: &POWER_OFF1_BYTES,
};

/// Second half of the HMD display power-off sequence
pub const DISPLAY_POWER_OFF2: VendorCommand = VendorCommand {
    name: "display power off 2",
    bytes: &POWER_OFF2_BYTES,
};

/// Switch off any controller paired to the Watchman dongle
pub const CONTROLLER_POWER_OFF: VendorCommand = VendorCommand {
    name: "controller power off",
    bytes: &CONTROLLER_POWER_OFF_BYTES,
};

/// Controller command header fields
pub mod controller {
    /// Report ID of every controller command
    pub const REPORT_ID: u8 = 0xff;
    /// Haptic pulse
    pub const CMD_HAPTIC_PULSE: u8 = 0x8f;
    /// Power off
    pub const CMD_POWER_OFF: u8 = 0x9f;
}

/// Haptic pulse for a controller, sent through the dongle (10 bytes).
///
/// Header is report `0xFF`, command `0x8F`, length 7, then the seven
/// payload bytes. Multi-byte fields are little endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct HapticPulse {
    report_id: u8,
    command: u8,
    length: u8,
    motor: u8,
    pulse_high: [u8; 2],
    pulse_low: [u8; 2],
    repeat: [u8; 2],
}

impl HapticPulse {
    /// Payload length announced in the header
    pub const PAYLOAD_LEN: u8 = 7;

    pub fn new(motor: u8, pulse_high: u16, pulse_low: u16, repeat: u16) -> Self {
        Self {
            report_id: controller::REPORT_ID,
            command: controller::CMD_HAPTIC_PULSE,
            length: Self::PAYLOAD_LEN,
            motor,
            pulse_high: pulse_high.to_le_bytes(),
            pulse_low: pulse_low.to_le_bytes(),
            repeat: repeat.to_le_bytes(),
        }
    }

    pub fn motor(&self) -> u8 {
        self.motor
    }

    pub fn pulse_high(&self) -> u16 {
        u16::from_le_bytes(self.pulse_high)
    }

    pub fn pulse_low(&self) -> u16 {
        u16::from_le_bytes(self.pulse_low)
    }

    pub fn repeat(&self) -> u16 {
        u16::from_le_bytes(self.repeat)
    }
}

impl Default for HapticPulse {
    /// The single short buzz captured from the vendor runtime
    fn default() -> Self {
        Self::new(0, 0x01f4, 0xa2b5, 1)
    }
}
