//! HTC Vive driver for a host device framework
//!
//! [`ViveDriver`] publishes one [`DeviceDescriptor`] per attached headset
//! and opens a [`Session`] for a selected descriptor. A session owns the
//! four HID channels one headset needs and powers the display on; closing
//! it powers the display off again.
//!
//! No tracking happens here. The pose queries answer with identity values.

pub mod context;
pub mod descriptor;
pub mod driver;
pub mod error;
pub mod float_value;
pub mod host;
pub mod session;

pub use context::DriverContext;
pub use descriptor::DeviceDescriptor;
pub use driver::ViveDriver;
pub use error::HmdError;
pub use float_value::FloatValue;
pub use host::{HmdDevice, HmdDriver};
pub use session::{BringupOptions, HmdInfo, Session};

// Re-export what callers need to pick a backend or pulse a controller
pub use vive_transport::{HapticPulse, HidApiBackend, HidBackend};
