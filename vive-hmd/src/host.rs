//! Host framework contract
//!
//! The host drives every device kind through these two traits without
//! knowing the concrete type behind them.

use crate::descriptor::DeviceDescriptor;
use crate::error::HmdError;
use crate::float_value::FloatValue;

/// A driver the host can list and open devices through
pub trait HmdDriver: Send + Sync {
    /// Descriptors for every device currently attached
    fn device_list(&self) -> Result<Vec<DeviceDescriptor>, HmdError>;

    /// Bring up the device a descriptor points at
    fn open_device(&self, desc: &DeviceDescriptor) -> Result<Box<dyn HmdDevice>, HmdError>;

    /// Release the driver
    fn destroy(self: Box<Self>);
}

/// An opened device
pub trait HmdDevice: Send + Sync {
    /// Descriptor the device was opened from
    fn descriptor(&self) -> &DeviceDescriptor;

    /// Write the value of `kind` into `out`
    fn get_float_value(&self, kind: FloatValue, out: &mut [f32]) -> Result<(), HmdError>;

    /// Shut the device down and release it
    fn close(self: Box<Self>);
}
