//! HTC Vive driver: device listing and session opening

use std::sync::Arc;

use tracing::{debug, info};
use vive_transport::{HidApiBackend, HidBackend, HTC_ID, VIVE_HMD};

use crate::context::DriverContext;
use crate::descriptor::DeviceDescriptor;
use crate::error::HmdError;
use crate::host::{HmdDevice, HmdDriver};
use crate::session::{BringupOptions, Session};

/// Driver for every HTC Vive attached to the host
pub struct ViveDriver {
    backend: Box<dyn HidBackend>,
    ctx: Arc<DriverContext>,
    options: BringupOptions,
}

impl ViveDriver {
    /// Create a driver over any HID backend
    pub fn new(backend: Box<dyn HidBackend>) -> Self {
        Self {
            backend,
            ctx: Arc::new(DriverContext::new()),
            options: BringupOptions::default(),
        }
    }

    /// Create a driver over the system hidapi library
    pub fn with_hidapi() -> Result<Self, HmdError> {
        Ok(Self::new(Box::new(HidApiBackend::new()?)))
    }

    /// Replace the bring-up diagnostics options
    pub fn with_options(mut self, options: BringupOptions) -> Self {
        self.options = options;
        self
    }

    /// Context holding the last error message
    pub fn context(&self) -> &Arc<DriverContext> {
        &self.ctx
    }

    /// Open a session, keeping the concrete type
    pub fn open_session(&self, desc: &DeviceDescriptor) -> Result<Session, HmdError> {
        Session::open(
            self.backend.as_ref(),
            Arc::clone(&self.ctx),
            desc,
            &self.options,
        )
    }
}

impl HmdDriver for ViveDriver {
    /// One descriptor per HMD entry in the listing
    ///
    /// The HMD product exposes a single interface per headset, so entries
    /// are not grouped.
    fn device_list(&self) -> Result<Vec<DeviceDescriptor>, HmdError> {
        let entries = self.backend.enumerate(HTC_ID, VIVE_HMD)?;

        let devices: Vec<DeviceDescriptor> = entries
            .iter()
            .enumerate()
            .map(|(ordinal, entry)| {
                debug!("HMD {} at {}", ordinal, entry.path_lossy());
                DeviceDescriptor::for_ordinal(ordinal)
            })
            .collect();

        info!("Found {} HTC Vive devices", devices.len());
        Ok(devices)
    }

    fn open_device(&self, desc: &DeviceDescriptor) -> Result<Box<dyn HmdDevice>, HmdError> {
        Ok(Box::new(self.open_session(desc)?))
    }

    fn destroy(self: Box<Self>) {
        info!("Shutting down HTC Vive driver");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vive_transport::mock::{MockBackend, MockEntry};

    #[test]
    fn test_no_headsets() {
        let driver = ViveDriver::new(Box::new(MockBackend::new()));
        assert!(driver.device_list().unwrap().is_empty());
    }

    #[test]
    fn test_descriptor_paths_follow_listing_order() {
        let backend = MockBackend::new();
        for path in ["hmd-a", "hmd-b", "hmd-c"] {
            backend.add(HTC_ID, VIVE_HMD, MockEntry::new(path));
        }
        let driver = ViveDriver::new(Box::new(backend));
        let paths: Vec<_> = driver
            .device_list()
            .unwrap()
            .into_iter()
            .map(|d| d.path)
            .collect();
        assert_eq!(paths, ["0", "1", "2"]);
    }

    #[test]
    fn test_open_failure_sets_context_error() {
        let driver = ViveDriver::new(Box::new(MockBackend::new()));
        let result = driver.open_device(&DeviceDescriptor::for_ordinal(0));
        assert!(result.is_err());
        let msg = driver.context().last_error().unwrap();
        assert!(msg.contains("hmd"), "unexpected error: {msg}");
    }
}
