//! Opened, non-blocking HID channels

use std::fmt;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::backend::HidChannel;
use crate::device_registry::ChannelRole;
use crate::error::TransportError;
use crate::protocol::VendorCommand;

/// One opened HID interface with the role it plays in a session
///
/// The handle is closed when the channel is dropped.
pub struct DeviceChannel {
    role: ChannelRole,
    path: String,
    device: Mutex<Box<dyn HidChannel>>,
}

impl DeviceChannel {
    pub fn new(role: ChannelRole, path: String, device: Box<dyn HidChannel>) -> Self {
        Self {
            role,
            path,
            device: Mutex::new(device),
        }
    }

    pub fn role(&self) -> ChannelRole {
        self.role
    }

    /// Platform path this channel was opened from
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Put the channel into non-blocking mode
    ///
    /// Failure is final; the caller is expected to abandon the channel.
    pub fn configure(&self) -> Result<(), TransportError> {
        self.device.lock().set_blocking_mode(false)?;
        debug!("{} set to non-blocking", self.role);
        Ok(())
    }

    /// Send a feature report
    pub fn send_feature_report(
        &self,
        name: &'static str,
        data: &[u8],
    ) -> Result<(), TransportError> {
        debug!("Sending {} on {}: {:02x?}", name, self.role, data);
        self.device
            .lock()
            .send_feature_report(data)
            .map_err(|e| TransportError::SendFailed {
                command: name,
                reason: e.to_string(),
            })
    }

    /// Send one of the fixed vendor commands
    pub fn send_command(&self, command: &VendorCommand) -> Result<(), TransportError> {
        self.send_feature_report(command.name, command.bytes)
    }

    /// Send a vendor command whose outcome only matters for the log
    pub fn send_best_effort(&self, command: &VendorCommand) -> bool {
        match self.send_command(command) {
            Ok(()) => {
                debug!("{}: ok", command.name);
                true
            }
            Err(e) => {
                warn!("{} on {} failed: {}", command.name, self.role, e);
                false
            }
        }
    }

    pub fn manufacturer_string(&self) -> Result<Option<String>, TransportError> {
        self.device.lock().get_manufacturer_string()
    }

    pub fn product_string(&self) -> Result<Option<String>, TransportError> {
        self.device.lock().get_product_string()
    }

    pub fn serial_number_string(&self) -> Result<Option<String>, TransportError> {
        self.device.lock().get_serial_number_string()
    }

    pub fn indexed_string(&self, index: i32) -> Result<Option<String>, TransportError> {
        self.device.lock().get_indexed_string(index)
    }
}

impl fmt::Debug for DeviceChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceChannel")
            .field("role", &self.role)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Drop for DeviceChannel {
    fn drop(&mut self) {
        debug!("Closing {} channel ({})", self.role, self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBackend, MockEntry};
    use crate::protocol::CONTROLLER_POWER_OFF;
    use crate::HidBackend;

    fn open_one(backend: &MockBackend) -> DeviceChannel {
        let entry = backend.enumerate(0x1234, 0x5678).unwrap().remove(0);
        let dev = backend.open_path(&entry).unwrap();
        DeviceChannel::new(ChannelRole::Hmd, entry.path_lossy(), dev)
    }

    #[test]
    fn test_configure_sets_non_blocking() {
        let backend = MockBackend::new();
        backend.add(0x1234, 0x5678, MockEntry::new("a"));
        let channel = open_one(&backend);
        channel.configure().unwrap();
        assert_eq!(backend.log().non_blocking, vec!["a".to_string()]);
    }

    #[test]
    fn test_configure_failure_is_reported() {
        let backend = MockBackend::new();
        backend.add(0x1234, 0x5678, MockEntry::new("a").fail_non_blocking());
        let channel = open_one(&backend);
        let err = channel.configure().unwrap_err();
        assert!(matches!(err, TransportError::HidError(_)));
        assert_eq!(err.to_string(), "HID error: hid_set_nonblocking failed");
    }

    #[test]
    fn test_send_best_effort_swallows_errors() {
        let backend = MockBackend::new();
        backend.add(0x1234, 0x5678, MockEntry::new("a").fail_reports());
        let channel = open_one(&backend);
        assert!(!channel.send_best_effort(&CONTROLLER_POWER_OFF));
        assert!(backend.log().reports.is_empty());
    }

    #[test]
    fn test_drop_closes_handle() {
        let backend = MockBackend::new();
        backend.add(0x1234, 0x5678, MockEntry::new("a"));
        let channel = open_one(&backend);
        assert_eq!(backend.open_count(), 1);
        drop(channel);
        assert_eq!(backend.open_count(), 0);
        assert_eq!(backend.log().closed, vec!["a".to_string()]);
    }
}
