//! In-memory HID backend
//!
//! Records every open, close, mode change and feature report so tests can
//! check the exact sequence the bring-up code produced.

use std::collections::HashMap;
use std::ffi::CString;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::{HidBackend, HidChannel, HidEntry};
use crate::error::TransportError;

/// A fake interface in the listing
#[derive(Debug, Clone, Default)]
pub struct MockEntry {
    path: String,
    interface_number: i32,
    fail_open: bool,
    fail_non_blocking: bool,
    fail_reports: bool,
    manufacturer: Option<String>,
    product: Option<String>,
    serial: Option<String>,
    indexed: HashMap<i32, String>,
}

impl MockEntry {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            interface_number: -1,
            ..Default::default()
        }
    }

    /// USB interface number reported in the listing (-1 when unset)
    pub fn with_interface(mut self, interface_number: i32) -> Self {
        self.interface_number = interface_number;
        self
    }

    /// Opening this interface fails
    pub fn fail_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Switching to non-blocking fails
    pub fn fail_non_blocking(mut self) -> Self {
        self.fail_non_blocking = true;
        self
    }

    /// Every feature report is rejected
    pub fn fail_reports(mut self) -> Self {
        self.fail_reports = true;
        self
    }

    pub fn with_strings(mut self, manufacturer: &str, product: &str, serial: &str) -> Self {
        self.manufacturer = Some(manufacturer.to_string());
        self.product = Some(product.to_string());
        self.serial = Some(serial.to_string());
        self
    }

    pub fn with_indexed_string(mut self, index: i32, value: &str) -> Self {
        self.indexed.insert(index, value.to_string());
        self
    }
}

/// Everything the backend saw, in order
#[derive(Debug, Clone, Default)]
pub struct MockLog {
    pub enumerations: Vec<(u16, u16)>,
    pub opened: Vec<String>,
    pub closed: Vec<String>,
    pub non_blocking: Vec<String>,
    /// (path, bytes) of each delivered feature report
    pub reports: Vec<(String, Vec<u8>)>,
}

/// Fake platform listing
#[derive(Default)]
pub struct MockBackend {
    devices: Mutex<Vec<(u16, u16, MockEntry)>>,
    log: Arc<Mutex<MockLog>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interface to the listing
    pub fn add(&self, vid: u16, pid: u16, entry: MockEntry) {
        self.devices.lock().push((vid, pid, entry));
    }

    /// Snapshot of the recorded activity
    pub fn log(&self) -> MockLog {
        self.log.lock().clone()
    }

    /// Handles currently open
    pub fn open_count(&self) -> usize {
        let log = self.log.lock();
        log.opened.len() - log.closed.len()
    }

    /// Feature reports delivered to one path
    pub fn reports_to(&self, path: &str) -> Vec<Vec<u8>> {
        self.log
            .lock()
            .reports
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, bytes)| bytes.clone())
            .collect()
    }
}

impl HidBackend for MockBackend {
    fn enumerate(&self, vid: u16, pid: u16) -> Result<Vec<HidEntry>, TransportError> {
        self.log.lock().enumerations.push((vid, pid));
        self.devices
            .lock()
            .iter()
            .filter(|(v, p, _)| *v == vid && *p == pid)
            .map(|(v, p, entry)| -> Result<HidEntry, TransportError> {
                let path = CString::new(entry.path.clone())
                    .map_err(|e| TransportError::Internal(e.to_string()))?;
                Ok(HidEntry {
                    path,
                    vendor_id: *v,
                    product_id: *p,
                    interface_number: entry.interface_number,
                    serial_number: entry.serial.clone(),
                    product_string: entry.product.clone(),
                })
            })
            .collect()
    }

    fn open_path(&self, entry: &HidEntry) -> Result<Box<dyn HidChannel>, TransportError> {
        let path = entry.path_lossy();
        let found = self
            .devices
            .lock()
            .iter()
            .find(|(_, _, e)| e.path == path)
            .map(|(_, _, e)| e.clone())
            .ok_or_else(|| TransportError::DeviceNotFound(path.clone()))?;

        if found.fail_open {
            return Err(TransportError::HidError(format!("cannot open {path}")));
        }

        self.log.lock().opened.push(path);
        Ok(Box::new(MockChannel {
            entry: found,
            log: Arc::clone(&self.log),
        }))
    }
}

struct MockChannel {
    entry: MockEntry,
    log: Arc<Mutex<MockLog>>,
}

impl HidChannel for MockChannel {
    fn set_blocking_mode(&self, blocking: bool) -> Result<(), TransportError> {
        if self.entry.fail_non_blocking {
            return Err(TransportError::HidError("hid_set_nonblocking failed".into()));
        }
        if !blocking {
            self.log.lock().non_blocking.push(self.entry.path.clone());
        }
        Ok(())
    }

    fn send_feature_report(&self, data: &[u8]) -> Result<(), TransportError> {
        if self.entry.fail_reports {
            return Err(TransportError::HidError("report rejected".into()));
        }
        self.log
            .lock()
            .reports
            .push((self.entry.path.clone(), data.to_vec()));
        Ok(())
    }

    fn get_manufacturer_string(&self) -> Result<Option<String>, TransportError> {
        Ok(self.entry.manufacturer.clone())
    }

    fn get_product_string(&self) -> Result<Option<String>, TransportError> {
        Ok(self.entry.product.clone())
    }

    fn get_serial_number_string(&self) -> Result<Option<String>, TransportError> {
        Ok(self.entry.serial.clone())
    }

    fn get_indexed_string(&self, index: i32) -> Result<Option<String>, TransportError> {
        Ok(self.entry.indexed.get(&index).cloned())
    }
}

impl Drop for MockChannel {
    fn drop(&mut self) {
        self.log.lock().closed.push(self.entry.path.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerate_reports_interface_number() {
        let backend = MockBackend::new();
        backend.add(0x28de, 0x2000, MockEntry::new("imu"));
        backend.add(0x28de, 0x2000, MockEntry::new("sensor").with_interface(1));
        backend.add(0x28de, 0x2101, MockEntry::new("dongle").with_interface(0));

        let entries = backend.enumerate(0x28de, 0x2000).unwrap();
        let numbers: Vec<_> = entries.iter().map(|e| e.interface_number).collect();
        assert_eq!(numbers, [-1, 1]);
        assert_eq!(entries[1].path_lossy(), "sensor");
    }
}
