//! HID platform seam
//!
//! [`HidBackend`] lists and opens interfaces, [`HidChannel`] is one opened
//! interface. [`HidApiBackend`] implements both over `hidapi`; the bring-up
//! logic only ever sees the traits.

use std::ffi::CString;

use hidapi::{HidApi, HidDevice};
use parking_lot::Mutex;
use tracing::debug;

use crate::error::TransportError;

/// One entry of the platform HID listing
///
/// Platforms report one entry per HID interface, so a single USB device
/// can contribute several consecutive entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HidEntry {
    /// Platform path used to open the interface
    pub path: CString,
    pub vendor_id: u16,
    pub product_id: u16,
    /// USB interface number (-1 when the platform does not know it)
    pub interface_number: i32,
    pub serial_number: Option<String>,
    pub product_string: Option<String>,
}

impl HidEntry {
    /// Path as printable text
    pub fn path_lossy(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Enumerates and opens HID interfaces
pub trait HidBackend: Send + Sync {
    /// List every interface matching the ids, in platform order
    fn enumerate(&self, vid: u16, pid: u16) -> Result<Vec<HidEntry>, TransportError>;

    /// Open one interface by its platform path
    fn open_path(&self, entry: &HidEntry) -> Result<Box<dyn HidChannel>, TransportError>;
}

/// An opened HID interface
///
/// Dropping the channel closes the underlying handle.
pub trait HidChannel: Send {
    /// Switch between blocking and non-blocking reads
    fn set_blocking_mode(&self, blocking: bool) -> Result<(), TransportError>;

    /// Send a feature report (report ID first)
    fn send_feature_report(&self, data: &[u8]) -> Result<(), TransportError>;

    fn get_manufacturer_string(&self) -> Result<Option<String>, TransportError>;

    fn get_product_string(&self) -> Result<Option<String>, TransportError>;

    fn get_serial_number_string(&self) -> Result<Option<String>, TransportError>;

    /// Read a USB string descriptor by index
    fn get_indexed_string(&self, index: i32) -> Result<Option<String>, TransportError>;
}

/// Backend over the system hidapi library
pub struct HidApiBackend {
    api: Mutex<HidApi>,
}

impl HidApiBackend {
    /// Initialise hidapi
    pub fn new() -> Result<Self, TransportError> {
        let api = HidApi::new()?;
        Ok(Self {
            api: Mutex::new(api),
        })
    }
}

impl HidBackend for HidApiBackend {
    fn enumerate(&self, vid: u16, pid: u16) -> Result<Vec<HidEntry>, TransportError> {
        let mut api = self.api.lock();
        api.refresh_devices()?;

        let entries: Vec<HidEntry> = api
            .device_list()
            .filter(|d| d.vendor_id() == vid && d.product_id() == pid)
            .map(|d| HidEntry {
                path: d.path().to_owned(),
                vendor_id: d.vendor_id(),
                product_id: d.product_id(),
                interface_number: d.interface_number(),
                serial_number: d.serial_number().map(|s| s.to_string()),
                product_string: d.product_string().map(|s| s.to_string()),
            })
            .collect();

        debug!(
            "Enumerated {} entries for {:04x}:{:04x}",
            entries.len(),
            vid,
            pid
        );
        Ok(entries)
    }

    fn open_path(&self, entry: &HidEntry) -> Result<Box<dyn HidChannel>, TransportError> {
        let api = self.api.lock();
        let device = api.open_path(&entry.path)?;
        Ok(Box::new(HidApiChannel { device }))
    }
}

/// hidapi device handle
struct HidApiChannel {
    device: HidDevice,
}

impl HidChannel for HidApiChannel {
    fn set_blocking_mode(&self, blocking: bool) -> Result<(), TransportError> {
        self.device.set_blocking_mode(blocking)?;
        Ok(())
    }

    fn send_feature_report(&self, data: &[u8]) -> Result<(), TransportError> {
        self.device.send_feature_report(data)?;
        Ok(())
    }

    fn get_manufacturer_string(&self) -> Result<Option<String>, TransportError> {
        Ok(self.device.get_manufacturer_string()?)
    }

    fn get_product_string(&self) -> Result<Option<String>, TransportError> {
        Ok(self.device.get_product_string()?)
    }

    fn get_serial_number_string(&self) -> Result<Option<String>, TransportError> {
        Ok(self.device.get_serial_number_string()?)
    }

    fn get_indexed_string(&self, index: i32) -> Result<Option<String>, TransportError> {
        Ok(self.device.get_indexed_string(index)?)
    }
}
