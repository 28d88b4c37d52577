//! Device descriptors published to the host

use serde::Serialize;

use crate::error::HmdError;

pub const DRIVER_NAME: &str = "OpenHMD HTC Vive Driver";
pub const VENDOR_NAME: &str = "HTC/Valve";
pub const PRODUCT_NAME: &str = "HTC Vive";

/// One headset as seen by the host
///
/// `path` holds the 0-based position of the headset in the HMD listing,
/// as decimal text. It is only meaningful within one enumeration pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDescriptor {
    pub driver: String,
    pub vendor: String,
    pub product: String,
    pub revision: u32,
    pub path: String,
}

impl DeviceDescriptor {
    /// Descriptor for the `ordinal`-th headset
    pub fn for_ordinal(ordinal: usize) -> Self {
        Self {
            driver: DRIVER_NAME.to_string(),
            vendor: VENDOR_NAME.to_string(),
            product: PRODUCT_NAME.to_string(),
            revision: 0,
            path: ordinal.to_string(),
        }
    }

    /// Parse the enumeration ordinal back out of `path`
    pub fn ordinal(&self) -> Result<usize, HmdError> {
        self.path.trim().parse().map_err(|_| {
            HmdError::InvalidParameter(format!(
                "descriptor path '{}' is not a device index",
                self.path
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_round_trip() {
        for i in [0usize, 1, 7, 12] {
            assert_eq!(DeviceDescriptor::for_ordinal(i).ordinal().unwrap(), i);
        }
    }

    #[test]
    fn test_static_fields() {
        let desc = DeviceDescriptor::for_ordinal(3);
        assert_eq!(desc.driver, DRIVER_NAME);
        assert_eq!(desc.vendor, VENDOR_NAME);
        assert_eq!(desc.product, PRODUCT_NAME);
        assert_eq!(desc.revision, 0);
        assert_eq!(desc.path, "3");
    }

    #[test]
    fn test_bad_path_rejected() {
        let mut desc = DeviceDescriptor::for_ordinal(0);
        desc.path = "/dev/hidraw3".into();
        let err = desc.ordinal().unwrap_err();
        assert!(matches!(err, HmdError::InvalidParameter(_)));

        desc.path = "-1".into();
        assert!(desc.ordinal().is_err());
    }
}
