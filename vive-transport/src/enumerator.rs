//! Interface enumerator
//!
//! The platform lists one entry per HID interface, not per physical device.
//! Entries of one device are consecutive, so the listing is walked with an
//! interface counter that wraps every `interfaces_per_device` entries and a
//! device counter that advances on each wrap.

use tracing::debug;

use crate::backend::HidBackend;
use crate::channel::DeviceChannel;
use crate::device_registry::ChannelSpec;
use crate::error::TransportError;

/// Index of the entry at `(device, interface)` in a flat listing
///
/// If several entries match, the last one in listing order is returned.
/// With the counter walk each position is unique, so this only matters if
/// the counting rule changes. `interfaces_per_device == 0` counts as 1.
pub fn select_interface<T>(
    entries: &[T],
    interface: usize,
    interfaces_per_device: usize,
    device: usize,
) -> Option<usize> {
    let per_device = interfaces_per_device.max(1);

    let (selected, _, _) = entries.iter().enumerate().fold(
        (None, 0usize, 0usize),
        |(selected, dev_cur, iface_cur), (i, _)| {
            let selected = if dev_cur == device && iface_cur == interface {
                Some(i)
            } else {
                selected
            };
            if iface_cur + 1 >= per_device {
                (selected, dev_cur + 1, 0)
            } else {
                (selected, dev_cur, iface_cur + 1)
            }
        },
    );

    selected
}

/// Find and open one interface of the `device_ordinal`-th physical device
///
/// Returns `Ok(None)` when the listing has no such interface. The listing
/// is released before returning on every path.
pub fn find_interface(
    backend: &dyn HidBackend,
    spec: &ChannelSpec,
    device_ordinal: usize,
) -> Result<Option<DeviceChannel>, TransportError> {
    let entries = backend.enumerate(spec.vid, spec.pid)?;

    debug!(
        "Opening manufacturer {:04x} product {:04x} ({} interface {}/{}, device {})",
        spec.vid, spec.pid, spec.role, spec.interface, spec.interfaces_per_device, device_ordinal
    );

    let selected = select_interface(
        &entries,
        spec.interface,
        spec.interfaces_per_device,
        device_ordinal,
    );

    for (i, entry) in entries.iter().enumerate() {
        let action = if selected == Some(i) { "open" } else { "skip" };
        debug!("Path {} [{}]", entry.path_lossy(), action);
    }

    let Some(index) = selected else {
        debug!("No {} interface for device {}", spec.role, device_ordinal);
        return Ok(None);
    };

    let entry = &entries[index];
    let device = backend.open_path(entry)?;
    Ok(Some(DeviceChannel::new(
        spec.role,
        entry.path_lossy(),
        device,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_registry::{ChannelRole, VALVE_ID, VIVE_LIGHTHOUSE_FPGA_RX};
    use crate::mock::{MockBackend, MockEntry};

    const RX_SENSOR: ChannelSpec = ChannelSpec {
        role: ChannelRole::LighthouseSensor,
        vid: VALVE_ID,
        pid: VIVE_LIGHTHOUSE_FPGA_RX,
        interface: 1,
        interfaces_per_device: 2,
    };

    fn three_receivers() -> MockBackend {
        let backend = MockBackend::new();
        for path in ["rx0.0", "rx0.1", "rx1.0", "rx1.1", "rx2.0", "rx2.1"] {
            backend.add(VALVE_ID, VIVE_LIGHTHOUSE_FPGA_RX, MockEntry::new(path));
        }
        backend
    }

    #[test]
    fn test_select_groups_by_interfaces_per_device() {
        let listing = [(); 6];
        assert_eq!(select_interface(&listing, 1, 2, 2), Some(5));
        assert_eq!(select_interface(&listing, 0, 2, 2), Some(4));
        assert_eq!(select_interface(&listing, 0, 2, 0), Some(0));
        assert_eq!(select_interface(&listing, 1, 2, 1), Some(3));
    }

    #[test]
    fn test_select_out_of_range() {
        let listing = [(); 6];
        assert_eq!(select_interface(&listing, 0, 2, 3), None);
        assert_eq!(select_interface(&listing, 2, 2, 0), None);
        assert_eq!(select_interface::<()>(&[], 0, 1, 0), None);
    }

    #[test]
    fn test_select_single_interface_devices() {
        let listing = [(); 3];
        for i in 0..3 {
            assert_eq!(select_interface(&listing, 0, 1, i), Some(i));
        }
        assert_eq!(select_interface(&listing, 0, 0, 2), Some(2));
    }

    #[test]
    fn test_select_partial_trailing_device() {
        // Third device only listed its first interface
        let listing = [(); 5];
        assert_eq!(select_interface(&listing, 0, 2, 2), Some(4));
        assert_eq!(select_interface(&listing, 1, 2, 2), None);
    }

    #[test]
    fn test_find_opens_selected_entry() {
        let backend = three_receivers();
        let channel = find_interface(&backend, &RX_SENSOR, 2).unwrap().unwrap();
        assert_eq!(channel.path(), "rx2.1");
        assert_eq!(channel.role(), ChannelRole::LighthouseSensor);
        assert_eq!(backend.log().opened, vec!["rx2.1".to_string()]);
    }

    #[test]
    fn test_find_missing_device_opens_nothing() {
        let backend = three_receivers();
        assert!(find_interface(&backend, &RX_SENSOR, 3).unwrap().is_none());
        assert!(backend.log().opened.is_empty());
        assert_eq!(
            backend.log().enumerations,
            vec![(VALVE_ID, VIVE_LIGHTHOUSE_FPGA_RX)]
        );
    }

    #[test]
    fn test_find_propagates_open_failure() {
        let backend = MockBackend::new();
        backend.add(VALVE_ID, VIVE_LIGHTHOUSE_FPGA_RX, MockEntry::new("rx0.0"));
        backend.add(
            VALVE_ID,
            VIVE_LIGHTHOUSE_FPGA_RX,
            MockEntry::new("rx0.1").fail_open(),
        );
        assert!(find_interface(&backend, &RX_SENSOR, 0).is_err());
        assert_eq!(backend.open_count(), 0);
    }
}
