//! Session bring-up and shutdown
//!
//! A [`Session`] owns the four channels of one headset. It only exists
//! fully populated: if any channel cannot be opened or configured, every
//! channel opened so far is released in reverse order and no session is
//! returned.

use std::sync::Arc;

use tracing::{debug, info};
use vive_transport::protocol::{
    CONTROLLER_POWER_OFF, DISPLAY_POWER_OFF1, DISPLAY_POWER_OFF2, DISPLAY_POWER_ON,
};
use vive_transport::{
    find_interface, ChannelRole, ChannelSpec, DeviceChannel, HapticPulse, HidBackend,
    BRINGUP_CHANNELS,
};
use zerocopy::IntoBytes;

use crate::context::DriverContext;
use crate::descriptor::DeviceDescriptor;
use crate::error::HmdError;
use crate::float_value::{self, FloatValue};
use crate::host::HmdDevice;

/// Diagnostics collected during bring-up
#[derive(Debug, Clone)]
pub struct BringupOptions {
    /// Read manufacturer, product and serial strings from the HMD
    pub dump_info_strings: bool,
    /// Extra USB string descriptor indices to read from the HMD
    pub indexed_strings: Vec<i32>,
}

impl Default for BringupOptions {
    fn default() -> Self {
        Self {
            dump_info_strings: true,
            indexed_strings: Vec::new(),
        }
    }
}

/// Identity strings read from the HMD, when available
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HmdInfo {
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub serial_number: Option<String>,
    pub indexed: Vec<(i32, String)>,
}

impl HmdInfo {
    fn query(hmd: &DeviceChannel, indexed_strings: &[i32]) -> Self {
        Self {
            manufacturer: best_effort_string("manufacturer", hmd.manufacturer_string()),
            product: best_effort_string("product", hmd.product_string()),
            serial_number: best_effort_string("serial number", hmd.serial_number_string()),
            indexed: indexed_strings
                .iter()
                .filter_map(|&index| {
                    let what = format!("indexed string 0x{index:02x}");
                    best_effort_string(&what, hmd.indexed_string(index)).map(|s| (index, s))
                })
                .collect(),
        }
    }
}

fn best_effort_string(
    what: &str,
    result: Result<Option<String>, vive_transport::TransportError>,
) -> Option<String> {
    match result {
        Ok(Some(s)) => {
            info!("{}: '{}'", what, s);
            Some(s)
        }
        Ok(None) => None,
        Err(e) => {
            debug!("{} unavailable: {}", what, e);
            None
        }
    }
}

/// Channels opened so far; released newest first unless taken
struct RollbackStack {
    channels: Vec<DeviceChannel>,
}

impl RollbackStack {
    fn new() -> Self {
        Self {
            channels: Vec::with_capacity(BRINGUP_CHANNELS.len()),
        }
    }

    fn push(&mut self, channel: DeviceChannel) {
        self.channels.push(channel);
    }

    /// Keep every channel; nothing is rolled back afterwards
    fn commit(mut self) -> Vec<DeviceChannel> {
        std::mem::take(&mut self.channels)
    }
}

impl Drop for RollbackStack {
    fn drop(&mut self) {
        while let Some(channel) = self.channels.pop() {
            debug!("Rolling back {} channel", channel.role());
            drop(channel);
        }
    }
}

/// Find, open and configure one channel
fn open_channel(
    backend: &dyn HidBackend,
    spec: &ChannelSpec,
    device: usize,
) -> Result<DeviceChannel, HmdError> {
    let channel = find_interface(backend, spec, device)
        .map_err(|source| HmdError::OpenFailed {
            role: spec.role,
            source,
        })?
        .ok_or(HmdError::InterfaceNotFound {
            role: spec.role,
            device,
        })?;

    channel.configure().map_err(|source| HmdError::Configure {
        role: spec.role,
        source,
    })?;

    Ok(channel)
}

/// One opened headset
pub struct Session {
    ctx: Arc<DriverContext>,
    descriptor: DeviceDescriptor,
    info: HmdInfo,
    hmd: DeviceChannel,
    imu: DeviceChannel,
    lighthouse_sensor: DeviceChannel,
    watchman_dongle: DeviceChannel,
}

impl Session {
    /// Bring up the headset `descriptor` points at
    ///
    /// On failure the error message is also recorded in `ctx`.
    pub fn open(
        backend: &dyn HidBackend,
        ctx: Arc<DriverContext>,
        descriptor: &DeviceDescriptor,
        options: &BringupOptions,
    ) -> Result<Self, HmdError> {
        match Self::bring_up(backend, descriptor, options) {
            Ok(parts) => Ok(Self {
                ctx,
                descriptor: descriptor.clone(),
                info: parts.info,
                hmd: parts.hmd,
                imu: parts.imu,
                lighthouse_sensor: parts.lighthouse_sensor,
                watchman_dongle: parts.watchman_dongle,
            }),
            Err(e) => {
                ctx.set_error(e.to_string());
                Err(e)
            }
        }
    }

    fn bring_up(
        backend: &dyn HidBackend,
        descriptor: &DeviceDescriptor,
        options: &BringupOptions,
    ) -> Result<Parts, HmdError> {
        let device = descriptor.ordinal()?;

        let mut stack = RollbackStack::new();
        for spec in &BRINGUP_CHANNELS {
            stack.push(open_channel(backend, spec, device)?);
        }

        let [hmd, imu, lighthouse_sensor, watchman_dongle]: [DeviceChannel; 4] = stack
            .commit()
            .try_into()
            .map_err(|_| HmdError::Internal("incomplete channel set".into()))?;

        // Quiet any paired controller before the display comes up
        watchman_dongle.send_best_effort(&CONTROLLER_POWER_OFF);

        let info = if options.dump_info_strings {
            HmdInfo::query(&hmd, &options.indexed_strings)
        } else {
            HmdInfo::default()
        };

        hmd.send_best_effort(&DISPLAY_POWER_ON);

        info!("Opened HTC Vive device {}", device);
        Ok(Parts {
            info,
            hmd,
            imu,
            lighthouse_sensor,
            watchman_dongle,
        })
    }

    /// Power the display off and release every channel
    pub fn close(self) {
        info!("Closing HTC Vive device {}", self.descriptor.path);

        self.hmd.send_best_effort(&DISPLAY_POWER_OFF1);
        self.hmd.send_best_effort(&DISPLAY_POWER_OFF2);

        let Session {
            hmd,
            imu,
            lighthouse_sensor,
            watchman_dongle,
            ..
        } = self;
        drop(hmd);
        drop(imu);
        drop(lighthouse_sensor);
        drop(watchman_dongle);
    }

    /// Buzz a controller paired to the dongle
    pub fn haptic_pulse(&self, pulse: &HapticPulse) -> Result<(), HmdError> {
        self.watchman_dongle
            .send_feature_report("controller haptic pulse", pulse.as_bytes())?;
        Ok(())
    }

    pub fn info(&self) -> &HmdInfo {
        &self.info
    }

    pub fn channel(&self, role: ChannelRole) -> &DeviceChannel {
        match role {
            ChannelRole::Hmd => &self.hmd,
            ChannelRole::Imu => &self.imu,
            ChannelRole::LighthouseSensor => &self.lighthouse_sensor,
            ChannelRole::WatchmanDongle => &self.watchman_dongle,
        }
    }
}

/// Session fields produced by a successful bring-up
struct Parts {
    info: HmdInfo,
    hmd: DeviceChannel,
    imu: DeviceChannel,
    lighthouse_sensor: DeviceChannel,
    watchman_dongle: DeviceChannel,
}

impl HmdDevice for Session {
    fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    fn get_float_value(&self, kind: FloatValue, out: &mut [f32]) -> Result<(), HmdError> {
        float_value::stub_value(kind, out).inspect_err(|e| self.ctx.set_error(e.to_string()))
    }

    fn close(self: Box<Self>) {
        Session::close(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vive_transport::mock::{MockBackend, MockEntry};
    use vive_transport::{HTC_ID, VALVE_ID, VIVE_HMD, VIVE_LIGHTHOUSE_FPGA_RX, VIVE_WATCHMAN_DONGLE};

    fn one_headset() -> MockBackend {
        let backend = MockBackend::new();
        backend.add(HTC_ID, VIVE_HMD, MockEntry::new("hmd"));
        backend.add(VALVE_ID, VIVE_LIGHTHOUSE_FPGA_RX, MockEntry::new("imu"));
        backend.add(VALVE_ID, VIVE_LIGHTHOUSE_FPGA_RX, MockEntry::new("sensor"));
        backend.add(VALVE_ID, VIVE_WATCHMAN_DONGLE, MockEntry::new("dongle.0"));
        backend.add(VALVE_ID, VIVE_WATCHMAN_DONGLE, MockEntry::new("dongle.1"));
        backend
    }

    #[test]
    fn test_rollback_releases_newest_first() {
        let backend = one_headset();
        {
            let mut stack = RollbackStack::new();
            for spec in &BRINGUP_CHANNELS[..3] {
                stack.push(open_channel(&backend, spec, 0).unwrap());
            }
        }
        assert_eq!(backend.log().closed, vec!["sensor", "imu", "hmd"]);
    }

    #[test]
    fn test_commit_keeps_channels_open() {
        let backend = one_headset();
        let mut stack = RollbackStack::new();
        stack.push(open_channel(&backend, &BRINGUP_CHANNELS[0], 0).unwrap());
        let channels = stack.commit();
        assert_eq!(channels.len(), 1);
        assert_eq!(backend.open_count(), 1);
        drop(channels);
        assert_eq!(backend.open_count(), 0);
    }

    #[test]
    fn test_open_channel_closes_on_configure_failure() {
        let backend = MockBackend::new();
        backend.add(HTC_ID, VIVE_HMD, MockEntry::new("hmd").fail_non_blocking());
        let err = open_channel(&backend, &BRINGUP_CHANNELS[0], 0).unwrap_err();
        assert!(matches!(
            err,
            HmdError::Configure {
                role: ChannelRole::Hmd,
                ..
            }
        ));
        assert_eq!(backend.open_count(), 0);
        assert_eq!(
            err.to_string(),
            "Failed to set non-blocking on hmd: HID error: hid_set_nonblocking failed"
        );
    }

    #[test]
    fn test_open_channel_missing_interface() {
        let backend = MockBackend::new();
        let err = open_channel(&backend, &BRINGUP_CHANNELS[3], 0).unwrap_err();
        assert!(matches!(
            err,
            HmdError::InterfaceNotFound {
                role: ChannelRole::WatchmanDongle,
                device: 0
            }
        ));
    }

    #[test]
    fn test_info_strings_are_optional() {
        let backend = MockBackend::new();
        backend.add(
            HTC_ID,
            VIVE_HMD,
            MockEntry::new("hmd")
                .with_strings("HTC", "HTC Vive", "LHR-0001")
                .with_indexed_string(0x10, "rev"),
        );
        let hmd = open_channel(&backend, &BRINGUP_CHANNELS[0], 0).unwrap();
        let info = HmdInfo::query(&hmd, &[0x10, 0x11]);
        assert_eq!(info.manufacturer.as_deref(), Some("HTC"));
        assert_eq!(info.serial_number.as_deref(), Some("LHR-0001"));
        assert_eq!(info.indexed, vec![(0x10, "rev".to_string())]);
    }
}
