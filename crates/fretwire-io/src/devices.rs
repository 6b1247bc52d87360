//! Output device discovery.

use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{Device, Host};

/// Sample rate reported when a device does not expose a default config.
const FALLBACK_SAMPLE_RATE: u32 = 48000;

/// An audio output device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDevice {
    /// Human-readable device name.
    pub name: String,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
    /// Default number of output channels.
    pub channels: u16,
    /// Whether this is the system default output.
    pub is_default: bool,
}

/// Extract device name via `description()` (cpal 0.17+).
pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

fn describe(device: &Device, default_name: Option<&str>) -> Option<OutputDevice> {
    let name = device_name(device).ok()?;
    let config = device.default_output_config().ok();
    Some(OutputDevice {
        is_default: default_name == Some(name.as_str()),
        default_sample_rate: config
            .as_ref()
            .map(|c| c.sample_rate())
            .unwrap_or(FALLBACK_SAMPLE_RATE),
        channels: config.as_ref().map(|c| c.channels()).unwrap_or(2),
        name,
    })
}

/// List every output device on the default host.
pub fn list_output_devices() -> Result<Vec<OutputDevice>> {
    let host = cpal::default_host();
    let default_name = host
        .default_output_device()
        .and_then(|d| device_name(&d).ok());

    let devices = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?;
    Ok(devices
        .filter_map(|d| describe(&d, default_name.as_deref()))
        .collect())
}

/// The system default output device, if there is one.
pub fn default_output_device() -> Result<Option<OutputDevice>> {
    let host = cpal::default_host();
    Ok(host.default_output_device().and_then(|d| {
        let name = device_name(&d).ok();
        describe(&d, name.as_deref())
    }))
}

/// Find an output device whose name contains `name` (case-insensitive), or
/// the default device when `name` is `None`.
pub(crate) fn find_output_device(host: &Host, name: Option<&str>) -> Result<Device> {
    match name {
        Some(search) => {
            let search_lower = search.to_lowercase();
            let devices = host
                .output_devices()
                .map_err(|e| Error::Stream(e.to_string()))?;

            for device in devices {
                if let Ok(dev_name) = device_name(&device)
                    && dev_name.to_lowercase().contains(search_lower.as_str())
                {
                    return Ok(device);
                }
            }
            Err(Error::DeviceNotFound(format!(
                "no output device matching '{search}'"
            )))
        }
        None => host.default_output_device().ok_or(Error::NoDevice),
    }
}
