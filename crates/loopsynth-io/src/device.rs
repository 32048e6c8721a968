//! Output device discovery.

use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{Device, Host};

const FALLBACK_SAMPLE_RATE: u32 = 44100;

/// Extract device name via `description()` (cpal 0.17+).
pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Output device information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDevice {
    /// Position in [`list_output_devices`].
    pub index: usize,
    /// Human-readable device name.
    pub name: String,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
    /// Default channel count.
    pub channels: u16,
    /// Whether this is the host's default output.
    pub is_default: bool,
}

fn describe(index: usize, device: &Device, default_name: Option<&str>) -> Option<OutputDevice> {
    let name = device_name(device).ok()?;
    let (default_sample_rate, channels) = device
        .default_output_config()
        .map(|c| (c.sample_rate(), c.channels()))
        .unwrap_or((FALLBACK_SAMPLE_RATE, 2));
    Some(OutputDevice {
        index,
        is_default: default_name == Some(name.as_str()),
        name,
        default_sample_rate,
        channels,
    })
}

/// List all output devices of the default host.
pub fn list_output_devices() -> Result<Vec<OutputDevice>> {
    let host = cpal::default_host();
    let default_name = host
        .default_output_device()
        .and_then(|d| device_name(&d).ok());
    let devices = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?;

    Ok(devices
        .enumerate()
        .filter_map(|(i, d)| describe(i, &d, default_name.as_deref()))
        .collect())
}

/// The default output device, if the host has one.
pub fn default_output_device() -> Result<Option<OutputDevice>> {
    let host = cpal::default_host();
    Ok(host.default_output_device().and_then(|d| {
        let name = device_name(&d).ok();
        describe(0, &d, name.as_deref())
    }))
}

/// Resolve a device by index, exact name, or case-insensitive substring.
pub(crate) fn find_output_device(host: &Host, name_or_index: Option<&str>) -> Result<Device> {
    let Some(search) = name_or_index else {
        return host.default_output_device().ok_or(Error::NoDevice);
    };

    let devices: Vec<Device> = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?
        .collect();
    let names: Vec<String> = devices
        .iter()
        .map(|d| device_name(d).unwrap_or_default())
        .collect();

    let position = match search.parse::<usize>() {
        Ok(i) if i < devices.len() => Some(i),
        _ => match_name(&names, search),
    };
    position
        .and_then(|i| devices.into_iter().nth(i))
        .ok_or_else(|| Error::DeviceNotFound(format!("no output device matching '{search}'")))
}

fn match_name(names: &[String], search: &str) -> Option<usize> {
    if let Some(i) = names.iter().position(|n| n == search) {
        return Some(i);
    }
    let search = search.to_lowercase();
    names
        .iter()
        .position(|n| n.to_lowercase().contains(&search))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_name_prefers_exact() {
        let names = vec![
            "USB Audio Device".to_string(),
            "USB Audio".to_string(),
            "Speakers".to_string(),
        ];
        assert_eq!(match_name(&names, "USB Audio"), Some(1));
        assert_eq!(match_name(&names, "speak"), Some(2));
        assert_eq!(match_name(&names, "usb"), Some(0));
        assert_eq!(match_name(&names, "HDMI"), None);
    }

    #[test]
    fn test_listing_does_not_panic() {
        // Device availability depends on the system.
        if let Ok(devices) = list_output_devices() {
            for (i, d) in devices.iter().enumerate() {
                assert!(d.index >= i);
            }
        }
        let _ = default_output_device();
    }
}
