//! TEMPer USB thermometer driver using the hidapi HID interface

use std::ffi::CString;

use chrono::Local;
use hidapi::HidApi;
use log::debug;

use crate::error::{Result, TemperError};
use crate::store::Sample;

/// Product string prefix shared by the whole TEMPer sensor family
pub const PRODUCT_PREFIX: &str = "TEMPer";

// Fixed output report: report ID 0x00 followed by the command that requests
// the latest internal temperature reading.
const TEMPERATURE_REQUEST: [u8; 9] = [0x00, 0x01, 0x80, 0x33, 0x01, 0x00, 0x00, 0x00, 0x00];

/// Response frame length in bytes
pub const RESPONSE_LEN: usize = 8;

// Response wait: a short first poll, widened after the first empty poll to
// avoid spinning. There is no hard timeout; a device that never answers
// blocks the caller, which is a limitation of the hardware interface.
const FIRST_POLL_MS: i32 = 10;
const RETRY_POLL_MS: i32 = 50;

/// Temperature reported for models without a known decode formula
/// (lenient mode)
pub const FALLBACK_TEMPERATURE: f64 = 1.0;

/// How to treat sensor models without a known decode formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Decode unknown models to [`FALLBACK_TEMPERATURE`]
    #[default]
    Lenient,
    /// Fail with [`TemperError::UnknownModel`]
    Strict,
}

/// Identity of an enumerated sensor, valid for one acquisition attempt
#[derive(Debug, Clone)]
pub struct DeviceDescriptor {
    pub vendor_id: u16,
    pub product_id: u16,
    /// Product string reported by the device, e.g. `TEMPer1F`
    pub model: String,
    /// Platform path used to open the device
    pub path: CString,
}

/// Whether a product string identifies a TEMPer family device
fn is_sensor_product(product: Option<&str>) -> bool {
    product.is_some_and(|p| p.starts_with(PRODUCT_PREFIX))
}

/// Find the first connected TEMPer family sensor
///
/// Takes a snapshot of the HID device list at call time; nothing is cached,
/// since the physical device may be replugged between acquisitions.
///
/// # Returns
/// * `Ok(DeviceDescriptor)` - First device whose product string starts with `TEMPer`
/// * `Err(TemperError::SensorNotFound)` - No matching device connected
pub fn find_sensor(api: &HidApi) -> Result<DeviceDescriptor> {
    for info in api.device_list() {
        if is_sensor_product(info.product_string()) {
            let model = info.product_string().unwrap_or_default().to_string();
            debug!(
                "found sensor {model} (vid {:04x}, pid {:04x})",
                info.vendor_id(),
                info.product_id()
            );
            return Ok(DeviceDescriptor {
                vendor_id: info.vendor_id(),
                product_id: info.product_id(),
                model,
                path: info.path().to_owned(),
            });
        }
    }
    Err(TemperError::SensorNotFound)
}

/// Read one temperature sample from the sensor
///
/// Opens the device by path, sends the fixed request frame and polls until a
/// response frame arrives, then decodes it according to the model string.
/// The device handle is dropped on every exit path, so a failed poll cannot
/// leave a stale handle behind for the next one.
pub fn read_temperature(
    api: &HidApi,
    descriptor: &DeviceDescriptor,
    policy: DecodePolicy,
) -> Result<Sample> {
    let device = api.open_path(&descriptor.path)?;
    device.write(&TEMPERATURE_REQUEST)?;

    let mut frame = [0u8; RESPONSE_LEN];
    let mut timeout_ms = FIRST_POLL_MS;
    loop {
        let received = device.read_timeout(&mut frame, timeout_ms)?;
        if received > 0 {
            break;
        }
        timeout_ms = RETRY_POLL_MS;
    }

    let temperature = decode_temperature(&descriptor.model, &frame, policy)?;
    Ok(Sample::new(Local::now(), temperature))
}

/// Decode a response frame into degrees Celsius
///
/// Pure function of the model string and the frame bytes. Unknown models
/// decode to [`FALLBACK_TEMPERATURE`] under [`DecodePolicy::Lenient`]; pass
/// [`DecodePolicy::Strict`] to get an error instead.
pub fn decode_temperature(
    model: &str,
    frame: &[u8; RESPONSE_LEN],
    policy: DecodePolicy,
) -> Result<f64> {
    let hi = frame[3] as f64;
    match model {
        "TEMPer1F" | "TEMPer2" => Ok((hi * 256.0 + frame[4] as f64) / 100.0),
        "TEMPer1F_V1.3" => Ok((hi * 256.0 + frame[6] as f64) / 256.0),
        _ => match policy {
            DecodePolicy::Lenient => Ok(FALLBACK_TEMPERATURE),
            DecodePolicy::Strict => Err(TemperError::UnknownModel(model.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(b3: u8, b4: u8, b6: u8) -> [u8; RESPONSE_LEN] {
        let mut frame = [0u8; RESPONSE_LEN];
        frame[3] = b3;
        frame[4] = b4;
        frame[6] = b6;
        frame
    }

    #[test]
    fn test_decode_temper1f() {
        let t = decode_temperature("TEMPer1F", &frame(1, 44, 0), DecodePolicy::Lenient).unwrap();
        assert_eq!(t, 3.00);
    }

    #[test]
    fn test_decode_temper1f_v13() {
        let t =
            decode_temperature("TEMPer1F_V1.3", &frame(0, 0, 128), DecodePolicy::Lenient).unwrap();
        assert_eq!(t, 0.50);
    }

    #[test]
    fn test_decode_temper2_matches_temper1f() {
        let f = frame(0, 215, 0);
        let a = decode_temperature("TEMPer1F", &f, DecodePolicy::Lenient).unwrap();
        let b = decode_temperature("TEMPer2", &f, DecodePolicy::Lenient).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, 2.15);
    }

    #[test]
    fn test_unknown_model_falls_back_regardless_of_frame() {
        for f in [frame(0, 0, 0), frame(255, 255, 255), frame(1, 44, 128)] {
            let t = decode_temperature("SomeOtherGadget", &f, DecodePolicy::Lenient).unwrap();
            assert_eq!(t, FALLBACK_TEMPERATURE);
        }
    }

    #[test]
    fn test_unknown_model_strict_is_an_error() {
        let result = decode_temperature("SomeOtherGadget", &frame(1, 44, 0), DecodePolicy::Strict);
        assert!(matches!(result, Err(TemperError::UnknownModel(m)) if m == "SomeOtherGadget"));
    }

    #[test]
    fn test_product_prefix_filter() {
        assert!(is_sensor_product(Some("TEMPer1F")));
        assert!(is_sensor_product(Some("TEMPer2")));
        assert!(!is_sensor_product(Some("temper1f"))); // case-sensitive
        assert!(!is_sensor_product(Some("USB Keyboard")));
        assert!(!is_sensor_product(None));
    }
}
