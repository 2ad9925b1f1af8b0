#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceInfo {
    pub model: u8,
    /// Major version in the high byte, minor version in the low byte.
    pub firmware_version: u16,
    pub hardware_version: u8,
    pub serial_number: [u8; 16],
}

impl DeviceInfo {
    pub fn firmware_major_version(&self) -> u8 {
        (self.firmware_version >> 8) as u8
    }

    pub fn firmware_minor_version(&self) -> u8 {
        (self.firmware_version & 0xFF) as u8
    }

    pub fn serial_number_hex(&self) -> String {
        self.serial_number
            .iter()
            .map(|e| format!("{:02X}", e))
            .collect()
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "S/N: {}, Firmware Ver: {}.{:02}, Hardware Rev: {}",
            self.serial_number_hex(),
            self.firmware_major_version(),
            self.firmware_minor_version(),
            self.hardware_version
        )
    }
}

/// Health status reported by the sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HealthStatus {
    Ok,
    /// The sensor still works but reports degraded performance.
    Warning,
    /// Internal error. The sensor has to be rebooted.
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceHealth {
    pub status: HealthStatus,
    pub error_code: u16,
}

impl DeviceHealth {
    pub fn ok() -> Self {
        DeviceHealth {
            status: HealthStatus::Ok,
            error_code: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> DeviceInfo {
        DeviceInfo {
            model: 0x18,
            firmware_version: 0x011D,
            hardware_version: 5,
            serial_number: [
                0xB2, 0xEB, 0x9A, 0xF0, 0xC3, 0xE3, 0x9E, 0xD4, 0xA7, 0xE3, 0x9E, 0xF2, 0x0A, 0x3B,
                0x32, 0x1D,
            ],
        }
    }

    #[test]
    fn test_firmware_version() {
        let info = info();
        assert_eq!(info.firmware_major_version(), 1);
        assert_eq!(info.firmware_minor_version(), 29);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            info().to_string(),
            "S/N: B2EB9AF0C3E39ED4A7E39EF20A3B321D, Firmware Ver: 1.29, Hardware Rev: 5"
        );
    }
}
