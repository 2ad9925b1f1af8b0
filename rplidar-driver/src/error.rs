use thiserror::Error;

/// Failure reported by the underlying sensor driver.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DriverFault {
    #[error("operation timed out")]
    Timeout,
    #[error("operation failed with code {0:#010X}")]
    OperationFailed(u32),
    #[error("driver is not connected")]
    NotConnected,
    #[error("invalid data received from the device")]
    InvalidData,
    #[error("operation is not supported by the device")]
    NotSupported,
}

/// Fatal error raised while opening a session.
#[derive(Debug, Error)]
pub enum RPLidarError {
    #[error("Cannot bind RPLidar to the serial port {port}: {source}")]
    Connect {
        port: String,
        #[source]
        source: DriverFault,
    },
    #[error("Failed to get RPLidar device info: {0}")]
    DeviceInfo(#[source] DriverFault),
    #[error("Failed to retrieve RPLidar health status: {0}")]
    HealthQuery(#[source] DriverFault),
    #[error("RPLidar internal error detected (code {0:#06X}). Reboot the device to retry.")]
    DeviceHealth(u16),
    #[error("Scan mode `{requested}` is not supported. Supported modes: {}", .supported.join(", "))]
    UnsupportedScanMode {
        requested: String,
        supported: Vec<String>,
    },
    #[error("Failed to start RPLidar scan: {0}")]
    ScanStart(#[source] DriverFault),
    #[error(transparent)]
    SerialError(#[from] serialport::Error),
}
