use crate::error::DriverFault;
use rplidar_data::{DeviceHealth, DeviceInfo, MeasurementNode, ScanMode};

/// Scan mode requested when starting a scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanRequest {
    /// The mode the sensor recommends for itself.
    Typical,
    /// A mode from [`LidarDriver::supported_scan_modes`], by id.
    Mode(u16),
}

/// Operations the sensor SDK has to provide.
///
/// Implementations own the transport and the wire protocol. A session drives
/// them through this trait only and calls [`LidarDriver::dispose`] exactly
/// once when it is done with the driver.
pub trait LidarDriver {
    fn connect(&mut self, port: &str, baud_rate: u32) -> Result<(), DriverFault>;

    fn device_info(&mut self) -> Result<DeviceInfo, DriverFault>;

    fn health(&mut self) -> Result<DeviceHealth, DriverFault>;

    fn start_motor(&mut self) -> Result<(), DriverFault>;

    fn stop_motor(&mut self) -> Result<(), DriverFault>;

    /// Starts scanning and returns the mode the sensor actually runs in.
    fn start_scan(&mut self, request: ScanRequest) -> Result<ScanMode, DriverFault>;

    fn stop_scan(&mut self) -> Result<(), DriverFault>;

    fn supported_scan_modes(&mut self) -> Result<Vec<ScanMode>, DriverFault>;

    /// Blocks until a burst is available and copies it into `buffer`.
    ///
    /// Returns the number of nodes written, at most `buffer.len()`.
    fn grab_burst(&mut self, buffer: &mut [MeasurementNode]) -> Result<usize, DriverFault>;

    /// Sorts a grabbed burst by ascending angle in place.
    fn ascend_burst(&mut self, nodes: &mut [MeasurementNode]) -> Result<(), DriverFault>;

    /// Releases every resource held by the driver.
    fn dispose(&mut self);
}

impl<T: LidarDriver + ?Sized> LidarDriver for Box<T> {
    fn connect(&mut self, port: &str, baud_rate: u32) -> Result<(), DriverFault> {
        (**self).connect(port, baud_rate)
    }

    fn device_info(&mut self) -> Result<DeviceInfo, DriverFault> {
        (**self).device_info()
    }

    fn health(&mut self) -> Result<DeviceHealth, DriverFault> {
        (**self).health()
    }

    fn start_motor(&mut self) -> Result<(), DriverFault> {
        (**self).start_motor()
    }

    fn stop_motor(&mut self) -> Result<(), DriverFault> {
        (**self).stop_motor()
    }

    fn start_scan(&mut self, request: ScanRequest) -> Result<ScanMode, DriverFault> {
        (**self).start_scan(request)
    }

    fn stop_scan(&mut self) -> Result<(), DriverFault> {
        (**self).stop_scan()
    }

    fn supported_scan_modes(&mut self) -> Result<Vec<ScanMode>, DriverFault> {
        (**self).supported_scan_modes()
    }

    fn grab_burst(&mut self, buffer: &mut [MeasurementNode]) -> Result<usize, DriverFault> {
        (**self).grab_burst(buffer)
    }

    fn ascend_burst(&mut self, nodes: &mut [MeasurementNode]) -> Result<(), DriverFault> {
        (**self).ascend_burst(nodes)
    }

    fn dispose(&mut self) {
        (**self).dispose()
    }
}
