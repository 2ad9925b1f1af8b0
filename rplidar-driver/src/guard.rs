use crate::driver::{LidarDriver, ScanRequest};
use crate::error::DriverFault;
use rplidar_data::ScanMode;

/// Owns a driver and guarantees it is stopped and disposed exactly once.
///
/// Motor and scan are flagged before the driver is asked to start them, so a
/// start that fails half way is still stopped on release. Only a scan start
/// the driver confirmed counts as scanning.
pub(crate) struct DriverGuard<D: LidarDriver> {
    driver: D,
    motor_running: bool,
    scan_requested: bool,
    scanning: bool,
    released: bool,
}

impl<D: LidarDriver> DriverGuard<D> {
    pub(crate) fn new(driver: D) -> Self {
        DriverGuard {
            driver,
            motor_running: false,
            scan_requested: false,
            scanning: false,
            released: false,
        }
    }

    pub(crate) fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub(crate) fn is_scanning(&self) -> bool {
        self.scanning
    }

    pub(crate) fn start_motor(&mut self) -> Result<(), DriverFault> {
        self.motor_running = true;
        self.driver.start_motor()
    }

    pub(crate) fn start_scan(&mut self, request: ScanRequest) -> Result<ScanMode, DriverFault> {
        self.scan_requested = true;
        let mode = self.driver.start_scan(request)?;
        self.scanning = true;
        Ok(mode)
    }

    /// Stops whatever was started. Failures are logged and otherwise ignored.
    pub(crate) fn stop(&mut self) {
        if self.scan_requested {
            if let Err(e) = self.driver.stop_scan() {
                log::warn!("Failed to stop scanning: {e}");
            }
            self.scan_requested = false;
            self.scanning = false;
        }
        if self.motor_running {
            if let Err(e) = self.driver.stop_motor() {
                log::warn!("Failed to stop the motor: {e}");
            }
            self.motor_running = false;
        }
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.stop();
        self.driver.dispose();
        self.released = true;
        log::debug!("Driver released");
    }
}

impl<D: LidarDriver> Drop for DriverGuard<D> {
    fn drop(&mut self) {
        self.release();
    }
}
