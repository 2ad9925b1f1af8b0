use crate::constants::BURST_CAPACITY;
use crate::driver::{LidarDriver, ScanRequest};
use crate::error::{DriverFault, RPLidarError};
use crate::guard::DriverGuard;
use crate::scan::{assemble, FrameContext};
use crate::time::{CaptureTimer, CaptureWindow};
use rplidar_data::{
    DeviceHealth, DeviceInfo, HealthStatus, MeasurementNode, ScanFrame, ScanMode, SessionConfig,
};

/// One burst of nodes, sorted by ascending angle, with its capture interval.
#[derive(Clone, Debug, PartialEq)]
pub struct RawBurst {
    pub nodes: Vec<MeasurementNode>,
    pub capture: CaptureWindow,
}

impl RawBurst {
    /// Whether a node of the burst carries the sync flag the sensor sets at
    /// the start of each revolution.
    pub fn has_revolution_start(&self) -> bool {
        self.nodes.iter().any(MeasurementNode::is_sync)
    }
}

pub fn get_device_info<D: LidarDriver>(driver: &mut D) -> Result<DeviceInfo, RPLidarError> {
    match driver.device_info() {
        Ok(info) => {
            log::debug!("RPLidar {}", info);
            Ok(info)
        }
        Err(DriverFault::Timeout) => {
            log::error!("Device info request timed out");
            Err(RPLidarError::DeviceInfo(DriverFault::Timeout))
        }
        Err(e) => {
            log::error!("Unexpected error while reading device info: {e}");
            Err(RPLidarError::DeviceInfo(e))
        }
    }
}

/// Reads the health status. An internal error of the device is fatal, a
/// warning is only logged.
pub fn check_device_health<D: LidarDriver>(driver: &mut D) -> Result<DeviceHealth, RPLidarError> {
    let health = driver.health().map_err(RPLidarError::HealthQuery)?;
    match health.status {
        HealthStatus::Ok => Ok(health),
        HealthStatus::Warning => {
            log::warn!("RPLidar reports a warning (code {:#06X})", health.error_code);
            Ok(health)
        }
        HealthStatus::Error => Err(RPLidarError::DeviceHealth(health.error_code)),
    }
}

pub(crate) fn find_scan_mode<'a>(
    modes: &'a [ScanMode],
    name: &str,
) -> Result<&'a ScanMode, RPLidarError> {
    if let Some(mode) = modes.iter().find(|mode| mode.name == name) {
        return Ok(mode);
    }
    log::error!("Scan mode `{name}` is not supported by the lidar. Supported modes:");
    for mode in modes {
        log::error!(
            "\t{}: max_distance: {:.1} m, Point number: {:.1}K",
            mode.name,
            mode.max_distance,
            mode.k_samples_per_second()
        );
    }
    Err(RPLidarError::UnsupportedScanMode {
        requested: name.to_string(),
        supported: modes.iter().map(|mode| mode.name.clone()).collect(),
    })
}

fn start_scan<D: LidarDriver>(
    guard: &mut DriverGuard<D>,
    scan_mode: Option<&str>,
) -> Result<ScanMode, RPLidarError> {
    let request = match scan_mode {
        None => ScanRequest::Typical,
        Some(name) => {
            let modes = guard
                .driver()
                .supported_scan_modes()
                .map_err(RPLidarError::ScanStart)?;
            ScanRequest::Mode(find_scan_mode(&modes, name)?.id)
        }
    };
    guard.start_scan(request).map_err(RPLidarError::ScanStart)
}

/// Connection to a single sensor.
///
/// The driver is stopped and disposed when the session is closed or dropped,
/// and also when [`DeviceSession::open`] fails part way.
pub struct DeviceSession<D: LidarDriver> {
    guard: Option<DriverGuard<D>>,
    config: SessionConfig,
    device_info: DeviceInfo,
    health: DeviceHealth,
    scan_mode: ScanMode,
    max_distance: f32,
    sequence: u32,
}

impl<D: LidarDriver> DeviceSession<D> {
    /// Connects to the sensor on `port`, checks it, and starts scanning.
    ///
    /// # Arguments
    ///
    /// * `driver` - Driver of the sensor. The session takes ownership.
    /// * `port` - Serial port name such as `/dev/ttyUSB0`.
    /// * `config` - Settings read once while connecting.
    pub fn open(driver: D, port: &str, config: SessionConfig) -> Result<Self, RPLidarError> {
        let mut guard = DriverGuard::new(driver);

        guard
            .driver()
            .connect(port, config.baud_rate)
            .map_err(|source| RPLidarError::Connect {
                port: port.to_string(),
                source,
            })?;

        let device_info = get_device_info(guard.driver())?;
        let health = check_device_health(guard.driver())?;

        if let Err(e) = guard.start_motor() {
            log::warn!("Failed to start the motor: {e}");
        }

        let scan_mode = start_scan(&mut guard, config.scan_mode.as_deref())?;
        log::info!(
            "current scan mode: {}, max_distance: {:.1} m, Point number: {:.1}K",
            scan_mode.name,
            scan_mode.max_distance,
            scan_mode.k_samples_per_second()
        );

        let max_distance = config.max_distance.unwrap_or(scan_mode.max_distance);

        Ok(DeviceSession {
            guard: Some(guard),
            config,
            device_info,
            health,
            scan_mode,
            max_distance,
            sequence: 0,
        })
    }

    /// Starts rotation and scanning. Returns `false` if the session is closed.
    pub fn start(&mut self) -> bool {
        let request = ScanRequest::Mode(self.scan_mode.id);
        let Some(guard) = self.guard.as_mut() else {
            return false;
        };
        if guard.is_scanning() {
            return true;
        }
        if let Err(e) = guard.start_motor() {
            log::warn!("Failed to start the motor: {e}");
        }
        if let Err(e) = guard.start_scan(request) {
            log::warn!("Failed to start scanning: {e}");
        }
        true
    }

    /// Stops scanning and rotation. Returns `false` if the session is closed.
    pub fn stop(&mut self) -> bool {
        match self.guard.as_mut() {
            Some(guard) => {
                guard.stop();
                true
            }
            None => false,
        }
    }

    /// Stops the sensor and releases the driver. Later calls are no-ops.
    pub fn close(&mut self) {
        self.guard = None;
    }

    pub fn is_open(&self) -> bool {
        self.guard.is_some()
    }

    /// Grabs one burst and sorts it by angle.
    ///
    /// Blocks as long as the driver's grab does. Returns `None` if the
    /// session is closed or either driver call fails.
    pub fn next_raw_burst(&mut self) -> Option<RawBurst> {
        let driver = self.guard.as_mut()?.driver();

        let mut nodes = vec![MeasurementNode::default(); BURST_CAPACITY];
        let timer = CaptureTimer::start();
        let n_nodes = match driver.grab_burst(&mut nodes) {
            Ok(n) => n,
            Err(e) => {
                log::debug!("Failed to grab scan data: {e}");
                return None;
            }
        };
        let capture = timer.finish();
        nodes.truncate(n_nodes);

        if let Err(e) = driver.ascend_burst(&mut nodes) {
            log::debug!("Failed to sort scan data: {e}");
            return None;
        }
        Some(RawBurst { nodes, capture })
    }

    /// Returns the next frame, or `None` if none could be assembled now.
    ///
    /// Nothing is retried here. Call again after a short sleep.
    pub fn poll(&mut self) -> Option<ScanFrame> {
        let burst = self.next_raw_burst()?;
        if !burst.has_revolution_start() {
            log::debug!("Burst of {} nodes has no revolution start", burst.nodes.len());
        }
        let context = FrameContext {
            sequence: self.sequence,
            source_id: &self.config.source_id,
            range_max: self.max_distance,
        };
        let scan = assemble(&burst.nodes, burst.capture, context);
        match &scan {
            Some(scan) => {
                log::trace!("Assembled frame {} from {} nodes", scan.sequence, scan.len());
                self.sequence = self.sequence.wrapping_add(1);
            }
            None => log::debug!("Burst of {} nodes has no valid revolution", burst.nodes.len()),
        }
        scan
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    /// Health read while opening the session.
    pub fn health(&self) -> &DeviceHealth {
        &self.health
    }

    /// Scan mode the sensor was started in.
    pub fn scan_mode(&self) -> &ScanMode {
        &self.scan_mode
    }

    /// Effective maximum range in meters.
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Sequence number the next frame will carry.
    pub fn next_sequence(&self) -> u32 {
        self.sequence
    }
}
