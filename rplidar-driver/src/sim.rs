//! Simulated sensor for running sessions without hardware.
//!
//! [`SimulatedDriver`] replays scripted bursts, falls back to a synthetic
//! revolution when the script runs out, and records every call it receives
//! in a [`CallLog`] that stays readable after a session took the driver.

use crate::driver::{LidarDriver, ScanRequest};
use crate::error::DriverFault;
use rplidar_data::{DeviceHealth, DeviceInfo, MeasurementNode, ScanMode};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A call received by a [`SimulatedDriver`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DriverCall {
    Connect { port: String, baud_rate: u32 },
    DeviceInfo,
    Health,
    StartMotor,
    StopMotor,
    StartScan(ScanRequest),
    StopScan,
    SupportedScanModes,
    GrabBurst,
    AscendBurst,
    Dispose,
}

/// Shared record of driver calls.
#[derive(Clone, Debug, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<DriverCall>>>,
}

impl CallLog {
    fn push(&self, call: DriverCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn count(&self, call: &DriverCall) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    pub fn contains(&self, call: &DriverCall) -> bool {
        self.count(call) > 0
    }

    pub fn clear(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }
}

/// Faults returned by every call of the corresponding operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FaultPlan {
    pub connect: Option<DriverFault>,
    pub device_info: Option<DriverFault>,
    pub health: Option<DriverFault>,
    pub scan_modes: Option<DriverFault>,
    pub start_scan: Option<DriverFault>,
    pub ascend: Option<DriverFault>,
}

/// Synthetic revolution inside a square room centred on the sensor.
#[derive(Clone, Debug, PartialEq)]
pub struct Revolution {
    pub n_nodes: usize,
    /// Distance from the sensor to each wall in meters.
    pub wall_distance: f32,
    pub quality: u8,
    /// Nodes without a return at each end of the burst.
    pub seam: usize,
    /// Time a grab blocks for.
    pub period: Duration,
}

impl Default for Revolution {
    fn default() -> Self {
        Revolution {
            n_nodes: 720,
            wall_distance: 2.,
            quality: 188,
            seam: 4,
            period: Duration::from_millis(100),
        }
    }
}

impl Revolution {
    pub fn nodes(&self) -> Vec<MeasurementNode> {
        let step = 65536. / self.n_nodes as f64;
        (0..self.n_nodes)
            .map(|i| {
                let raw_angle = (i as f64 * step) as u16;
                let in_seam = i < self.seam || i + self.seam >= self.n_nodes;
                let dist_mm_q2 = if in_seam {
                    0
                } else {
                    let radian = (i as f64 * step) * std::f64::consts::FRAC_PI_2 / 16384.;
                    let d = self.wall_distance as f64 / radian.cos().abs().max(radian.sin().abs());
                    (d * 4000.).round() as u32
                };
                let node = MeasurementNode::new(raw_angle, dist_mm_q2, self.quality);
                if i == 0 {
                    node.with_sync()
                } else {
                    node
                }
            })
            .collect()
    }
}

fn default_scan_modes() -> Vec<ScanMode> {
    let mode = |id: u16, name: &str, max_distance: f32, us_per_sample: f32| ScanMode {
        id,
        name: name.to_string(),
        max_distance,
        us_per_sample,
    };
    vec![
        mode(0, "Standard", 12., 500.),
        mode(1, "Express", 12., 250.),
        mode(2, "Boost", 12., 125.),
        mode(3, "Sensitivity", 16., 125.),
    ]
}

pub struct SimulatedDriver {
    device_info: DeviceInfo,
    health: DeviceHealth,
    scan_modes: Vec<ScanMode>,
    typical_mode: u16,
    bursts: VecDeque<Result<Vec<MeasurementNode>, DriverFault>>,
    revolution: Option<Revolution>,
    faults: FaultPlan,
    connected: bool,
    calls: CallLog,
}

impl Default for SimulatedDriver {
    fn default() -> Self {
        SimulatedDriver::new()
    }
}

impl SimulatedDriver {
    /// A healthy sensor with four scan modes, `Boost` being the typical one,
    /// and nothing to grab.
    pub fn new() -> Self {
        SimulatedDriver {
            device_info: DeviceInfo {
                model: 0x18,
                firmware_version: 0x011D,
                hardware_version: 5,
                serial_number: [0x5A; 16],
            },
            health: DeviceHealth::ok(),
            scan_modes: default_scan_modes(),
            typical_mode: 2,
            bursts: VecDeque::new(),
            revolution: None,
            faults: FaultPlan::default(),
            connected: false,
            calls: CallLog::default(),
        }
    }

    pub fn with_device_info(mut self, device_info: DeviceInfo) -> Self {
        self.device_info = device_info;
        self
    }

    pub fn with_health(mut self, health: DeviceHealth) -> Self {
        self.health = health;
        self
    }

    pub fn with_scan_modes(mut self, scan_modes: Vec<ScanMode>, typical_mode: u16) -> Self {
        self.scan_modes = scan_modes;
        self.typical_mode = typical_mode;
        self
    }

    pub fn with_faults(mut self, faults: FaultPlan) -> Self {
        self.faults = faults;
        self
    }

    /// Replaces the faults of a driver already in use.
    pub fn set_faults(&mut self, faults: FaultPlan) {
        self.faults = faults;
    }

    /// Generates bursts from `revolution` once the scripted ones are used up.
    pub fn with_revolution(mut self, revolution: Revolution) -> Self {
        self.revolution = Some(revolution);
        self
    }

    /// Queues a burst for the next grab.
    pub fn push_burst(mut self, nodes: Vec<MeasurementNode>) -> Self {
        self.bursts.push_back(Ok(nodes));
        self
    }

    /// Makes the next grab fail.
    pub fn push_grab_fault(mut self, fault: DriverFault) -> Self {
        self.bursts.push_back(Err(fault));
        self
    }

    pub fn call_log(&self) -> CallLog {
        self.calls.clone()
    }

    fn check_connected(&self) -> Result<(), DriverFault> {
        match self.connected {
            true => Ok(()),
            false => Err(DriverFault::NotConnected),
        }
    }

    fn next_burst(&mut self) -> Result<Vec<MeasurementNode>, DriverFault> {
        if let Some(burst) = self.bursts.pop_front() {
            return burst;
        }
        match &self.revolution {
            Some(revolution) => {
                std::thread::sleep(revolution.period);
                Ok(revolution.nodes())
            }
            None => Err(DriverFault::Timeout),
        }
    }
}

fn fail_with(fault: &Option<DriverFault>) -> Result<(), DriverFault> {
    match fault {
        Some(fault) => Err(fault.clone()),
        None => Ok(()),
    }
}

impl LidarDriver for SimulatedDriver {
    fn connect(&mut self, port: &str, baud_rate: u32) -> Result<(), DriverFault> {
        self.calls.push(DriverCall::Connect {
            port: port.to_string(),
            baud_rate,
        });
        fail_with(&self.faults.connect)?;
        self.connected = true;
        Ok(())
    }

    fn device_info(&mut self) -> Result<DeviceInfo, DriverFault> {
        self.calls.push(DriverCall::DeviceInfo);
        self.check_connected()?;
        fail_with(&self.faults.device_info)?;
        Ok(self.device_info.clone())
    }

    fn health(&mut self) -> Result<DeviceHealth, DriverFault> {
        self.calls.push(DriverCall::Health);
        self.check_connected()?;
        fail_with(&self.faults.health)?;
        Ok(self.health)
    }

    fn start_motor(&mut self) -> Result<(), DriverFault> {
        self.calls.push(DriverCall::StartMotor);
        self.check_connected()
    }

    fn stop_motor(&mut self) -> Result<(), DriverFault> {
        self.calls.push(DriverCall::StopMotor);
        self.check_connected()
    }

    fn start_scan(&mut self, request: ScanRequest) -> Result<ScanMode, DriverFault> {
        self.calls.push(DriverCall::StartScan(request));
        self.check_connected()?;
        fail_with(&self.faults.start_scan)?;
        let id = match request {
            ScanRequest::Typical => self.typical_mode,
            ScanRequest::Mode(id) => id,
        };
        self.scan_modes
            .iter()
            .find(|mode| mode.id == id)
            .cloned()
            .ok_or(DriverFault::NotSupported)
    }

    fn stop_scan(&mut self) -> Result<(), DriverFault> {
        self.calls.push(DriverCall::StopScan);
        self.check_connected()
    }

    fn supported_scan_modes(&mut self) -> Result<Vec<ScanMode>, DriverFault> {
        self.calls.push(DriverCall::SupportedScanModes);
        self.check_connected()?;
        fail_with(&self.faults.scan_modes)?;
        Ok(self.scan_modes.clone())
    }

    fn grab_burst(&mut self, buffer: &mut [MeasurementNode]) -> Result<usize, DriverFault> {
        self.calls.push(DriverCall::GrabBurst);
        self.check_connected()?;
        let burst = self.next_burst()?;
        let n = burst.len().min(buffer.len());
        buffer[..n].copy_from_slice(&burst[..n]);
        Ok(n)
    }

    fn ascend_burst(&mut self, nodes: &mut [MeasurementNode]) -> Result<(), DriverFault> {
        self.calls.push(DriverCall::AscendBurst);
        fail_with(&self.faults.ascend)?;
        nodes.sort_by_key(|node| node.angle_z_q14);
        Ok(())
    }

    fn dispose(&mut self) {
        self.calls.push(DriverCall::Dispose);
        self.connected = false;
    }
}
