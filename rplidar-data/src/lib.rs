pub mod config;
pub mod device_info;
pub mod measurement;
pub mod scan;
pub mod scan_mode;

pub use config::SessionConfig;
pub use device_info::{DeviceHealth, DeviceInfo, HealthStatus};
pub use measurement::MeasurementNode;
pub use scan::ScanFrame;
pub use scan_mode::ScanMode;
