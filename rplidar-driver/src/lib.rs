mod constants;
pub mod discovery;
mod driver;
mod driver_threads;
mod error;
mod guard;
mod numeric;
mod scan;
mod session;
pub mod sim;
mod time;

pub use crate::driver::{LidarDriver, ScanRequest};
pub use crate::driver_threads::{join, run_session, SessionThread};
pub use crate::error::{DriverFault, RPLidarError};
pub use crate::scan::{assemble, FrameContext};
pub use crate::session::{check_device_health, get_device_info, DeviceSession, RawBurst};
pub use crate::time::CaptureWindow;
pub use rplidar_data::{
    DeviceHealth, DeviceInfo, HealthStatus, MeasurementNode, ScanFrame, ScanMode, SessionConfig,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Revolution, SimulatedDriver};
    use approx::assert_relative_eq;
    use std::time::Duration;

    #[test]
    fn test_simulated_revolutions() {
        let revolution = Revolution {
            n_nodes: 360,
            wall_distance: 1.5,
            quality: 120,
            seam: 3,
            period: Duration::from_millis(2),
        };
        let driver = SimulatedDriver::new().with_revolution(revolution);
        let config = SessionConfig::default().with_source_id("laser_frame");
        let mut session = DeviceSession::open(driver, "/dev/ttyUSB0", config).unwrap();

        for expected_sequence in 0..3 {
            let scan = session.poll().unwrap();
            assert_eq!(scan.sequence, expected_sequence);
            assert_eq!(scan.source_id, "laser_frame");
            assert_eq!(scan.ranges.len(), 360);
            assert_eq!(scan.intensities.len(), 360);
            assert!(scan.angle_max >= scan.angle_min);
            assert!(scan.capture_duration >= 2_000_000);
            assert_eq!(scan.sample_interval(), scan.capture_duration as f64 / 359.);

            // seam nodes carry no return but keep their slots
            assert_eq!(scan.ranges[..3], [f32::INFINITY; 3]);
            assert_eq!(scan.ranges[357..], [f32::INFINITY; 3]);
            assert!(scan.ranges[3..357]
                .iter()
                .all(|r| (1.5..=1.5 * std::f32::consts::SQRT_2 + 1e-3).contains(r)));
            assert!(scan.intensities.iter().all(|i| *i == 30));

            // first node with a return sits at 3 degrees
            assert_relative_eq!(scan.angle_min, 3f64.to_radians(), epsilon = 1e-3);
        }
    }

    #[test]
    fn test_open_from_json_config() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"source_id": "rear", "scan_mode": "Express"}"#).unwrap();
        let revolution = Revolution {
            period: Duration::ZERO,
            ..Revolution::default()
        };
        let driver = SimulatedDriver::new().with_revolution(revolution);
        let mut session = DeviceSession::open(driver, "/dev/ttyUSB0", config).unwrap();
        assert_eq!(session.scan_mode().name, "Express");
        assert_eq!(session.config().baud_rate, 115200);

        let scan = session.poll().unwrap();
        let json = serde_json::to_value(&scan).unwrap();
        assert_eq!(json["source_id"], "rear");
        assert_eq!(json["sequence"], 0);
        assert_eq!(json["ranges"].as_array().map(Vec::len), Some(720));
        assert!(json["ranges"][0].is_null());

        let decoded: ScanFrame = serde_json::from_str(&json.to_string()).unwrap();
        assert_eq!(decoded.sequence, scan.sequence);
        assert_eq!(decoded.capture_time, scan.capture_time);
        assert_eq!(decoded.intensities, scan.intensities);
        assert_relative_eq!(decoded.angle_min, scan.angle_min);
        assert_relative_eq!(decoded.angle_max, scan.angle_max);
        assert_eq!(decoded.ranges.len(), scan.ranges.len());
        for (restored, range) in decoded.ranges.iter().zip(&scan.ranges) {
            match range.is_finite() {
                true => assert_relative_eq!(*restored, *range),
                false => assert_eq!(*restored, f32::INFINITY),
            }
        }
    }

    #[test]
    fn test_display_has_one_line_per_sample() {
        let revolution = Revolution {
            n_nodes: 16,
            period: Duration::ZERO,
            ..Revolution::default()
        };
        let driver = SimulatedDriver::new().with_revolution(revolution);
        let mut session =
            DeviceSession::open(driver, "/dev/ttyUSB0", SessionConfig::default()).unwrap();
        let text = session.poll().unwrap().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4 + 16);
        assert_eq!(lines[0], "Seq: 0");
        assert_eq!(lines[1], "Frame ID: laser");
        assert!(lines[2].starts_with("Timestamp [ns]: "));
        assert!(lines[3].starts_with("Scan Time [ns]: "));
        assert_eq!(lines[4], "0\t[inf, 47]");
    }
}
