#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Struct to hold one assembled revolution of lidar scan data.
///
/// `ranges` and `intensities` hold one entry per node of the burst the frame
/// was built from, including the nodes outside `[angle_min, angle_max]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanFrame {
    /// Starts at 0 and increases by one per frame of a session.
    pub sequence: u32,
    /// Label of the sensor the frame came from.
    pub source_id: String,
    /// Start of the capture in nanoseconds since the UNIX epoch.
    pub capture_time: u64,
    /// Time taken to capture the burst in nanoseconds.
    pub capture_duration: u64,
    /// Angle of the first valid sample in radian.
    pub angle_min: f64,
    /// Angle of the last valid sample in radian.
    pub angle_max: f64,
    pub angle_increment: f64,
    /// Minimum measurable range in meters.
    pub range_min: f32,
    /// Maximum measurable range in meters.
    pub range_max: f32,
    /// Range in meters. `f32::INFINITY` when the sensor saw no return.
    ///
    /// Serialized with `null` in place of infinity.
    #[cfg_attr(feature = "serde", serde(with = "no_return_as_null"))]
    pub ranges: Vec<f32>,
    pub intensities: Vec<u8>,
}

#[cfg(feature = "serde")]
mod no_return_as_null {
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ranges: &[f32], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(ranges.len()))?;
        for range in ranges {
            seq.serialize_element(&Some(*range).filter(|r| r.is_finite()))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f32>, D::Error> {
        let ranges = Vec::<Option<f32>>::deserialize(deserializer)?;
        Ok(ranges
            .into_iter()
            .map(|r| r.unwrap_or(f32::INFINITY))
            .collect())
    }
}

impl ScanFrame {
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Nanoseconds between two consecutive samples. Zero for frames with
    /// fewer than two samples.
    pub fn sample_interval(&self) -> f64 {
        match self.len() {
            0 | 1 => 0.,
            n => self.capture_duration as f64 / (n - 1) as f64,
        }
    }

    pub fn scan_time(&self) -> Duration {
        Duration::from_nanos(self.capture_duration)
    }
}

impl fmt::Display for ScanFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Seq: {}", self.sequence)?;
        writeln!(f, "Frame ID: {}", self.source_id)?;
        writeln!(f, "Timestamp [ns]: {}", self.capture_time)?;
        writeln!(f, "Scan Time [ns]: {}", self.capture_duration)?;
        for (i, (range, intensity)) in self.ranges.iter().zip(&self.intensities).enumerate() {
            let offset = self.angle_increment * i as f64;
            writeln!(f, "{}\t[{}, {}]", offset, range, intensity)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame() -> ScanFrame {
        ScanFrame {
            sequence: 3,
            source_id: "laser".to_string(),
            capture_time: 1_000,
            capture_duration: 300,
            angle_min: 0.,
            angle_max: 1.,
            angle_increment: 0.5,
            range_min: 0.15,
            range_max: 12.,
            ranges: vec![f32::INFINITY, 0.25, 1.5],
            intensities: vec![0, 10, 47],
        }
    }

    #[test]
    fn test_sample_interval() {
        let frame = frame();
        assert_eq!(frame.sample_interval(), 150.);
        assert_relative_eq!(
            frame.sample_interval() * (frame.len() - 1) as f64,
            frame.capture_duration as f64
        );
        assert_eq!(frame.scan_time(), Duration::from_nanos(300));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_keeps_missing_returns() {
        let json = serde_json::to_string(&frame()).unwrap();
        assert!(json.contains(r#""ranges":[null,0.25,1.5]"#));
        let decoded: ScanFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, frame());
    }

    #[test]
    fn test_display() {
        let expected = "Seq: 3\n\
                        Frame ID: laser\n\
                        Timestamp [ns]: 1000\n\
                        Scan Time [ns]: 300\n\
                        0\t[inf, 0]\n\
                        0.5\t[0.25, 10]\n\
                        1\t[1.5, 47]\n";
        assert_eq!(frame().to_string(), expected);
    }
}
