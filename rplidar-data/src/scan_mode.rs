#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A scan mode advertised by the sensor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanMode {
    pub id: u16,
    /// Name reported by the firmware, e.g. `Standard`, `Express`, `Boost`.
    pub name: String,
    /// Maximum measurable distance in meters.
    pub max_distance: f32,
    /// Time spent on a single sample in microseconds.
    pub us_per_sample: f32,
}

impl ScanMode {
    /// Thousands of samples per second.
    pub fn k_samples_per_second(&self) -> f32 {
        1000. / self.us_per_sample
    }
}
