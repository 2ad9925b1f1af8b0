#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_BAUD_RATE: u32 = 115200;
pub const DEFAULT_SOURCE_ID: &str = "laser";

/// Connection settings read once when a session is opened.
///
/// Build it with the `with_*` methods before opening the session:
///
/// ```
/// use rplidar_data::SessionConfig;
///
/// let config = SessionConfig::default()
///     .with_baud_rate(256000)
///     .with_source_id("front_laser")
///     .with_scan_mode("Sensitivity");
/// assert_eq!(config.baud_rate, 256000);
/// assert_eq!(config.max_distance, None);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub baud_rate: u32,
    /// Label copied into every frame so consumers can tell sensors apart.
    pub source_id: String,
    /// Overrides the maximum distance of the chosen scan mode, in meters.
    pub max_distance: Option<f32>,
    /// Named scan mode. The sensor's typical mode is used when unset.
    pub scan_mode: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            baud_rate: DEFAULT_BAUD_RATE,
            source_id: DEFAULT_SOURCE_ID.to_string(),
            max_distance: None,
            scan_mode: None,
        }
    }
}

impl SessionConfig {
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = source_id.into();
        self
    }

    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    pub fn with_scan_mode(mut self, scan_mode: impl Into<String>) -> Self {
        self.scan_mode = Some(scan_mode.into());
        self
    }
}
