#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const SYNC_BIT: u8 = 0x01;

/// One raw measurement node as delivered by the sensor driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeasurementNode {
    /// Heading in degrees, fixed point with a 14-bit fraction (`raw * 90 / 16384`).
    pub angle_z_q14: u16,
    /// Distance in millimeters * 4. Zero means no return.
    pub dist_mm_q2: u32,
    /// Raw signal quality.
    pub quality: u8,
    /// Bit 0 marks the first node of a new revolution.
    pub flag: u8,
}

impl MeasurementNode {
    pub fn new(angle_z_q14: u16, dist_mm_q2: u32, quality: u8) -> Self {
        MeasurementNode {
            angle_z_q14,
            dist_mm_q2,
            quality,
            flag: 0,
        }
    }

    /// Marks this node as the start of a revolution.
    pub fn with_sync(mut self) -> Self {
        self.flag |= SYNC_BIT;
        self
    }

    pub fn is_sync(&self) -> bool {
        self.flag & SYNC_BIT != 0
    }

    /// `true` if the sensor measured a return for this node.
    pub fn has_return(&self) -> bool {
        self.dist_mm_q2 != 0
    }
}
