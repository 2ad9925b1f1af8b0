use crate::constants::ANGLE_Q14_UNITS_PER_90_DEGREES;

pub(crate) fn degree_to_radian(degree: f64) -> f64 {
    degree * std::f64::consts::PI / 180.
}

pub(crate) fn to_angle(angle_z_q14: u16) -> f64 {
    (angle_z_q14 as f64) * 90. / ANGLE_Q14_UNITS_PER_90_DEGREES
}

/// Converts a quarter-millimeter distance to meters. Zero becomes infinity.
pub(crate) fn to_range(dist_mm_q2: u32) -> f32 {
    if dist_mm_q2 == 0 {
        return f32::INFINITY;
    }
    (dist_mm_q2 as f32) / 4. / 1000.
}

pub(crate) fn to_intensity(quality: u8) -> u8 {
    quality >> 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_to_angle() {
        assert_eq!(to_angle(0), 0.);
        assert_eq!(to_angle(16384), 90.);
        assert_eq!(to_angle(8192), 45.);
        assert_relative_eq!(degree_to_radian(to_angle(16384)), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(degree_to_radian(to_angle(16384 * 2)), std::f64::consts::PI);
    }

    #[test]
    fn test_to_range() {
        assert_eq!(to_range(0), f32::INFINITY);
        assert_eq!(to_range(4), 0.001);
        assert_eq!(to_range(100), 0.025);
        assert_eq!(to_range(4000), 1.);
        assert_relative_eq!(to_range(48000), 12.);
    }

    #[test]
    fn test_to_intensity() {
        assert_eq!(to_intensity(40), 10);
        assert_eq!(to_intensity(47), 11);
        assert_eq!(to_intensity(3), 0);
        assert_eq!(to_intensity(255), 63);
    }
}
