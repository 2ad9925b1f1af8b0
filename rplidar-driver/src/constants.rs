/// Number of nodes requested from the driver per grab.
pub(crate) const BURST_CAPACITY: usize = 360 * 8;
/// Closest distance the sensor can measure, in meters.
pub(crate) const RANGE_MIN: f32 = 0.15;
/// Fixed point scale of `angle_z_q14`: this many raw units make 90 degrees.
pub(crate) const ANGLE_Q14_UNITS_PER_90_DEGREES: f64 = 16384.;
/// Wait time of the session worker when a poll yields nothing.
pub(crate) const POLL_BACKOFF_MS: u64 = 10;
/// Capacity of the frame channel of the session worker.
pub(crate) const FRAME_CHANNEL_SIZE: usize = 10;
// CP210x USB to UART bridge shipped with the sensors
pub(crate) const SENSOR_BRIDGE_VID: u16 = 0x10C4;
pub(crate) const SENSOR_BRIDGE_PID: u16 = 0xEA60;
