use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

pub(crate) fn sleep_ms(duration: u64) {
    std::thread::sleep(Duration::from_millis(duration));
}

fn to_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

/// Time interval during which a burst was physically captured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureWindow {
    /// Nanoseconds since the UNIX epoch.
    pub start_ns: u64,
    pub duration_ns: u64,
}

impl CaptureWindow {
    pub fn new(start_ns: u64, duration_ns: u64) -> Self {
        CaptureWindow {
            start_ns,
            duration_ns,
        }
    }

    pub fn end_ns(&self) -> u64 {
        self.start_ns.saturating_add(self.duration_ns)
    }
}

/// Wall clock start paired with a monotonic clock for the elapsed time.
pub(crate) struct CaptureTimer {
    started_at: SystemTime,
    started: Instant,
}

impl CaptureTimer {
    pub(crate) fn start() -> Self {
        CaptureTimer {
            started_at: SystemTime::now(),
            started: Instant::now(),
        }
    }

    pub(crate) fn finish(self) -> CaptureWindow {
        let start = self.started_at.duration_since(UNIX_EPOCH).unwrap_or_default();
        CaptureWindow::new(to_nanos(start), to_nanos(self.started.elapsed()))
    }
}
