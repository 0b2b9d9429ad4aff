use std::thread;
use std::time::{Duration, Instant};

/// Default minimum spacing between card page requests.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(200);

/// Caller-side rate limit: enforces a minimum interval between calls to
/// [`Throttle::wait`].
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// A throttle that never sleeps.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until at least `interval` has passed since the previous call.
    /// The first call returns immediately.
    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_DELAY)
    }
}
