use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(1);

/// Fixed one-second window message counter for a single connection.
#[derive(Debug)]
pub struct RateLimiter {
    max_per_window: u32,
    window_start: Instant,
    count: u32,
}

impl RateLimiter {
    pub fn new(max_per_second: u32) -> Self {
        Self::starting_at(max_per_second, Instant::now())
    }

    /// A limiter whose first window opens at `start`.
    pub fn starting_at(max_per_second: u32, start: Instant) -> Self {
        Self {
            max_per_window: max_per_second,
            window_start: start,
            count: 0,
        }
    }

    /// Count one message at `now`; `false` if it is over the limit.
    pub fn allow(&mut self, now: Instant) -> bool {
        if now.duration_since(self.window_start) >= WINDOW {
            self.window_start = now;
            self.count = 0;
        }
        self.count += 1;
        self.count <= self.max_per_window
    }
}
