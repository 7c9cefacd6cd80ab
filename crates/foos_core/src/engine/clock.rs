//! Time source for debounce, celebration and reset timing.
//!
//! All delays in the engine are blocking and strictly sequential. On a
//! real table `SystemClock` sleeps the thread; on a host `ManualClock`
//! just advances a counter so a whole match runs instantly and
//! deterministically.

use std::time::{Duration, Instant};

/// Milliseconds since the clock was created.
pub type Millis = u64;

pub trait Clock {
    fn now_ms(&self) -> Millis;

    /// Block for `ms` milliseconds.
    fn delay_ms(&mut self, ms: Millis);
}

/// Wall-clock time backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    started: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self { started: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.started.elapsed().as_millis() as Millis
    }

    fn delay_ms(&mut self, ms: Millis) {
        if ms > 0 {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }
}

/// Simulated time. `delay_ms` returns immediately after advancing `now`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: Millis,
    /// Total time spent blocked in `delay_ms`
    slept: Millis,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward without counting it as a delay (e.g. a slow sensor read).
    pub fn advance(&mut self, ms: Millis) {
        self.now = self.now.saturating_add(ms);
    }

    pub fn total_delay_ms(&self) -> Millis {
        self.slept
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now
    }

    fn delay_ms(&mut self, ms: Millis) {
        self.now = self.now.saturating_add(ms);
        self.slept = self.slept.saturating_add(ms);
    }
}
