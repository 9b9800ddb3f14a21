use std::cell::Cell;
use std::time::Duration;

/// Where animation delays go.
///
/// Real runs sleep the thread; tests use `ManualClock` so multi-second animations finish
/// instantly while still recording how long they would have taken.
pub trait Clock {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// A clock that never blocks; it only accumulates the requested delays.
#[derive(Debug, Default)]
pub struct ManualClock {
    elapsed: Cell<Duration>,
    sleeps: Cell<usize>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }

    /// Number of non-zero sleeps requested so far.
    pub fn sleeps(&self) -> usize {
        self.sleeps.get()
    }
}

impl Clock for ManualClock {
    fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        self.elapsed.set(self.elapsed.get().saturating_add(duration));
        self.sleeps.set(self.sleeps.get() + 1);
    }
}
