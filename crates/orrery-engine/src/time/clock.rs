use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic elapsed-time source.
///
/// Implementations start at `0.0` when constructed and never go backward.
pub trait Clock {
    /// Seconds elapsed since the clock was created.
    fn elapsed_seconds(&self) -> f64;
}

/// Wall-clock backed [`Clock`].
///
/// Unlike a frame clock there is no `reset`: the origin is fixed for the lifetime
/// of the value, so every reading is relative to the same instant.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a clock whose origin is now.
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn elapsed_seconds(&self) -> f64 {
        Instant::now()
            .saturating_duration_since(self.origin)
            .as_secs_f64()
    }
}

/// Hand-driven [`Clock`] for deterministic stepping.
///
/// Clones share the same underlying time, so a test can keep one handle and give
/// another to the loop. Time only moves forward; backward moves are ignored.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `seconds`. Negative or non-finite steps are ignored.
    pub fn advance(&self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            self.now.set(self.now.get() + seconds);
        }
    }

    /// Jumps to an absolute time, provided it is not earlier than the current one.
    pub fn set(&self, seconds: f64) {
        if seconds.is_finite() && seconds >= self.now.get() {
            self.now.set(seconds);
        }
    }
}

impl Clock for ManualClock {
    fn elapsed_seconds(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    // ── MonotonicClock ────────────────────────────────────────────────────

    #[test]
    fn monotonic_starts_near_zero() {
        let clock = MonotonicClock::new();
        assert!(clock.elapsed_seconds() < 0.05);
    }

    #[test]
    fn monotonic_never_goes_backward() {
        let clock = MonotonicClock::new();
        let mut last = clock.elapsed_seconds();
        for _ in 0..100 {
            let now = clock.elapsed_seconds();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn monotonic_measures_sleep() {
        let clock = MonotonicClock::new();
        thread::sleep(Duration::from_millis(10));
        assert!(clock.elapsed_seconds() >= 0.009);
    }

    // ── ManualClock ───────────────────────────────────────────────────────

    #[test]
    fn manual_starts_at_zero() {
        assert_eq!(ManualClock::new().elapsed_seconds(), 0.0);
    }

    #[test]
    fn manual_clones_share_time() {
        let a = ManualClock::new();
        let b = a.clone();
        a.advance(1.5);
        assert_eq!(b.elapsed_seconds(), 1.5);
    }

    #[test]
    fn manual_ignores_backward_moves() {
        let clock = ManualClock::new();
        clock.set(10.0);
        clock.set(4.0);
        clock.advance(-2.0);
        clock.advance(f64::NAN);
        assert_eq!(clock.elapsed_seconds(), 10.0);
    }
}
