//! Monotonic Timing
//!
//! Wall-clock measurement for trials, expressed in seconds as `f64`.
//! The [`Clock`] trait lets the executor be driven by a scripted clock
//! in tests; [`MonotonicClock`] is the real implementation over
//! `std::time::Instant`.

/// Source of monotonic timestamps.
pub trait Clock {
    /// Monotonic timestamp in seconds from an arbitrary fixed epoch.
    fn now(&self) -> f64;

    /// Seconds elapsed between two timestamps from this clock.
    fn elapsed(&self, t0: f64, t1: f64) -> f64 {
        t1 - t0
    }
}

/// Monotonic wall clock anchored at creation time.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: std::time::Instant,
}

impl MonotonicClock {
    /// Create a clock anchored at the current instant.
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }
}

/// Timer for measuring a single trial against a [`Clock`].
pub struct Timer<'c, C: Clock> {
    clock: &'c C,
    start: f64,
}

impl<'c, C: Clock> Timer<'c, C> {
    /// Start a new timer.
    #[inline]
    pub fn start(clock: &'c C) -> Self {
        Self {
            clock,
            start: clock.now(),
        }
    }

    /// Stop the timer and return elapsed seconds.
    #[inline]
    pub fn stop(self) -> f64 {
        self.clock.elapsed(self.start, self.clock.now())
    }
}

/// Pin the current thread to a specific core.
///
/// Avoids core migrations that add noise to wall-clock measurements.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    use std::mem::MaybeUninit;

    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();

        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        let result = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref);

        if result == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// Pin the current thread to a specific core (unsupported platform: no-op).
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(_cpu: usize) -> Result<(), std::io::Error> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn monotonic_clock_advances() {
        let clock = MonotonicClock::new();
        let t0 = clock.now();
        std::thread::sleep(Duration::from_millis(10));
        let t1 = clock.now();
        assert!(clock.elapsed(t0, t1) >= 0.005);
    }

    #[test]
    fn timer_measures_sleep() {
        let clock = MonotonicClock::new();
        let timer = Timer::start(&clock);
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = timer.stop();
        assert!(elapsed >= 0.005);
        assert!(elapsed < 1.0);
    }
}
