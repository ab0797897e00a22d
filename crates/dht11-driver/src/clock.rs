//! # Clocks
//!
//! The driver needs a monotonic microsecond clock to decide whether the
//! sensor had enough time to refresh its measurement since the last attempt.
//! Only differences between two readings of the clock are meaningful, so its
//! origin is arbitrary.

/// A monotonic clock with microsecond resolution.
pub trait MonotonicClock {
    /// Returns the microseconds elapsed since an arbitrary, fixed origin.
    ///
    /// Successive calls must never return a smaller value.
    fn now_micros(&self) -> u64;
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for &C {
    #[inline]
    fn now_micros(&self) -> u64 {
        (**self).now_micros()
    }
}

/// A [`MonotonicClock`] backed by [`std::time::Instant`].
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Creates a [`StdClock`] whose origin is the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl MonotonicClock for StdClock {
    fn now_micros(&self) -> u64 {
        // Saturates after roughly 584 thousand years.
        u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}

/// A [`MonotonicClock`] backed by the `embassy-time` driver of the platform.
#[cfg(feature = "embassy-time")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

#[cfg(feature = "embassy-time")]
impl MonotonicClock for EmbassyClock {
    #[inline]
    fn now_micros(&self) -> u64 {
        embassy_time::Instant::now().as_micros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use core::cell::Cell;

    struct FixedClock(Cell<u64>);

    impl MonotonicClock for FixedClock {
        fn now_micros(&self) -> u64 {
            self.0.get()
        }
    }

    #[test]
    fn test_reference_forwards_to_clock() {
        let clock = FixedClock(Cell::new(1_500));
        let by_ref = &clock;

        assert_eq!(by_ref.now_micros(), 1_500);
        clock.0.set(2_500);
        assert_eq!(MonotonicClock::now_micros(&by_ref), 2_500);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_std_clock_is_monotonic() {
        let clock = StdClock::new();

        let first = clock.now_micros();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = clock.now_micros();

        assert!(second >= first + 2_000);
    }
}
