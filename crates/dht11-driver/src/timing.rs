//! # Timing
//!
//! Timing constants of the `DHT11` single-wire protocol and the timed edge
//! detector that measures its pulses.
//!
//! The detector busy-polls the line once per microsecond. No interrupt or
//! timer capture is involved, so the measurement is only accurate as long as
//! the calling context is not preempted while a read is in flight.

use core::result::Result::{self, Ok};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, PinState};

/// Time the sensor needs after power-up before it accepts a start pulse.
pub const BOOT_DELAY_MS: u32 = 1000;
/// Minimum time between two start pulses.
///
/// The sensor refreshes its measurement about once per second; this leaves
/// a generous margin on top of that.
pub const REFRESH_PERIOD_US: u64 = 2_000_000;

/// Host pulls the line low for this long to request a measurement.
pub const START_LOW_MS: u32 = 20;
/// Host then drives the line high for this long before releasing it.
pub const START_HIGH_US: u32 = 40;
/// Maximum duration of each of the two handshake pulses sent by the sensor.
pub const HANDSHAKE_TIMEOUT_US: u16 = 80;
/// Maximum duration of the low pulse that precedes every data bit.
pub const BIT_LOW_TIMEOUT_US: u16 = 50;
/// Maximum duration of the high pulse that carries every data bit.
pub const BIT_HIGH_TIMEOUT_US: u16 = 70;
/// A high pulse longer than this encodes a 1, otherwise a 0.
///
/// The sensor sends ~26-28 µs for a 0 and ~70 µs for a 1.
pub const BIT_ONE_THRESHOLD_US: u32 = 28;

const POLL_INTERVAL_US: u32 = 1;

/// Outcome of waiting for the line to leave a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    /// The level changed after the given number of microseconds.
    Elapsed(u32),
    /// The level was still held when the timeout expired.
    Timeout,
}

impl Wait {
    /// Decodes the data bit carried by a high pulse of this duration.
    ///
    /// A pulse that outlived [`BIT_HIGH_TIMEOUT_US`] is longer than any
    /// 0-bit, so it decodes as a 1. A frame corrupted that way is rejected
    /// by the checksum.
    #[must_use]
    #[inline]
    pub const fn data_bit(self) -> bool {
        match self {
            Self::Elapsed(us) => us > BIT_ONE_THRESHOLD_US,
            Self::Timeout => true,
        }
    }
}

/// Measures how long a line holds a level, polling once per microsecond.
pub struct EdgeDetector<P, D> {
    line: P,
    delay: D,
}

impl<P, D> EdgeDetector<P, D>
where
    P: InputPin,
    D: DelayNs,
{
    /// Creates an [`EdgeDetector`] for the given line and delay provider.
    #[must_use]
    pub const fn new(line: P, delay: D) -> Self {
        Self { line, delay }
    }

    /// Waits while the line holds `held`, for at most `timeout_us`
    /// microseconds.
    ///
    /// The line is sampled once per microsecond. Every sample that still
    /// reads `held` advances the counter by one; the sample that reads the
    /// other level ends the wait and is not counted. The wait times out on
    /// the first held sample taken once the counter *exceeds* `timeout_us`,
    /// so a pulse of exactly `timeout_us + 1` samples is still measured.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the line fails.
    pub fn wait_for_level_change(
        &mut self,
        timeout_us: u16,
        held: PinState,
    ) -> Result<Wait, P::Error> {
        let timeout_us = u32::from(timeout_us);
        let mut elapsed = 0;

        while self.is_at(held)? {
            if elapsed > timeout_us {
                return Ok(Wait::Timeout);
            }
            elapsed += 1;
            self.delay.delay_us(POLL_INTERVAL_US);
        }

        Ok(Wait::Elapsed(elapsed))
    }

    /// Blocks for the given number of microseconds.
    #[inline]
    pub fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    /// Blocks for the given number of milliseconds.
    #[inline]
    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Returns a mutable reference to the line.
    #[inline]
    pub fn line_mut(&mut self) -> &mut P {
        &mut self.line
    }

    /// Returns the line and the delay provider.
    #[must_use]
    pub fn into_parts(self) -> (P, D) {
        (self.line, self.delay)
    }

    #[inline]
    fn is_at(&mut self, level: PinState) -> Result<bool, P::Error> {
        match level {
            PinState::High => self.line.is_high(),
            PinState::Low => self.line.is_low(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern crate std;
    use std::vec;
    use std::vec::Vec;

    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};

    use crate::waveform;

    fn pulse(level: State, held: usize) -> Vec<PinTransaction> {
        let mut expectations = Vec::new();
        waveform::pulse(&mut expectations, level, held);
        expectations
    }

    fn detector(expectations: &[PinTransaction]) -> EdgeDetector<PinMock, NoopDelay> {
        EdgeDetector::new(PinMock::new(expectations), NoopDelay::new())
    }

    #[test]
    fn test_immediate_change_takes_no_time() {
        let mut edges = detector(&pulse(State::High, 0));

        let wait = edges.wait_for_level_change(10, PinState::High).unwrap();
        assert_eq!(wait, Wait::Elapsed(0));

        edges.into_parts().0.done();
    }

    #[test]
    fn test_elapsed_counts_held_samples() {
        let mut edges = detector(&pulse(State::Low, 23));

        let wait = edges.wait_for_level_change(50, PinState::Low).unwrap();
        assert_eq!(wait, Wait::Elapsed(23));

        edges.into_parts().0.done();
    }

    #[test]
    fn test_pulse_shorter_than_timeout_is_measured() {
        let mut edges = detector(&pulse(State::High, 4));

        let wait = edges.wait_for_level_change(5, PinState::High).unwrap();
        assert_eq!(wait, Wait::Elapsed(4));

        edges.into_parts().0.done();
    }

    #[test]
    fn test_timeout_boundary_is_strict() {
        // The counter reaches the timeout without exceeding it.
        let mut edges = detector(&pulse(State::High, 6));

        let wait = edges.wait_for_level_change(5, PinState::High).unwrap();
        assert_eq!(wait, Wait::Elapsed(6));

        edges.into_parts().0.done();
    }

    #[test]
    fn test_timeout_when_level_is_held() {
        // The 7th held sample finds the counter above the timeout.
        let expectations = vec![PinTransaction::get(State::High); 7];
        let mut edges = detector(&expectations);

        let wait = edges.wait_for_level_change(5, PinState::High).unwrap();
        assert_eq!(wait, Wait::Timeout);

        edges.into_parts().0.done();
    }

    #[test]
    fn test_bit_low_timeout_boundary() {
        let held = usize::from(BIT_LOW_TIMEOUT_US);

        // 51 held samples: the counter reaches 51 only after the last check.
        let mut edges = detector(&pulse(State::Low, held + 1));
        assert_eq!(
            edges.wait_for_level_change(BIT_LOW_TIMEOUT_US, PinState::Low).unwrap(),
            Wait::Elapsed(51)
        );
        edges.into_parts().0.done();

        // 52 held samples: the last one finds the counter at 51.
        let expectations = vec![PinTransaction::get(State::Low); held + 2];
        let mut edges = detector(&expectations);
        assert_eq!(
            edges.wait_for_level_change(BIT_LOW_TIMEOUT_US, PinState::Low).unwrap(),
            Wait::Timeout
        );
        edges.into_parts().0.done();
    }

    #[test]
    fn test_zero_timeout() {
        let mut edges = detector(&pulse(State::Low, 1));
        assert_eq!(
            edges.wait_for_level_change(0, PinState::Low).unwrap(),
            Wait::Elapsed(1)
        );
        edges.into_parts().0.done();

        let expectations = vec![PinTransaction::get(State::Low); 2];
        let mut edges = detector(&expectations);
        assert_eq!(
            edges.wait_for_level_change(0, PinState::Low).unwrap(),
            Wait::Timeout
        );
        edges.into_parts().0.done();
    }

    #[test]
    fn test_data_bit_threshold() {
        assert!(!Wait::Elapsed(0).data_bit());
        assert!(!Wait::Elapsed(26).data_bit());
        assert!(!Wait::Elapsed(28).data_bit());
        assert!(Wait::Elapsed(29).data_bit());
        assert!(Wait::Elapsed(70).data_bit());
        assert!(Wait::Timeout.data_bit());
    }
}
