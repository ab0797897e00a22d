//! # Reading cache
//!
//! The sensor refreshes its measurement about once per second, so the driver
//! remembers its last attempt and answers from memory until
//! [`REFRESH_PERIOD_US`] has elapsed. An attempt is timed from its start,
//! and failures are cached like successes: a failing sensor is retried at
//! the same pace as a healthy one.

use crate::reading::Reading;
use crate::timing::REFRESH_PERIOD_US;

#[derive(Debug, Clone, Copy)]
struct Attempt {
    started_us: u64,
    reading: Reading,
}

#[derive(Debug)]
pub(crate) struct ReadingCache {
    // `None` until the first attempt, so that it always reaches the sensor.
    last: Option<Attempt>,
}

impl ReadingCache {
    pub(crate) const fn new() -> Self {
        Self { last: None }
    }

    /// Returns the cached reading if the last attempt is too recent to
    /// trigger a new one.
    pub(crate) fn throttled(&self, now_us: u64) -> Option<Reading> {
        let last = self.last?;

        // A clock running backwards saturates to zero and keeps throttling.
        (now_us.saturating_sub(last.started_us) < REFRESH_PERIOD_US).then_some(last.reading)
    }

    /// Replaces the attempt time and the reading together.
    pub(crate) fn record(&mut self, started_us: u64, reading: Reading) {
        self.last = Some(Attempt {
            started_us,
            reading,
        });
    }

    pub(crate) fn last_reading(&self) -> Option<Reading> {
        self.last.map(|attempt| attempt.reading)
    }
}
