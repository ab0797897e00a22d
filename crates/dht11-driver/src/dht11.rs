//! # DHT11 Driver
//!
//! This module provides an architecture-agnostic driver for the `DHT11`
//! temperature and humidity sensor.
//! The driver is synchronous to meet the strict timing requirements of the
//! sensor's single-wire protocol. Only the boot delay performed at
//! initialization, which is not timing-critical, has an asynchronous
//! variant that does not block the executor.
//!
//! The `DHT11` sensor provides the following measurements:
//! - **Humidity**: Relative humidity as a percentage (% RH), integer
//! - **Temperature**: Temperature in degrees Celsius (°C), integer
//!
//! A driver instance owns its data line for its whole lifetime, so at most
//! one read can be in flight per sensor. Sharing a sensor between tasks
//! requires an external mutex around the driver.
//!
//! For detailed specifications, refer to the
//! [datasheet](https://www.alldatasheet.com/datasheet-pdf/pdf/1440068/ETC/DHT11.html)
//! and the description of the proprietary
//! [communication protocol](https://www.ocfreaks.com/basics-interfacing-dht11-dht22-humidity-temperature-sensor-mcu/).

use core::result::Result::{self, Err, Ok};

use embedded_hal::delay::DelayNs as SyncDelay;

#[cfg(feature = "async")]
use embedded_hal_async::delay::DelayNs as AsyncDelay;

use log::{debug, warn};

use crate::cache::ReadingCache;
use crate::clock::MonotonicClock;
use crate::error::Dht11Error;
use crate::line::DataLine;
use crate::protocol::Transceiver;
use crate::reading::Reading;
use crate::timing::BOOT_DELAY_MS;

/// The `DHT11` driver.
pub struct Dht11<P, D, C>
where
    P: DataLine,
    D: SyncDelay,
    C: MonotonicClock,
{
    transceiver: Transceiver<P, D>,
    clock: C,
    cache: ReadingCache,
}

impl<P, D, C> Dht11<P, D, C>
where
    P: DataLine,
    D: SyncDelay,
    C: MonotonicClock,
{
    /// Creates a [`Dht11`] driver bound to the given data line.
    ///
    /// Blocks for [`BOOT_DELAY_MS`] first, so that a sensor powered up at
    /// the same time has finished booting when the first read happens.
    #[must_use]
    pub fn initialize(line: P, delay: D, clock: C) -> Self {
        let mut dht11 = Self::bind(line, delay, clock);
        dht11.transceiver.delay_ms(BOOT_DELAY_MS);
        dht11
    }

    /// Reads a humidity and temperature measurement.
    ///
    /// If less than [`REFRESH_PERIOD_US`](crate::timing::REFRESH_PERIOD_US)
    /// elapsed since the previous attempt, the line is left untouched and
    /// the result of that attempt is returned again, whether it succeeded or
    /// not. Otherwise, a new exchange with the sensor takes place and its
    /// result replaces the cached one.
    ///
    /// Protocol failures are reported as [`Reading::TimeoutError`] and
    /// [`Reading::ChecksumError`].
    ///
    /// # Errors
    ///
    /// Returns an error if accessing the data line fails. The attempt is
    /// then cached as a [`Reading::TimeoutError`], which later calls return
    /// until the refresh period has elapsed.
    pub fn read(&mut self) -> Result<Reading, P::Error> {
        let now_us = self.clock.now_micros();

        if let Some(reading) = self.cache.throttled(now_us) {
            debug!("DHT11 read throttled, returning the cached reading");
            return Ok(reading);
        }

        let reading = match self.transceiver.measure() {
            Ok(measurement) => {
                debug!("DHT11 measurement: {measurement}");
                Reading::Ok(measurement)
            }
            Err(Dht11Error::Timeout(phase)) => {
                warn!("DHT11 timed out waiting for the {phase}");
                Reading::TimeoutError
            }
            Err(Dht11Error::ChecksumMismatch(mismatch)) => {
                warn!("DHT11 frame rejected: {mismatch}");
                Reading::ChecksumError
            }
            Err(Dht11Error::Pin(e)) => {
                warn!("DHT11 line access failed, caching a timeout");
                self.cache.record(now_us, Reading::TimeoutError);
                return Err(e);
            }
        };

        self.cache.record(now_us, reading);

        Ok(reading)
    }

    /// Returns the last cached reading, without accessing the sensor.
    ///
    /// Returns `None` if no read attempt has produced a reading yet.
    #[must_use]
    pub fn last_reading(&self) -> Option<Reading> {
        self.cache.last_reading()
    }

    /// Releases the data line, the delay provider and the clock.
    #[must_use]
    pub fn release(self) -> (P, D, C) {
        let (line, delay) = self.transceiver.into_parts();
        (line, delay, self.clock)
    }

    const fn bind(line: P, delay: D, clock: C) -> Self {
        Self {
            transceiver: Transceiver::new(line, delay),
            clock,
            cache: ReadingCache::new(),
        }
    }
}

#[cfg(feature = "async")]
impl<P, D, C> Dht11<P, D, C>
where
    P: DataLine,
    D: SyncDelay + AsyncDelay,
    C: MonotonicClock,
{
    /// Creates a [`Dht11`] driver bound to the given data line, waiting
    /// asynchronously for [`BOOT_DELAY_MS`] first.
    pub async fn initialize_async(line: P, mut delay: D, clock: C) -> Self {
        AsyncDelay::delay_ms(&mut delay, BOOT_DELAY_MS).await;
        Self::bind(line, delay, clock)
    }
}
