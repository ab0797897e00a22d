//! # Readings
//!
//! The outcome of a read attempt. Failures are ordinary values: a sensor
//! that stops answering or sends corrupted frames simply keeps producing
//! [`Reading::TimeoutError`] or [`Reading::ChecksumError`], and the caller
//! decides how many consecutive failures make a fault.

use core::fmt;

/// Value of [`Reading::temperature`] and [`Reading::humidity`] after a
/// timeout.
pub const TIMEOUT_SENTINEL: i16 = -100;
/// Value of [`Reading::temperature`] and [`Reading::humidity`] after a
/// checksum mismatch.
pub const CHECKSUM_SENTINEL: i16 = -200;

/// A humidity and temperature measurement, in the integer encoding sent by
/// the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Temperature in degrees Celsius (°C).
    pub temperature: u8,
    /// Relative humidity as a percentage (% RH).
    pub humidity: u8,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "humidity {} %RH, temperature {} °C",
            self.humidity, self.temperature
        )
    }
}

/// Status of a [`Reading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The frame was received and validated.
    Ok,
    /// An expected edge did not occur in time.
    TimeoutError,
    /// The frame checksum did not match its payload.
    ChecksumError,
}

/// The result of a read attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    /// A valid measurement.
    Ok(Measurement),
    /// An expected edge did not occur in time.
    TimeoutError,
    /// The frame checksum did not match its payload.
    ChecksumError,
}

impl Reading {
    /// Returns the [`Status`] of the reading.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::Ok(_) => Status::Ok,
            Self::TimeoutError => Status::TimeoutError,
            Self::ChecksumError => Status::ChecksumError,
        }
    }

    /// Returns the measurement, if the reading is valid.
    #[must_use]
    pub const fn measurement(&self) -> Option<Measurement> {
        match self {
            Self::Ok(measurement) => Some(*measurement),
            Self::TimeoutError | Self::ChecksumError => None,
        }
    }

    /// Checks whether the reading carries a valid measurement.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns the temperature, or the sentinel matching the failure.
    ///
    /// Sentinels are negative, so they never collide with a temperature
    /// sent by the sensor.
    #[must_use]
    pub const fn temperature(&self) -> i16 {
        match self {
            Self::Ok(measurement) => measurement.temperature as i16,
            _ => self.sentinel(),
        }
    }

    /// Returns the relative humidity, or the sentinel matching the failure.
    ///
    /// Sentinels are negative, so they never collide with a humidity sent
    /// by the sensor.
    #[must_use]
    pub const fn humidity(&self) -> i16 {
        match self {
            Self::Ok(measurement) => measurement.humidity as i16,
            _ => self.sentinel(),
        }
    }

    const fn sentinel(&self) -> i16 {
        match self {
            Self::ChecksumError => CHECKSUM_SENTINEL,
            _ => TIMEOUT_SENTINEL,
        }
    }
}

impl From<Measurement> for Reading {
    fn from(measurement: Measurement) -> Self {
        Self::Ok(measurement)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok(measurement) => fmt::Display::fmt(measurement, f),
            Self::TimeoutError => f.write_str("timed out waiting for the sensor"),
            Self::ChecksumError => f.write_str("corrupted frame"),
        }
    }
}
