//! # Errors
//!
//! Failures raised while exchanging a frame with the sensor. The driver
//! folds protocol failures into readings and hands pin errors back.

use core::fmt;

use crate::frame::ChecksumMismatch;

/// Phase of the protocol in which a timeout occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    /// The sensor did not release its low acknowledgement pulse.
    HandshakeLow,
    /// The sensor did not end its high acknowledgement pulse.
    HandshakeHigh,
    /// The low pulse preceding the data bit with the given index did not end.
    BitLow(usize),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HandshakeLow => f.write_str("handshake low pulse"),
            Self::HandshakeHigh => f.write_str("handshake high pulse"),
            Self::BitLow(bit) => write!(f, "low pulse of bit {bit}"),
        }
    }
}

/// Errors that may occur when interacting with the `DHT11` sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dht11Error<E> {
    /// GPIO pin errors.
    Pin(E),
    /// Timeout waiting for the sensor.
    Timeout(Phase),
    /// Data checksum mismatch.
    ChecksumMismatch(ChecksumMismatch),
}

impl<E> From<E> for Dht11Error<E> {
    fn from(e: E) -> Self {
        Dht11Error::Pin(e)
    }
}
