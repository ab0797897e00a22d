//! # Raw frames
//!
//! A `DHT11` transmission carries 40 bits, most significant bit first,
//! grouped into 5 bytes:
//!
//! | Byte | Content                        |
//! |------|--------------------------------|
//! | 0    | Humidity, integral part (% RH) |
//! | 1    | Humidity, fractional part      |
//! | 2    | Temperature, integral part (°C)|
//! | 3    | Temperature, fractional part   |
//! | 4    | Checksum                       |
//!
//! The fractional parts are always zero on a `DHT11`. The checksum is the
//! low 8 bits of the sum of the first four bytes.

use core::fmt;
use core::result::Result::{self, Err, Ok};

use crate::reading::Measurement;

/// Number of bytes in a frame.
pub const FRAME_BYTES: usize = 5;
/// Number of bits in a frame.
pub const FRAME_BITS: usize = FRAME_BYTES * 8;

/// The checksum carried by a frame disagrees with its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumMismatch {
    /// Checksum byte sent by the sensor.
    pub received: u8,
    /// Checksum computed from the payload bytes.
    pub computed: u8,
}

impl fmt::Display for ChecksumMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "checksum mismatch (received {:#04x}, computed {:#04x})",
            self.received, self.computed
        )
    }
}

/// The 5 bytes decoded from a transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawFrame([u8; FRAME_BYTES]);

impl RawFrame {
    /// Creates a [`RawFrame`] from its bytes.
    #[must_use]
    pub const fn new(bytes: [u8; FRAME_BYTES]) -> Self {
        Self(bytes)
    }

    /// Returns the frame bytes.
    #[must_use]
    pub const fn bytes(&self) -> [u8; FRAME_BYTES] {
        self.0
    }

    /// Integral part of the relative humidity.
    #[must_use]
    pub const fn humidity(&self) -> u8 {
        self.0[0]
    }

    /// Integral part of the temperature.
    #[must_use]
    pub const fn temperature(&self) -> u8 {
        self.0[2]
    }

    /// Checksum byte sent by the sensor.
    #[must_use]
    pub const fn checksum(&self) -> u8 {
        self.0[4]
    }

    /// Checksum computed from the four payload bytes.
    #[must_use]
    pub const fn computed_checksum(&self) -> u8 {
        self.0[0]
            .wrapping_add(self.0[1])
            .wrapping_add(self.0[2])
            .wrapping_add(self.0[3])
    }

    /// Validates the checksum of the frame.
    ///
    /// # Errors
    ///
    /// Returns a [`ChecksumMismatch`] if the received checksum differs from
    /// the computed one.
    pub const fn validate(&self) -> Result<(), ChecksumMismatch> {
        let computed = self.computed_checksum();

        if computed == self.checksum() {
            Ok(())
        } else {
            Err(ChecksumMismatch {
                received: self.checksum(),
                computed,
            })
        }
    }

    /// Returns the measurement carried by the frame, without validating it.
    #[must_use]
    pub const fn measurement(&self) -> Measurement {
        Measurement {
            temperature: self.temperature(),
            humidity: self.humidity(),
        }
    }

    // Bits arrive MSB first; bit `index` lands in byte `index / 8`.
    #[inline]
    pub(crate) fn set_bit(&mut self, index: usize, bit: bool) {
        let mask = 1 << (7 - index % 8);

        if bit {
            self.0[index / 8] |= mask;
        } else {
            self.0[index / 8] &= !mask;
        }
    }
}

impl From<[u8; FRAME_BYTES]> for RawFrame {
    fn from(bytes: [u8; FRAME_BYTES]) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Display for RawFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [b0, b1, b2, b3, b4] = self.0;
        write!(f, "{b0:08b} {b1:08b} {b2:08b} {b3:08b} {b4:08b}")
    }
}
