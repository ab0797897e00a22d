//! # Data line
//!
//! The `DHT11` shares a single wire between host and sensor. The host drives
//! it to send the start pulse and then hands it over to the sensor, which
//! pulls it low and lets it float high to transmit its answer.
//!
//! [`DataLine`] adds that direction switch on top of the [`embedded-hal`]
//! digital traits. Platforms that can reconfigure a pin at runtime implement
//! it directly, while [`OpenDrain`] covers the common case of a pin
//! configured once as open-drain with a pull-up.
//!
//! [`embedded-hal`]: https://crates.io/crates/embedded-hal

use core::result::Result::{self, Ok};

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Direction of a [`DataLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The host reads the line level.
    Input,
    /// The host drives the line level.
    Output,
}

/// A bidirectional GPIO line.
pub trait DataLine: InputPin + OutputPin {
    /// Switches the line to the given [`Direction`].
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying pin cannot be reconfigured.
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error>;
}

impl<T: DataLine + ?Sized> DataLine for &mut T {
    #[inline]
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error> {
        (**self).set_direction(direction)
    }
}

/// A [`DataLine`] built on an open-drain pin.
///
/// An open-drain pin can both drive the line low and read it back, so no
/// reconfiguration is needed: switching to [`Direction::Input`] releases the
/// line by setting it high, leaving the pull-up and the sensor in control,
/// while switching to [`Direction::Output`] does nothing, since the next
/// level write drives the line anyway.
#[derive(Debug)]
pub struct OpenDrain<P>(P);

impl<P> OpenDrain<P>
where
    P: InputPin + OutputPin,
{
    /// Wraps an open-drain pin.
    #[must_use]
    pub const fn new(pin: P) -> Self {
        Self(pin)
    }

    /// Returns the wrapped pin.
    #[must_use]
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: ErrorType> ErrorType for OpenDrain<P> {
    type Error = P::Error;
}

impl<P: InputPin> InputPin for OpenDrain<P> {
    #[inline]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.0.is_high()
    }

    #[inline]
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.0.is_low()
    }
}

impl<P: OutputPin> OutputPin for OpenDrain<P> {
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_low()
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_high()
    }
}

impl<P> DataLine for OpenDrain<P>
where
    P: InputPin + OutputPin,
{
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error> {
        match direction {
            Direction::Input => self.0.set_high(),
            Direction::Output => Ok(()),
        }
    }
}
