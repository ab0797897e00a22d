//! `dht11-driver` is a library crate that provides an architecture-agnostic
//! driver for the `DHT11` humidity and temperature sensor.
//!
//! The sensor talks over a single data wire using a proprietary
//! pulse-width encoding: the host sends a start pulse, the sensor answers
//! with a handshake and then transmits 40 bits, each one encoded by the width
//! of a high pulse. The driver bit-bangs that protocol with busy-wait loops
//! measured in microseconds, validates the checksum and caches the last
//! result, since the sensor cannot refresh its measurement more than about
//! once per second.
//!
//! All hardware access goes through the [`embedded-hal`] traits (and
//! [`embedded-hal-async`] for the asynchronous initialization), so the
//! driver runs on any platform that provides them.
//!
//! ```ignore
//! use dht11_driver::{Dht11, OpenDrain, Reading};
//!
//! let mut dht11 = Dht11::initialize(OpenDrain::new(pin), delay, clock);
//!
//! match dht11.read()? {
//!     Reading::Ok(measurement) => log::info!("{measurement}"),
//!     failure => log::warn!("DHT11 reading failed: {failure}"),
//! }
//! ```
//!
//! The timed loops assume the calling context is not preempted for more
//! than a few microseconds while a read is in flight. A preemption longer
//! than that, including one caused by a watchdog, shows up as a spurious
//! [`Reading::TimeoutError`] rather than as a protocol bug.
//!
//! [`embedded-hal`]: https://crates.io/crates/embedded-hal
//! [`embedded-hal-async`]: https://crates.io/crates/embedded-hal-async

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod cache;
mod error;
mod protocol;

/// Monotonic clocks used to throttle the sensor.
pub mod clock;
/// The `DHT11` driver handle.
pub mod dht11;
/// Raw frames and checksum validation.
pub mod frame;
/// Data lines and their direction.
pub mod line;
/// Sensor readings.
pub mod reading;
/// Protocol timing and the timed edge detector.
pub mod timing;

#[cfg(test)]
pub(crate) mod waveform;

pub use clock::MonotonicClock;
pub use dht11::Dht11;
pub use frame::RawFrame;
pub use line::{DataLine, Direction, OpenDrain};
pub use reading::{Measurement, Reading, Status};
