//! # DHT11 protocol
//!
//! A read runs through the following phases, in order:
//!
//! 1. **Start signal**: the host drives the line low for [`START_LOW_MS`],
//!    then high for [`START_HIGH_US`], then releases it.
//! 2. **Handshake**: the sensor pulls the line low and then high, each for
//!    at most [`HANDSHAKE_TIMEOUT_US`].
//! 3. **Data**: 40 bits. Each one starts with a low pulse of at most
//!    [`BIT_LOW_TIMEOUT_US`], followed by a high pulse whose width encodes
//!    the bit (see [`Wait::data_bit`]).
//! 4. **Checksum**: the fifth byte must match the sum of the first four.
//!
//! A phase that times out aborts the read. Once the start signal is sent
//! the sequence always runs to completion or failure; nothing yields in
//! between, since yielding would add jitter to the pulse measurements.

use core::result::Result::{self, Err, Ok};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use log::trace;

use crate::error::{Dht11Error, Phase};
use crate::frame::{FRAME_BITS, RawFrame};
use crate::line::{DataLine, Direction};
use crate::reading::Measurement;
use crate::timing::{
    BIT_HIGH_TIMEOUT_US, BIT_LOW_TIMEOUT_US, EdgeDetector, HANDSHAKE_TIMEOUT_US, START_HIGH_US,
    START_LOW_MS, Wait,
};

/// Runs the single-wire exchange with the sensor.
pub(crate) struct Transceiver<P, D> {
    edges: EdgeDetector<P, D>,
}

impl<P, D> Transceiver<P, D>
where
    P: DataLine,
    D: DelayNs,
{
    pub(crate) const fn new(line: P, delay: D) -> Self {
        Self {
            edges: EdgeDetector::new(line, delay),
        }
    }

    /// Reads a frame and validates its checksum.
    pub(crate) fn measure(&mut self) -> Result<Measurement, Dht11Error<P::Error>> {
        let frame = self.fetch_frame()?;
        trace!("DHT11 frame: {frame}");

        frame.validate().map_err(Dht11Error::ChecksumMismatch)?;

        Ok(frame.measurement())
    }

    /// Blocks for the given number of milliseconds.
    pub(crate) fn delay_ms(&mut self, ms: u32) {
        self.edges.delay_ms(ms);
    }

    pub(crate) fn into_parts(self) -> (P, D) {
        self.edges.into_parts()
    }

    fn fetch_frame(&mut self) -> Result<RawFrame, Dht11Error<P::Error>> {
        self.send_start_signal()?;
        self.wait_for_sensor_response()?;
        self.read_bits()
    }

    fn send_start_signal(&mut self) -> Result<(), Dht11Error<P::Error>> {
        let line = self.edges.line_mut();
        line.set_direction(Direction::Output)?;

        // Hold the line low long enough for the sensor to notice.
        line.set_low()?;
        self.edges.delay_ms(START_LOW_MS);

        self.edges.line_mut().set_high()?;
        self.edges.delay_us(START_HIGH_US);

        // Hand the line over to the sensor.
        self.edges.line_mut().set_direction(Direction::Input)?;

        Ok(())
    }

    fn wait_for_sensor_response(&mut self) -> Result<(), Dht11Error<P::Error>> {
        self.expect_level_change(HANDSHAKE_TIMEOUT_US, PinState::Low, Phase::HandshakeLow)?;
        self.expect_level_change(HANDSHAKE_TIMEOUT_US, PinState::High, Phase::HandshakeHigh)
    }

    fn read_bits(&mut self) -> Result<RawFrame, Dht11Error<P::Error>> {
        let mut frame = RawFrame::default();

        for bit in 0..FRAME_BITS {
            self.expect_level_change(BIT_LOW_TIMEOUT_US, PinState::Low, Phase::BitLow(bit))?;

            // A timeout here is not fatal, see `Wait::data_bit`.
            let high = self
                .edges
                .wait_for_level_change(BIT_HIGH_TIMEOUT_US, PinState::High)?;
            frame.set_bit(bit, high.data_bit());
        }

        Ok(frame)
    }

    fn expect_level_change(
        &mut self,
        timeout_us: u16,
        held: PinState,
        phase: Phase,
    ) -> Result<(), Dht11Error<P::Error>> {
        match self.edges.wait_for_level_change(timeout_us, held)? {
            Wait::Elapsed(_) => Ok(()),
            Wait::Timeout => Err(Dht11Error::Timeout(phase)),
        }
    }
}
