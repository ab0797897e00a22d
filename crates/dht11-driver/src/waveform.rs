// Synthetic sensor waveforms, expressed as the sequence of pin operations
// the driver performs while polling once per microsecond.

extern crate std;
use std::vec;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal_mock::eh1::digital::{State, Transaction as PinTransaction};

use crate::frame::FRAME_BYTES;

// Nominal pulse widths of a healthy sensor, in microseconds.
pub(crate) const HANDSHAKE_US: usize = 80;
pub(crate) const BIT_LOW_US: usize = 50;
pub(crate) const ZERO_HIGH_US: usize = 26;
pub(crate) const ONE_HIGH_US: usize = 70;

/// A delay provider that adds up every requested delay.
#[derive(Default)]
pub(crate) struct RecordingDelay {
    pub(crate) total_ns: u64,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

/// Host side of the start signal on an open-drain line.
pub(crate) fn start_signal() -> Vec<PinTransaction> {
    vec![
        PinTransaction::set(State::Low),
        PinTransaction::set(State::High),
        // Release for input.
        PinTransaction::set(State::High),
    ]
}

/// The line holds `level` for `held` samples, then reads the other level once.
pub(crate) fn pulse(expectations: &mut Vec<PinTransaction>, level: State, held: usize) {
    hold(expectations, level, held);
    expectations.push(PinTransaction::get(opposite(level)));
}

/// The line holds `level` for `held` samples.
pub(crate) fn hold(expectations: &mut Vec<PinTransaction>, level: State, held: usize) {
    expectations.extend(core::iter::repeat_n(PinTransaction::get(level), held));
}

/// Sensor acknowledgement: low, then high.
pub(crate) fn handshake(expectations: &mut Vec<PinTransaction>) {
    pulse(expectations, State::Low, HANDSHAKE_US);
    pulse(expectations, State::High, HANDSHAKE_US);
}

/// A single data bit: low pulse, then a high pulse whose width encodes it.
pub(crate) fn bit(expectations: &mut Vec<PinTransaction>, value: bool) {
    pulse(expectations, State::Low, BIT_LOW_US);
    let high = if value { ONE_HIGH_US } else { ZERO_HIGH_US };
    pulse(expectations, State::High, high);
}

/// The first `count` bits of `bytes`, most significant bit first.
pub(crate) fn bits(expectations: &mut Vec<PinTransaction>, bytes: [u8; FRAME_BYTES], count: usize) {
    for index in 0..count {
        let value = bytes[index / 8] & (1 << (7 - index % 8)) != 0;
        bit(expectations, value);
    }
}

/// A complete exchange: start signal, handshake and the 40 bits of `bytes`.
pub(crate) fn transmission(bytes: [u8; FRAME_BYTES]) -> Vec<PinTransaction> {
    let mut expectations = start_signal();
    handshake(&mut expectations);
    bits(&mut expectations, bytes, FRAME_BYTES * 8);
    expectations
}

fn opposite(level: State) -> State {
    match level {
        State::High => State::Low,
        State::Low => State::High,
    }
}
