//! TLC5940 grayscale PWM driver
//!
//! The chip shifts grayscale data in on SIN/SCLK, commits it on an XLAT
//! pulse and runs its own PWM from GSCLK. BLANK forces every output off and
//! holds the grayscale counter at zero.
//!
//! Two variants are provided:
//! - [`Tlc5940`] drives every line in software, including GSCLK. Used by
//!   the busy-loop scan engine.
//! - [`Tlc5940Serial`] leaves SIN/SCLK to a hardware serial transmitter
//!   and GSCLK to a free-running clock output. Used by the interrupt-driven
//!   scan engine.

use tlcscan_core::config::{GRAYSCALE_BITS, GRAYSCALE_MAX};
use tlcscan_core::traits::{BitBangShift, GrayscaleDriver, HardwareShift};
use tlcscan_hal::{GpioLine, SerialTx};

/// Control lines of a software-driven TLC5940
pub struct Tlc5940Pins<L> {
    /// Serial data in
    pub sin: L,
    /// Serial data clock
    pub sclk: L,
    /// Data latch
    pub xlat: L,
    /// Output blank
    pub blank: L,
    /// Grayscale PWM clock
    pub gsclk: L,
}

/// Fully bit-banged TLC5940
pub struct Tlc5940<L> {
    pins: Tlc5940Pins<L>,
}

impl<L: GpioLine> Tlc5940<L> {
    /// Take the control lines and put the chip in a safe state
    ///
    /// The outputs start blanked; every other line idles low.
    pub fn new(pins: Tlc5940Pins<L>) -> Self {
        let mut chip = Self { pins };
        chip.init();
        chip
    }

    fn init(&mut self) {
        self.pins.blank.set();
        self.pins.sin.clear();
        self.pins.sclk.clear();
        self.pins.xlat.clear();
        self.pins.gsclk.clear();
    }

    /// Shift one 12-bit grayscale word, MSB first
    ///
    /// Bits above the 12-bit range are ignored.
    pub fn shift_word(&mut self, code: u16) {
        let code = code & GRAYSCALE_MAX;
        for bit in (0..GRAYSCALE_BITS).rev() {
            self.shift_bit(code & (1 << bit) != 0);
        }
    }
}

impl<L: GpioLine> GrayscaleDriver for Tlc5940<L> {
    fn set_blank(&mut self, blanked: bool) {
        self.pins.blank.set_state(blanked);
    }

    fn latch(&mut self) {
        self.pins.xlat.pulse();
    }
}

impl<L: GpioLine> BitBangShift for Tlc5940<L> {
    fn shift_bit(&mut self, high: bool) {
        self.pins.sin.set_state(high);
        self.pins.sclk.pulse();
    }

    fn grayscale_tick(&mut self) {
        self.pins.gsclk.pulse();
    }
}

/// TLC5940 fed by a hardware serial transmitter
///
/// Only XLAT and BLANK are driven directly; GSCLK is expected to be a
/// free-running clock configured by the board.
pub struct Tlc5940Serial<L, S> {
    xlat: L,
    blank: L,
    serial: S,
}

impl<L: GpioLine, S: SerialTx> Tlc5940Serial<L, S> {
    /// Take the latch and blank lines plus the transmitter
    ///
    /// The outputs start blanked.
    pub fn new(xlat: L, blank: L, serial: S) -> Self {
        let mut chip = Self {
            xlat,
            blank,
            serial,
        };
        chip.blank.set();
        chip.xlat.clear();
        chip
    }

    /// Access the serial transmitter
    pub fn serial(&self) -> &S {
        &self.serial
    }
}

impl<L: GpioLine, S: SerialTx> GrayscaleDriver for Tlc5940Serial<L, S> {
    fn set_blank(&mut self, blanked: bool) {
        self.blank.set_state(blanked);
    }

    fn latch(&mut self) {
        self.xlat.pulse();
    }
}

impl<L: GpioLine, S: SerialTx> HardwareShift for Tlc5940Serial<L, S> {
    fn start_byte(&mut self, byte: u8) {
        self.serial.write_byte(byte);
    }
}
