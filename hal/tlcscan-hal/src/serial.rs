//! Serial shift abstractions
//!
//! Provides the transmit side of a hardware shift register (an SPI block in
//! master mode). The scan engine writes one byte at a time and is told about
//! completion by an interrupt, so no blocking transfer API is exposed here.

/// Hardware-assisted serial transmitter
pub trait SerialTx {
    /// Load a byte into the transmit register
    ///
    /// Shifting starts immediately in hardware. The caller must not write
    /// again until the byte-complete interrupt for this byte has fired.
    fn write_byte(&mut self, byte: u8);
}

impl<T: SerialTx + ?Sized> SerialTx for &mut T {
    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte);
    }
}

/// Serial shift configuration
///
/// Bits always leave MSB first, which is what the TLC5940 expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Shift clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
}

/// Default shift clock: clk_sys / 10 on a 125 MHz RP2040
pub const DEFAULT_FREQUENCY: u32 = 12_500_000;

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
            polarity: Polarity::IdleLow,
            phase: Phase::CaptureOnFirstTransition,
        }
    }
}

/// Serial clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// Serial clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}
