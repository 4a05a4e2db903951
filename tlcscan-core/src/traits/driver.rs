//! Grayscale driver chip traits

/// Control lines common to both shift strategies
pub trait GrayscaleDriver {
    /// Drive BLANK
    ///
    /// While blanked all outputs are off and the chip's grayscale counter
    /// is held at zero.
    fn set_blank(&mut self, blanked: bool);

    /// Pulse XLAT, committing the shifted data to the output register
    fn latch(&mut self);

    /// Pulse BLANK, restarting the chip's grayscale PWM cycle
    fn reset_grayscale_counter(&mut self) {
        self.set_blank(true);
        self.set_blank(false);
    }
}

/// Driver whose serial data is shifted by a hardware transmitter
///
/// Completion of each byte is reported separately (by interrupt); the
/// grayscale clock runs free from a hardware clock output.
pub trait HardwareShift: GrayscaleDriver {
    /// Load the next byte into the transmit register
    fn start_byte(&mut self, byte: u8);
}

/// Driver shifted and clocked entirely in software
pub trait BitBangShift: GrayscaleDriver {
    /// Put one bit on SIN and pulse SCLK
    fn shift_bit(&mut self, high: bool);

    /// Pulse GSCLK once (one grayscale PWM tick)
    fn grayscale_tick(&mut self);

    /// Shift a whole byte, MSB first
    fn shift_byte(&mut self, byte: u8) {
        for bit in (0..8).rev() {
            self.shift_bit(byte & (1 << bit) != 0);
        }
    }
}
