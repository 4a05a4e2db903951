//! GPIO output lines

use embassy_rp::gpio::{AnyPin, Level, Output};
use embassy_rp::Peri;
use tlcscan_hal::GpioLine;

/// Push-pull output implementing [`GpioLine`]
///
/// An inverted line drives the pin low when set. Boards use this for rows
/// switched through inverting transistors.
pub struct OutputLine<'d> {
    output: Output<'d>,
    inverted: bool,
}

impl<'d> OutputLine<'d> {
    /// Configure `pin` as an output at the given logical level
    pub fn new(pin: Peri<'d, AnyPin>, inverted: bool, set: bool) -> Self {
        let level = if set != inverted {
            Level::High
        } else {
            Level::Low
        };
        Self {
            output: Output::new(pin, level),
            inverted,
        }
    }
}

impl GpioLine for OutputLine<'_> {
    #[inline]
    fn set(&mut self) {
        if self.inverted {
            self.output.set_low();
        } else {
            self.output.set_high();
        }
    }

    #[inline]
    fn clear(&mut self) {
        if self.inverted {
            self.output.set_high();
        } else {
            self.output.set_low();
        }
    }

    #[inline]
    fn is_set(&self) -> bool {
        self.output.is_set_high() != self.inverted
    }
}
