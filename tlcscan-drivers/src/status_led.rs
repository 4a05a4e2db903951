//! Status LED
//!
//! Flashed a few times at startup so the board shows it came out of reset.

use tlcscan_hal::{CoarseDelay, GpioLine};

/// Status LED on a single line
pub struct StatusLed<L> {
    line: L,
}

impl<L: GpioLine> StatusLed<L> {
    /// Take the line, LED off
    pub fn new(line: L) -> Self {
        let mut led = Self { line };
        led.off();
        led
    }

    pub fn on(&mut self) {
        self.line.set();
    }

    pub fn off(&mut self) {
        self.line.clear();
    }

    pub fn is_on(&self) -> bool {
        self.line.is_set()
    }

    /// Flash `count` times, `half_period` × 100µs on then the same off
    pub fn flash<D: CoarseDelay>(&mut self, delay: &mut D, count: u16, half_period: u16) {
        for _ in 0..count {
            self.on();
            delay.delay_100us(half_period);
            self.off();
            delay.delay_100us(half_period);
        }
    }
}
