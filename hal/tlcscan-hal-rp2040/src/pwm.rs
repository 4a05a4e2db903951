//! Free-running grayscale clock
//!
//! PWM slice 2 toggles GSCLK continuously for the interrupt-driven scan.
//! With TOP = 1 and compare = 1 the output is a square wave at
//! `clk_sys / (2 × divider)`.

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::peripherals::{PIN_20, PWM_SLICE2};
use embassy_rp::pwm::{Config, Pwm};
use embassy_rp::Peri;
use fixed::types::U12F4;

/// Smallest divider the slice accepts (1.0 in 8.4 fixed point)
const MIN_DIVIDER_BITS: u64 = 1 << 4;

/// Largest divider the slice accepts (255 + 15/16)
const MAX_DIVIDER_BITS: u64 = 0x0FFF;

/// Grayscale clock output
pub struct GrayscaleClock {
    _pwm: Pwm<'static>,
    frequency: u32,
}

impl GrayscaleClock {
    /// Start the clock as close to `frequency` Hz as the divider allows
    pub fn new(slice: Peri<'static, PWM_SLICE2>, pin: Peri<'static, PIN_20>, frequency: u32) -> Self {
        let sys = u64::from(clk_sys_freq());
        let divider = divider_bits(sys, frequency);

        let mut config = Config::default();
        config.top = 1;
        config.compare_a = 1;
        config.divider = U12F4::from_bits(divider);

        Self {
            _pwm: Pwm::new_output_a(slice, pin, config),
            frequency: (sys * 16 / (2 * u64::from(divider))) as u32,
        }
    }

    /// Frequency actually produced, in Hz
    pub fn frequency(&self) -> u32 {
        self.frequency
    }
}

/// 8.4 fixed-point divider for a square wave of `frequency` from `sys`
fn divider_bits(sys: u64, frequency: u32) -> u16 {
    let frequency = u64::from(frequency.max(1));
    (sys * 16 / (2 * frequency)).clamp(MIN_DIVIDER_BITS, MAX_DIVIDER_BITS) as u16
}
