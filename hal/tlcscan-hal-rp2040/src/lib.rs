//! RP2040-specific HAL for the LED matrix firmware
//!
//! This crate provides RP2040 implementations of the shared `tlcscan-hal`
//! traits, plus the RP2040 peripherals the scan engines are wired to:
//!
//! - GPIO output lines with optional inversion
//! - Dynamic pin allocation for config-driven setup
//! - SPI0 transmit register with a byte-complete interrupt
//! - PWM-generated free-running grayscale clock
//! - Row timer on a spare TIMER alarm
//! - Cycle-counted busy-wait
//! - Reset cause capture

#![no_std]

pub mod delay;
pub mod gpio;
pub mod pins;
pub mod pwm;
pub mod reset;
pub mod serial;
pub mod timer;

// Re-export shared traits from tlcscan-hal for convenience
pub use tlcscan_hal::{BusyWait, CoarseDelay, GpioLine, ResetCause, SerialTx};
