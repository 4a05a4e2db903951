//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined in
//! tlcscan-core, built on the line capabilities of tlcscan-hal:
//!
//! - TLC5940 grayscale driver (bit-banged and hardware-serial variants)
//! - GPIO row-select bus
//! - Status LED flasher for startup diagnostics
//! - `embedded-hal` delay adapter over the busy-wait primitive

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod delay;
pub mod rows;
pub mod status_led;
pub mod tlc5940;

#[cfg(test)]
mod mock;

pub use delay::HalDelay;
pub use rows::GpioRowSelect;
pub use status_led::StatusLed;
pub use tlc5940::{Tlc5940, Tlc5940Pins, Tlc5940Serial};
