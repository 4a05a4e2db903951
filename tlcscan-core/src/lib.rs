//! Board-agnostic core logic for the tlcscan LED matrix firmware
//!
//! This crate contains everything that does not depend on a specific chip:
//!
//! - Matrix geometry, scan timing and board binding types
//! - The logical frame and its brightness sweep animation
//! - The 12-bit grayscale packing encoder
//! - Driver and row-bus traits
//! - Both row scan engines (interrupt-driven and busy-loop)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod encoder;
pub mod frame;
pub mod scan;
pub mod traits;
