//! tlcscan Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the scan engine needs from
//! a board. Chip-specific crates implement them; the core and driver crates
//! only ever see these traits, so the whole scan protocol can run against
//! mocks on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (tlcscan-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tlcscan-core / tlcscan-drivers         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tlcscan-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ tlcscan-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::GpioLine`] - A single push-pull control line
//! - [`serial::SerialTx`] - Hardware-assisted byte shifting
//! - [`delay::BusyWait`], [`delay::CoarseDelay`] - Blocking delays outside the real-time path

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod reset;
pub mod serial;

// Re-export key traits at crate root for convenience
pub use delay::{BusyWait, CoarseDelay};
pub use gpio::GpioLine;
pub use reset::ResetCause;
pub use serial::SerialTx;
