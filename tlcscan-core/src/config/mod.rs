//! Configuration types
//!
//! Matrix geometry is fixed at compile time. Scan timing and the board
//! binding are plain values built by the firmware (from `board.toml`) and
//! checked once at startup.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
