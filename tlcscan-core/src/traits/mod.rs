//! Hardware abstraction traits
//!
//! These traits define the interface between the scan engines and the
//! chip and row drivers. `tlcscan-drivers` implements them over GPIO lines
//! and a hardware serial transmitter.

pub mod driver;
pub mod rows;

pub use driver::{BitBangShift, GrayscaleDriver, HardwareShift};
pub use rows::RowSelect;
