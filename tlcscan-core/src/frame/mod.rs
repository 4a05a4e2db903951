//! Frame source
//!
//! Holds the logical grayscale image and the animation rule that sweeps
//! its brightness scale and column orientation over time.

pub mod animation;
pub mod image;

pub use animation::{Direction, FrameSource, Orientation, ScaleState};
pub use image::{test_pattern, Channel, LogicalFrame, Pixel};
