//! GPIO line abstractions
//!
//! Provides the output-line capability every control signal of the
//! grayscale driver is built from.

/// Digital output line
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip. All methods are infallible: the scan engine runs
/// inside interrupt handlers and has nowhere to report a failure to.
pub trait GpioLine {
    /// Drive the line high (logic 1)
    fn set(&mut self);

    /// Drive the line low (logic 0)
    fn clear(&mut self);

    /// Check if the line is currently driven high
    fn is_set(&self) -> bool;

    /// Raise then immediately lower the line
    ///
    /// TLC5940 minimum pulse widths (16-20ns) are shorter than two
    /// back-to-back register writes on any supported MCU, so no delay is
    /// inserted between the edges.
    fn pulse(&mut self) {
        self.set();
        self.clear();
    }

    /// Drive the line to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set();
        } else {
            self.clear();
        }
    }
}

impl<T: GpioLine + ?Sized> GpioLine for &mut T {
    fn set(&mut self) {
        (**self).set();
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn is_set(&self) -> bool {
        (**self).is_set()
    }

    fn pulse(&mut self) {
        (**self).pulse();
    }
}
