//! Blocking delay abstractions
//!
//! Delays are only used outside the real-time path: startup sequencing and
//! the status LED flashes that make a board easy to spot on a logic
//! analyser. They are composed from a fixed-iteration busy-wait primitive
//! rather than a hardware timer.

/// Busy-wait primitive calibrated in 100µs blocks
pub trait BusyWait {
    /// Spin for roughly 100µs
    fn spin_100us(&mut self);
}

impl<T: BusyWait + ?Sized> BusyWait for &mut T {
    fn spin_100us(&mut self) {
        (**self).spin_100us();
    }
}

/// Number of 100µs blocks in one millisecond
pub const BLOCKS_PER_MS: u16 = 10;

/// Coarse blocking delays
///
/// Blanket-implemented for every [`BusyWait`]; there is a single delay API
/// with two granularities.
pub trait CoarseDelay {
    /// Block for `count` × 100µs
    fn delay_100us(&mut self, count: u16);

    /// Block for `count` milliseconds
    fn delay_ms(&mut self, count: u16);
}

impl<B: BusyWait> CoarseDelay for B {
    fn delay_100us(&mut self, count: u16) {
        for _ in 0..count {
            self.spin_100us();
        }
    }

    fn delay_ms(&mut self, count: u16) {
        for _ in 0..count {
            self.delay_100us(BLOCKS_PER_MS);
        }
    }
}
