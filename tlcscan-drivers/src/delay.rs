//! `embedded-hal` delay adapter
//!
//! Lets third-party drivers that take a `DelayNs` share the board's
//! busy-wait primitive. Requests are rounded up to whole 100µs blocks.
//!
//! The firmware itself only needs [`tlcscan_hal::CoarseDelay`]; this adapter
//! is library API for boards that add such drivers.

use embedded_hal::delay::DelayNs;
use tlcscan_hal::BusyWait;

const NS_PER_BLOCK: u32 = 100_000;

/// [`DelayNs`] over a [`BusyWait`]
pub struct HalDelay<B> {
    wait: B,
}

impl<B: BusyWait> HalDelay<B> {
    pub fn new(wait: B) -> Self {
        Self { wait }
    }

    pub fn into_inner(self) -> B {
        self.wait
    }
}

impl<B: BusyWait> DelayNs for HalDelay<B> {
    fn delay_ns(&mut self, ns: u32) {
        for _ in 0..ns.div_ceil(NS_PER_BLOCK) {
            self.wait.spin_100us();
        }
    }
}
