//! Cycle-counted busy-wait

use embassy_rp::clocks::clk_sys_freq;
use tlcscan_hal::BusyWait;

/// Blocks of 100µs per second
const BLOCKS_PER_SECOND: u32 = 10_000;

/// [`BusyWait`] spinning a fixed number of core cycles per block
pub struct CycleBusyWait {
    cycles: u32,
}

impl CycleBusyWait {
    /// Calibrate against the current system clock
    pub fn new() -> Self {
        Self {
            cycles: clk_sys_freq() / BLOCKS_PER_SECOND,
        }
    }
}

impl Default for CycleBusyWait {
    fn default() -> Self {
        Self::new()
    }
}

impl BusyWait for CycleBusyWait {
    #[inline]
    fn spin_100us(&mut self) {
        cortex_m::asm::delay(self.cycles);
    }
}
