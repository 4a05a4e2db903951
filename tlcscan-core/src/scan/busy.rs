//! Busy-loop scan strategy
//!
//! Everything happens in one loop with no interrupts: each iteration shifts
//! at most one bit of the current row and pulses the grayscale clock once,
//! so the loop itself is the chip's PWM clock. A software counter marks the
//! end of each grayscale cycle, where the shifted row is latched and the
//! next row begins.
//!
//! This strategy owns the processor; the animation loop cannot run
//! alongside it.

use super::state::{ScanEvent, ScanState};
use super::ScanEngine;
use crate::config::{ScanConfig, FRAME_ROWS, ROW_BYTES};
use crate::encoder::PackedFrame;
use crate::traits::{BitBangShift, RowSelect};

/// Most significant bit index of a byte
const TOP_BIT: u8 = 7;

/// Software-timed scan engine
pub struct BusyScanEngine<D, B, const ROWS: usize = FRAME_ROWS> {
    driver: D,
    rows: B,
    config: ScanConfig,
    packed: PackedFrame<ROWS>,
    state: ScanState,
    /// Next bit of the current byte to shift
    bit: u8,
    /// Grayscale ticks left in this cycle
    pwm: u16,
}

impl<D: BitBangShift, B: RowSelect, const ROWS: usize> BusyScanEngine<D, B, ROWS> {
    /// Create a stopped engine
    ///
    /// `config` is expected to have passed [`ScanConfig::validate`].
    pub fn new(driver: D, rows: B, config: ScanConfig) -> Self {
        Self {
            driver,
            rows,
            config,
            packed: PackedFrame::new(),
            state: ScanState::new(config.start_row),
            bit: TOP_BIT,
            pwm: config.pwm_top,
        }
    }

    /// One loop iteration: one bit, one grayscale tick
    ///
    /// Returns `true` when this iteration ended the grayscale cycle and
    /// advanced to the next row.
    pub fn step(&mut self) -> bool {
        if !self.state.phase.is_running() {
            return false;
        }

        if !self.state.is_exhausted() {
            self.shift_next_bit();
        }

        self.driver.grayscale_tick();

        if self.pwm == 0 {
            self.pwm = self.config.pwm_top;
            self.advance_row();
            true
        } else {
            self.pwm -= 1;
            false
        }
    }

    /// Scan forever
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    fn shift_next_bit(&mut self) {
        let index = ROW_BYTES - self.state.remaining as usize - 1;
        let byte = self.packed.row(self.state.row as usize)[index];
        self.driver.shift_bit(byte & (1 << self.bit) != 0);

        if self.bit == 0 {
            self.bit = TOP_BIT;
            self.state.remaining -= 1;
            if self.state.is_exhausted() {
                self.state.apply(ScanEvent::RowShifted);
            }
        } else {
            self.bit -= 1;
        }
    }

    fn advance_row(&mut self) {
        // New data has been shifted, latch it
        self.driver.latch();
        self.driver.reset_grayscale_counter();

        self.state.row = (self.state.row + 1) % self.config.row_count;
        self.rows.select(self.state.row);

        self.state.remaining = (ROW_BYTES - 1) as i8;
        self.bit = TOP_BIT;
        self.state.apply(ScanEvent::RowAdvanced);
    }
}

impl<D: BitBangShift, B: RowSelect, const ROWS: usize> ScanEngine<ROWS>
    for BusyScanEngine<D, B, ROWS>
{
    fn start(&mut self, initial: &PackedFrame<ROWS>) {
        self.rows.release_all();
        self.driver.set_blank(true);

        self.packed = *initial;
        self.state = ScanState::new(self.config.start_row);

        // Preload the start row so the first advance latches a full row
        for &byte in self.packed.row(self.config.start_row as usize) {
            self.driver.shift_byte(byte);
        }
        self.driver.latch();

        // Nothing more to shift until the first cycle ends
        self.bit = TOP_BIT;
        self.pwm = self.config.pwm_top;
        self.state.apply(ScanEvent::Started);

        self.driver.set_blank(false);
    }

    fn publish(&mut self, packed: &PackedFrame<ROWS>) {
        self.packed = *packed;
    }

    fn state(&self) -> ScanState {
        self.state
    }

    fn run_row(&mut self) {
        if !self.state.phase.is_running() {
            return;
        }
        while !self.step() {}
        while !self.state.is_exhausted() {
            self.step();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ROW_BITS;
    use crate::scan::mock::{MockDriver, MockRows, Wire, WireEvent};
    use crate::scan::state::ScanPhase;
    use core::cell::RefCell;

    fn short_cycle() -> ScanConfig {
        ScanConfig {
            pwm_top: 255,
            ..ScanConfig::default()
        }
    }

    fn numbered_frame() -> PackedFrame {
        let mut packed = PackedFrame::new();
        for row in 0..FRAME_ROWS {
            for (i, byte) in packed.row_mut(row).iter_mut().enumerate() {
                *byte = (row * 32 + i) as u8;
            }
        }
        packed
    }

    #[test]
    fn test_start_preloads_start_row() {
        let wire = RefCell::new(Wire::default());
        let mut engine: BusyScanEngine<_, _> =
            BusyScanEngine::new(MockDriver::new(&wire), MockRows::new(&wire), short_cycle());
        engine.start(&numbered_frame());

        let wire = wire.borrow();
        assert_eq!(wire.events[0], WireEvent::ReleaseAll);
        assert_eq!(wire.events[1], WireEvent::Blank(true));
        assert_eq!(wire.shifted(), numbered_frame().row(4).to_vec());
        assert_eq!(wire.events[wire.events.len() - 2], WireEvent::Latch);
        assert_eq!(wire.events[wire.events.len() - 1], WireEvent::Blank(false));
        assert!(wire.selections().is_empty());
        assert_eq!(engine.state().phase, ScanPhase::Idle);
    }

    #[test]
    fn test_first_cycle_only_ticks() {
        let wire = RefCell::new(Wire::default());
        let mut engine: BusyScanEngine<_, _> =
            BusyScanEngine::new(MockDriver::new(&wire), MockRows::new(&wire), short_cycle());
        engine.start(&numbered_frame());
        wire.borrow_mut().clear();

        for _ in 0..255 {
            assert!(!engine.step());
        }
        assert!(wire.borrow().events.is_empty());
        assert_eq!(wire.borrow().ticks, 255);
        assert_eq!(engine.pwm, 0);

        // The 256th tick ends the cycle
        assert!(engine.step());
        assert_eq!(wire.borrow().ticks, 256);
        assert_eq!(
            wire.borrow().events,
            [
                WireEvent::Latch,
                WireEvent::Blank(true),
                WireEvent::Blank(false),
                WireEvent::Select(5)
            ]
        );
        assert_eq!(engine.pwm, 255);
    }

    #[test]
    fn test_row_is_shifted_one_bit_per_tick() {
        let wire = RefCell::new(Wire::default());
        let mut engine: BusyScanEngine<_, _> =
            BusyScanEngine::new(MockDriver::new(&wire), MockRows::new(&wire), short_cycle());
        engine.start(&numbered_frame());
        while !engine.step() {}
        wire.borrow_mut().clear();

        for _ in 0..ROW_BITS {
            engine.step();
        }
        assert_eq!(wire.borrow().shifted(), numbered_frame().row(5).to_vec());
        assert!(engine.state().is_exhausted());
        assert_eq!(engine.state().phase, ScanPhase::Idle);

        // Rest of the cycle shifts nothing
        let before = wire.borrow().events.len();
        for _ in 0..(255 - ROW_BITS) {
            engine.step();
        }
        assert_eq!(wire.borrow().events.len(), before);
        assert_eq!(wire.borrow().ticks, 255);
    }

    #[test]
    fn test_row_order_selects_new_row() {
        let wire = RefCell::new(Wire::default());
        let mut engine: BusyScanEngine<_, _> =
            BusyScanEngine::new(MockDriver::new(&wire), MockRows::new(&wire), short_cycle());
        engine.start(&numbered_frame());

        for _ in 0..9 {
            engine.run_row();
        }
        assert_eq!(wire.borrow().selections(), [5, 6, 7, 0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_step_before_start_does_nothing() {
        let wire = RefCell::new(Wire::default());
        let mut engine: BusyScanEngine<_, _> =
            BusyScanEngine::new(MockDriver::new(&wire), MockRows::new(&wire), short_cycle());

        assert!(!engine.step());
        engine.run_row();
        assert!(wire.borrow().events.is_empty());
        assert_eq!(wire.borrow().ticks, 0);
    }
}
