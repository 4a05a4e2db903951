//! Interrupt-driven scan strategy
//!
//! Two interrupt handlers share this engine:
//!
//! - **Row advance** (timer compare, once per grayscale cycle): latch the
//!   row shifted during the previous cycle, select it, then start shifting
//!   the next row's first byte.
//! - **Byte complete** (serial transmitter idle): feed the next byte until
//!   the row buffer is exhausted.
//!
//! The firmware wraps the engine in a critical-section mutex, so each
//! handler's read-modify-write of [`ScanState`] is atomic with respect to
//! the other. A row advance always re-initialises the byte counter before
//! the next byte complete for the previous row can be serviced.

use super::state::{ScanEvent, ScanState};
use super::ScanEngine;
use crate::config::{ScanConfig, FRAME_ROWS, ROW_BYTES};
use crate::encoder::PackedFrame;
use crate::traits::{HardwareShift, RowSelect};

/// Scan engine chained by row-advance and byte-complete interrupts
pub struct IrqScanEngine<D, B, const ROWS: usize = FRAME_ROWS> {
    driver: D,
    rows: B,
    config: ScanConfig,
    packed: PackedFrame<ROWS>,
    state: ScanState,
}

impl<D: HardwareShift, B: RowSelect, const ROWS: usize> IrqScanEngine<D, B, ROWS> {
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
        }
    }

    /// Get access to the underlying driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Row-advance handler
    pub fn on_row_advance(&mut self) {
        if !self.state.phase.is_running() {
            return;
        }

        self.driver.set_blank(true);

        // Commit the row shifted during the last cycle and light it
        self.driver.latch();
        self.rows.select(self.state.row);

        self.state.row = (self.state.row + 1) % self.config.row_count;
        self.state.remaining = (ROW_BYTES - 1) as i8;
        self.state.apply(ScanEvent::RowAdvanced);

        let first = self.current_byte();
        self.driver.start_byte(first);

        self.driver.set_blank(false);
    }

    /// Byte-complete handler
    ///
    /// Once the row is exhausted further calls are no-ops, so a stray
    /// completion can never read past the row buffer.
    pub fn on_byte_complete(&mut self) {
        if self.state.is_exhausted() {
            return;
        }

        self.state.remaining -= 1;

        if self.state.is_exhausted() {
            self.state.apply(ScanEvent::RowShifted);
        } else {
            let next = self.current_byte();
            self.driver.start_byte(next);
        }
    }

    /// Byte at the cursor of the active row
    fn current_byte(&self) -> u8 {
        let index = ROW_BYTES - self.state.remaining as usize - 1;
        self.packed.row(self.state.row as usize)[index]
    }
}

impl<D: HardwareShift, B: RowSelect, const ROWS: usize> ScanEngine<ROWS>
    for IrqScanEngine<D, B, ROWS>
{
    fn start(&mut self, initial: &PackedFrame<ROWS>) {
        self.rows.release_all();
        self.driver.set_blank(true);

        self.packed = *initial;
        self.state = ScanState::new(self.config.start_row);
        self.state.apply(ScanEvent::Started);

        // Let the first grayscale cycle run; the timer takes it from here
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
        self.on_row_advance();
        while !self.state.is_exhausted() {
            self.on_byte_complete();
        }
    }
}
