//! Real-time row scan engines
//!
//! Two interchangeable strategies drive the same wire protocol:
//!
//! - [`IrqScanEngine`] - hardware serial transfer chained by row-advance and
//!   byte-complete interrupts, grayscale clock free-running in hardware
//! - [`BusyScanEngine`] - one software loop bit-banging data and clocking
//!   the grayscale PWM itself
//!
//! Per row, both shift the row's [`ROW_BYTES`](crate::config::ROW_BYTES)
//! packed bytes MSB first, latch them at the start of the next grayscale
//! cycle and drive the row-select bus one-hot active-low.

pub mod busy;
pub mod irq;
pub mod state;

#[cfg(test)]
mod mock;

pub use busy::BusyScanEngine;
pub use irq::IrqScanEngine;
pub use state::{ScanEvent, ScanPhase, ScanState};

use crate::encoder::PackedFrame;

/// Common interface of the scan strategies
pub trait ScanEngine<const ROWS: usize> {
    /// Put every line in its idle state, load `initial` and begin scanning
    fn start(&mut self, initial: &PackedFrame<ROWS>);

    /// Replace the packed frame wholesale
    ///
    /// Takes effect from the next byte shifted.
    fn publish(&mut self, packed: &PackedFrame<ROWS>);

    /// Snapshot of the engine state
    fn state(&self) -> ScanState;

    /// Advance to the next row and shift it out completely
    ///
    /// Synchronous driver for one row period; the firmware instead drives
    /// the engines from interrupts or [`BusyScanEngine::run`].
    fn run_row(&mut self);
}

#[cfg(test)]
mod tests {
    use super::mock::{MockDriver, MockRows, Wire, WireEvent};
    use super::*;
    use crate::config::{ScanConfig, FRAME_ROWS, ROW_BITS};
    use crate::encoder::encode_frame;
    use crate::frame::{test_pattern, Orientation};
    use core::cell::RefCell;

    fn pattern(scale: u16) -> PackedFrame {
        let mut packed = PackedFrame::new();
        encode_frame(&test_pattern(), scale, Orientation::Normal, &mut packed);
        packed
    }

    fn config() -> ScanConfig {
        ScanConfig {
            pwm_top: ROW_BITS as u16,
            ..ScanConfig::default()
        }
    }

    /// Each row period latches once, selects one valid row and shifts
    /// exactly that period's row buffer
    fn check_row_protocol<E: ScanEngine<FRAME_ROWS>>(engine: &mut E, wire: &RefCell<Wire>) {
        let packed = pattern(127);
        engine.start(&packed);

        let mut previous = engine.state().row;
        for _ in 0..(FRAME_ROWS * 2) {
            wire.borrow_mut().clear();
            engine.run_row();

            let state = engine.state();
            assert_eq!(state.row, (previous + 1) % 8);
            assert!(state.is_exhausted());
            assert_eq!(state.phase, ScanPhase::Idle);

            let wire = wire.borrow();
            assert_eq!(wire.count(WireEvent::Latch), 1);
            let selections = wire.selections();
            assert_eq!(selections.len(), 1);
            assert!(usize::from(selections[0]) < FRAME_ROWS);
            assert_eq!(wire.shifted_since_latch(), packed.row(state.row as usize).to_vec());

            previous = state.row;
        }
    }

    /// A frame published between rows is what the next row shifts
    fn check_publish<E: ScanEngine<FRAME_ROWS>>(engine: &mut E, wire: &RefCell<Wire>) {
        engine.start(&pattern(1));
        engine.run_row();

        let updated = pattern(300);
        engine.publish(&updated);
        wire.borrow_mut().clear();
        engine.run_row();

        let row = engine.state().row as usize;
        assert_eq!(wire.borrow().shifted_since_latch(), updated.row(row).to_vec());
    }

    /// Fewer buffered rows than physical rows: buffer indexed modulo
    fn check_short_buffer<E: ScanEngine<2>>(engine: &mut E, wire: &RefCell<Wire>) {
        let mut packed = PackedFrame::<2>::new();
        packed.row_mut(0).fill(0x0F);
        packed.row_mut(1).fill(0xF0);
        engine.start(&packed);

        for _ in 0..8 {
            wire.borrow_mut().clear();
            engine.run_row();
            let row = engine.state().row as usize;
            let expected = if row % 2 == 0 { 0x0F } else { 0xF0 };
            assert!(wire.borrow().shifted_since_latch().iter().all(|&b| b == expected));
        }
    }

    #[test]
    fn test_irq_row_protocol() {
        let wire = RefCell::new(Wire::default());
        let mut engine: IrqScanEngine<_, _> =
            IrqScanEngine::new(MockDriver::new(&wire), MockRows::new(&wire), config());
        check_row_protocol(&mut engine, &wire);
    }

    #[test]
    fn test_busy_row_protocol() {
        let wire = RefCell::new(Wire::default());
        let mut engine: BusyScanEngine<_, _> =
            BusyScanEngine::new(MockDriver::new(&wire), MockRows::new(&wire), config());
        check_row_protocol(&mut engine, &wire);
    }

    #[test]
    fn test_irq_publish() {
        let wire = RefCell::new(Wire::default());
        let mut engine: IrqScanEngine<_, _> =
            IrqScanEngine::new(MockDriver::new(&wire), MockRows::new(&wire), config());
        check_publish(&mut engine, &wire);
    }

    #[test]
    fn test_busy_publish() {
        let wire = RefCell::new(Wire::default());
        let mut engine: BusyScanEngine<_, _> =
            BusyScanEngine::new(MockDriver::new(&wire), MockRows::new(&wire), config());
        check_publish(&mut engine, &wire);
    }

    #[test]
    fn test_irq_short_buffer() {
        let wire = RefCell::new(Wire::default());
        let mut engine: IrqScanEngine<_, _, 2> =
            IrqScanEngine::new(MockDriver::new(&wire), MockRows::new(&wire), config());
        check_short_buffer(&mut engine, &wire);
    }

    #[test]
    fn test_busy_short_buffer() {
        let wire = RefCell::new(Wire::default());
        let mut engine: BusyScanEngine<_, _, 2> =
            BusyScanEngine::new(MockDriver::new(&wire), MockRows::new(&wire), config());
        check_short_buffer(&mut engine, &wire);
    }

    #[test]
    fn test_reduced_row_count() {
        let wire = RefCell::new(Wire::default());
        let config = ScanConfig {
            row_count: 3,
            start_row: 1,
            ..config()
        };
        let mut engine: IrqScanEngine<_, _> =
            IrqScanEngine::new(MockDriver::new(&wire), MockRows::new(&wire), config);
        engine.start(&pattern(1));

        for _ in 0..6 {
            engine.run_row();
        }
        assert_eq!(wire.borrow().selections(), [1, 2, 0, 1, 2, 0]);
    }
}
