//! GPIO row-select bus
//!
//! Each row is enabled by pulling its line low. Boards that drive the rows
//! through inverting transistors configure the lines as inverted, so the
//! logical levels here stay active-low either way.

use tlcscan_core::traits::RowSelect;
use tlcscan_hal::GpioLine;

/// One line per row, row 0 first
pub struct GpioRowSelect<L, const N: usize> {
    lines: [L; N],
}

impl<L: GpioLine, const N: usize> GpioRowSelect<L, N> {
    /// Take the row lines, all rows disabled
    pub fn new(lines: [L; N]) -> Self {
        let mut bus = Self { lines };
        bus.release_all();
        bus
    }

    /// Currently enabled row, if any
    pub fn selected(&self) -> Option<u8> {
        self.lines
            .iter()
            .position(|line| !line.is_set())
            .map(|row| row as u8)
    }
}

impl<L: GpioLine, const N: usize> RowSelect for GpioRowSelect<L, N> {
    fn select(&mut self, row: u8) {
        let target = usize::from(row);

        // Disable first so two rows are never on together
        for (index, line) in self.lines.iter_mut().enumerate() {
            if index != target {
                line.set();
            }
        }
        if let Some(line) = self.lines.get_mut(target) {
            line.clear();
        }
    }

    fn release_all(&mut self) {
        for line in self.lines.iter_mut() {
            line.set();
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::RefCell;

    use super::*;
    use crate::mock::{MockLine, Trace};

    const NAMES: [&str; 8] = ["r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7"];

    fn bus(trace: &RefCell<Trace>) -> GpioRowSelect<MockLine<'_>, 8> {
        GpioRowSelect::new(NAMES.map(|name| MockLine::new(name, trace)))
    }

    #[test]
    fn test_starts_released() {
        let trace = RefCell::new(Trace::default());
        let bus = bus(&trace);
        assert_eq!(bus.selected(), None);
    }

    #[test]
    fn test_select_one_hot() {
        let trace = RefCell::new(Trace::default());
        let mut bus = bus(&trace);

        for row in 0..8 {
            bus.select(row);
            assert_eq!(bus.selected(), Some(row));
            let low = bus.lines.iter().filter(|line| !line.is_set()).count();
            assert_eq!(low, 1);
        }

        bus.release_all();
        assert_eq!(bus.selected(), None);
    }

    #[test]
    fn test_previous_row_disabled_before_next() {
        let trace = RefCell::new(Trace::default());
        let mut bus = bus(&trace);
        bus.select(3);
        trace.borrow_mut().edges.clear();

        bus.select(4);

        let trace = trace.borrow();
        let r3_high = trace
            .edges
            .iter()
            .position(|e| e.line == "r3" && e.high)
            .unwrap();
        let r4_low = trace
            .edges
            .iter()
            .position(|e| e.line == "r4" && !e.high)
            .unwrap();
        assert!(r3_high < r4_low);
    }

    #[test]
    fn test_out_of_range_selects_nothing() {
        let trace = RefCell::new(Trace::default());
        let mut bus = bus(&trace);
        bus.select(2);
        bus.select(9);
        assert_eq!(bus.selected(), None);
    }

    #[test]
    fn test_narrow_bus() {
        let trace = RefCell::new(Trace::default());
        let mut bus = GpioRowSelect::new([
            MockLine::new("r0", &trace),
            MockLine::new("r1", &trace),
            MockLine::new("r2", &trace),
            MockLine::new("r3", &trace),
        ]);
        bus.select(2);
        assert_eq!(bus.selected(), Some(2));
    }

    #[test]
    fn test_wide_bus() {
        const WIDE: [&str; 10] = ["r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9"];
        let trace = RefCell::new(Trace::default());
        let mut bus = GpioRowSelect::new(WIDE.map(|name| MockLine::new(name, &trace)));

        bus.select(1);
        assert_eq!(bus.selected(), Some(1));

        bus.select(9);
        assert_eq!(bus.selected(), Some(9));
        assert_eq!(bus.lines.iter().filter(|line| !line.is_set()).count(), 1);

        bus.select(10);
        assert_eq!(bus.selected(), None);
    }
}
