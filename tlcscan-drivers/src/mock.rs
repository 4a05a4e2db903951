//! Recording line mocks shared by the driver tests

use core::cell::RefCell;

use tlcscan_hal::{GpioLine, SerialTx};

/// Level change on a named line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub line: &'static str,
    pub high: bool,
}

/// Shared edge log
#[derive(Default)]
pub struct Trace {
    pub edges: Vec<Edge>,
    pub serial: Vec<u8>,
}

impl Trace {
    /// Rising edges on one line
    pub fn pulses(&self, line: &str) -> usize {
        self.edges.iter().filter(|e| e.line == line && e.high).count()
    }

    /// Level of `data` sampled at every rising edge of `clock`
    pub fn sampled_bits(&self, data: &str, clock: &str) -> Vec<bool> {
        let mut level = false;
        let mut bits = Vec::new();
        for edge in &self.edges {
            if edge.line == data {
                level = edge.high;
            } else if edge.line == clock && edge.high {
                bits.push(level);
            }
        }
        bits
    }
}

pub struct MockLine<'a> {
    name: &'static str,
    trace: &'a RefCell<Trace>,
    high: bool,
}

impl<'a> MockLine<'a> {
    pub fn new(name: &'static str, trace: &'a RefCell<Trace>) -> Self {
        Self {
            name,
            trace,
            high: false,
        }
    }
}

impl GpioLine for MockLine<'_> {
    fn set(&mut self) {
        self.high = true;
        self.trace.borrow_mut().edges.push(Edge {
            line: self.name,
            high: true,
        });
    }

    fn clear(&mut self) {
        self.high = false;
        self.trace.borrow_mut().edges.push(Edge {
            line: self.name,
            high: false,
        });
    }

    fn is_set(&self) -> bool {
        self.high
    }
}

pub struct MockSerial<'a> {
    trace: &'a RefCell<Trace>,
}

impl<'a> MockSerial<'a> {
    pub fn new(trace: &'a RefCell<Trace>) -> Self {
        Self { trace }
    }
}

impl SerialTx for MockSerial<'_> {
    fn write_byte(&mut self, byte: u8) {
        self.trace.borrow_mut().serial.push(byte);
    }
}
