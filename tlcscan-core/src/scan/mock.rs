//! Recording mocks for scan engine tests

use core::cell::RefCell;

use crate::config::ROW_BYTES;
use crate::traits::{BitBangShift, GrayscaleDriver, HardwareShift, RowSelect};

/// Observable activity on the chip and row lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireEvent {
    Blank(bool),
    Latch,
    Select(u8),
    ReleaseAll,
    Byte(u8),
    Bit(bool),
}

/// Shared log of wire events plus a grayscale tick counter
#[derive(Default)]
pub struct Wire {
    pub events: Vec<WireEvent>,
    pub ticks: u32,
}

impl Wire {
    pub fn clear(&mut self) {
        self.events.clear();
        self.ticks = 0;
    }

    pub fn count(&self, event: WireEvent) -> usize {
        self.events.iter().filter(|&&e| e == event).count()
    }

    pub fn selections(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                WireEvent::Select(row) => Some(*row),
                _ => None,
            })
            .collect()
    }

    /// Bytes shifted after the most recent latch, bits reassembled MSB first
    pub fn shifted_since_latch(&self) -> Vec<u8> {
        let start = self
            .events
            .iter()
            .rposition(|&e| e == WireEvent::Latch)
            .map_or(0, |i| i + 1);
        assemble(&self.events[start..])
    }

    /// All bytes shifted in the log
    pub fn shifted(&self) -> Vec<u8> {
        assemble(&self.events)
    }
}

fn assemble(events: &[WireEvent]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(ROW_BYTES);
    let mut acc = 0u8;
    let mut bits = 0;
    for event in events {
        match *event {
            WireEvent::Byte(b) => bytes.push(b),
            WireEvent::Bit(high) => {
                acc = (acc << 1) | high as u8;
                bits += 1;
                if bits == 8 {
                    bytes.push(acc);
                    acc = 0;
                    bits = 0;
                }
            }
            _ => {}
        }
    }
    bytes
}

/// Driver mock implementing both shift strategies
pub struct MockDriver<'a> {
    wire: &'a RefCell<Wire>,
}

impl<'a> MockDriver<'a> {
    pub fn new(wire: &'a RefCell<Wire>) -> Self {
        Self { wire }
    }
}

impl GrayscaleDriver for MockDriver<'_> {
    fn set_blank(&mut self, blanked: bool) {
        self.wire.borrow_mut().events.push(WireEvent::Blank(blanked));
    }

    fn latch(&mut self) {
        self.wire.borrow_mut().events.push(WireEvent::Latch);
    }
}

impl HardwareShift for MockDriver<'_> {
    fn start_byte(&mut self, byte: u8) {
        self.wire.borrow_mut().events.push(WireEvent::Byte(byte));
    }
}

impl BitBangShift for MockDriver<'_> {
    fn shift_bit(&mut self, high: bool) {
        self.wire.borrow_mut().events.push(WireEvent::Bit(high));
    }

    fn grayscale_tick(&mut self) {
        self.wire.borrow_mut().ticks += 1;
    }
}

/// Row bus mock
pub struct MockRows<'a> {
    wire: &'a RefCell<Wire>,
}

impl<'a> MockRows<'a> {
    pub fn new(wire: &'a RefCell<Wire>) -> Self {
        Self { wire }
    }
}

impl RowSelect for MockRows<'_> {
    fn select(&mut self, row: u8) {
        self.wire.borrow_mut().events.push(WireEvent::Select(row));
    }

    fn release_all(&mut self) {
        self.wire.borrow_mut().events.push(WireEvent::ReleaseAll);
    }
}
