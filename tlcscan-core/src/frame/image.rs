//! Logical frame definition

use crate::config::{COLUMN_COUNT, FRAME_ROWS};

/// Colour channel of a bi-colour LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Shifted first in every row
    Green,
    /// Shifted after all green codes
    Red,
}

impl Channel {
    /// Channels in wire order
    pub const ALL: [Channel; 2] = [Channel::Green, Channel::Red];
}

/// One LED's intensities, 16 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pixel {
    pub red: u16,
    pub green: u16,
}

impl Pixel {
    /// Red-only pixel
    pub const fn red(value: u16) -> Self {
        Self {
            red: value,
            green: 0,
        }
    }

    /// Green-only pixel
    pub const fn green(value: u16) -> Self {
        Self {
            red: 0,
            green: value,
        }
    }

    /// Intensity of one channel
    pub fn channel(&self, channel: Channel) -> u16 {
        match channel {
            Channel::Green => self.green,
            Channel::Red => self.red,
        }
    }
}

/// Logical grayscale frame, `ROWS` rows of [`COLUMN_COUNT`] pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalFrame<const ROWS: usize = FRAME_ROWS> {
    rows: [[Pixel; COLUMN_COUNT]; ROWS],
}

impl<const ROWS: usize> Default for LogicalFrame<ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROWS: usize> LogicalFrame<ROWS> {
    /// All-dark frame
    pub const fn new() -> Self {
        Self {
            rows: [[Pixel { red: 0, green: 0 }; COLUMN_COUNT]; ROWS],
        }
    }

    /// Frame from explicit rows
    pub const fn from_rows(rows: [[Pixel; COLUMN_COUNT]; ROWS]) -> Self {
        Self { rows }
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> &[Pixel; COLUMN_COUNT] {
        &self.rows[row]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel; COLUMN_COUNT]> {
        self.rows.iter()
    }

    /// Read a pixel; out-of-range coordinates read as dark
    pub fn get(&self, row: usize, col: usize) -> Pixel {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or_default()
    }

    /// Write a pixel; out-of-range coordinates are ignored
    pub fn set(&mut self, row: usize, col: usize, pixel: Pixel) {
        if let Some(slot) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = pixel;
        }
    }

    /// Copy with every row's columns reversed
    pub fn mirrored(&self) -> Self {
        let mut rows = self.rows;
        for row in rows.iter_mut() {
            row.reverse();
        }
        Self { rows }
    }
}

const GREEN_RAMP: [Pixel; COLUMN_COUNT] = [
    Pixel::green(7),
    Pixel::green(6),
    Pixel::green(5),
    Pixel::green(4),
    Pixel::green(3),
    Pixel::green(2),
    Pixel::green(1),
    Pixel::green(0),
];

const RED_RAMP: [Pixel; COLUMN_COUNT] = [
    Pixel::red(0),
    Pixel::red(1),
    Pixel::red(2),
    Pixel::red(3),
    Pixel::red(4),
    Pixel::red(5),
    Pixel::red(6),
    Pixel::red(7),
];

/// Two-colour ramp pattern shown on power-up
///
/// Row pairs alternate between a falling green ramp and a rising red ramp,
/// so a mirrored frame is easy to tell apart from a normal one.
pub const fn test_pattern() -> LogicalFrame<FRAME_ROWS> {
    LogicalFrame::from_rows([
        GREEN_RAMP, GREEN_RAMP, RED_RAMP, RED_RAMP, GREEN_RAMP, GREEN_RAMP, RED_RAMP, RED_RAMP,
    ])
}
