//! Board binding types
//!
//! These types name which physical line carries which TLC5940 signal.
//! The firmware build script generates a `const BoardConfig` from
//! `board.toml`; nothing here depends on a specific chip.

use heapless::FnvIndexSet;

use super::types::MAX_ROW_LINES;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin number beyond the chip's GPIO count
    InvalidPin(u8),
    /// Pin bound to more than one signal
    DuplicatePin(u8),
    /// Row count zero or wider than the row-select bus
    RowCountOutOfRange(u8),
    /// Start row not below the row count
    StartRowOutOfRange(u8),
    /// PWM period too short to shift a full row
    PwmTopTooShort(u16),
    /// Row-advance timer period of zero
    ZeroRowPeriod,
    /// Hardware shift of one row (in µs) does not fit in a row period
    RowShiftTooSlow(u32),
}

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }
}

/// Physical binding of every signal the scan engine drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// Board name from `board.toml`
    pub name: &'static str,
    /// Serial data into the chip (SIN / MOSI)
    pub sin: PinConfig,
    /// Serial clock (SCLK / SCK)
    pub sclk: PinConfig,
    /// Latch (XLAT)
    pub xlat: PinConfig,
    /// Blank (BLANK)
    pub blank: PinConfig,
    /// Grayscale clock (GSCLK)
    pub gsclk: PinConfig,
    /// Optional diagnostic LED
    pub status_led: Option<PinConfig>,
    /// Row-select bus, line `i` selects row `i`
    pub row_select: [PinConfig; MAX_ROW_LINES],
}

impl BoardConfig {
    /// Check that every pin exists and is bound exactly once
    pub fn validate(&self, gpio_count: u8) -> Result<(), ConfigError> {
        let mut pins = PinAllocator::new(gpio_count);
        for pin in [self.sin, self.sclk, self.xlat, self.blank, self.gsclk] {
            pins.allocate(pin.pin)?;
        }
        if let Some(led) = self.status_led {
            pins.allocate(led.pin)?;
        }
        for row in &self.row_select {
            pins.allocate(row.pin)?;
        }
        Ok(())
    }
}

/// Tracks which GPIO pins are in use to prevent conflicts
pub struct PinAllocator {
    gpio_count: u8,
    allocated: FnvIndexSet<u8, 64>,
}

impl PinAllocator {
    /// Create an allocator for a chip with `gpio_count` pins
    pub fn new(gpio_count: u8) -> Self {
        Self {
            gpio_count,
            allocated: FnvIndexSet::new(),
        }
    }

    /// Allocate a GPIO pin
    pub fn allocate(&mut self, pin: u8) -> Result<(), ConfigError> {
        if pin >= self.gpio_count {
            return Err(ConfigError::InvalidPin(pin));
        }
        match self.allocated.insert(pin) {
            Ok(true) => Ok(()),
            Ok(false) => Err(ConfigError::DuplicatePin(pin)),
            Err(_) => Err(ConfigError::InvalidPin(pin)),
        }
    }

    /// Check if a pin is allocated
    pub fn is_allocated(&self, pin: u8) -> bool {
        self.allocated.contains(&pin)
    }

    /// Get the number of allocated pins
    pub fn allocated_count(&self) -> usize {
        self.allocated.len()
    }
}
