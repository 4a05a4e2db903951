//! Geometry, scan timing and animation bounds

use super::hardware::ConfigError;

/// Rows in a logical frame
pub const FRAME_ROWS: usize = 8;

/// Columns per row (LEDs per channel on one TLC5940)
pub const COLUMN_COUNT: usize = 8;

/// Colour channels per LED
pub const CHANNEL_COUNT: usize = 2;

/// Bits per grayscale code on the wire
pub const GRAYSCALE_BITS: u32 = 12;

/// Largest code the chip can display
pub const GRAYSCALE_MAX: u16 = (1 << GRAYSCALE_BITS) - 1;

/// Bytes holding one pair of 12-bit codes
pub const BYTES_PER_PAIR: usize = 3;

/// Bytes holding one channel of a row
pub const CHANNEL_BYTES: usize = COLUMN_COUNT / 2 * BYTES_PER_PAIR;

/// Bytes shifted out per row (L)
pub const ROW_BYTES: usize = CHANNEL_BYTES * CHANNEL_COUNT;

/// Bits shifted out per row
pub const ROW_BITS: usize = ROW_BYTES * 8;

/// Lines on the row-select bus
pub const MAX_ROW_LINES: usize = 8;

/// Bit periods from writing a byte to its byte-complete interrupt
///
/// Eight data bits plus the 32-bit receive timeout that signals completion.
pub const BYTE_COMPLETE_BITS: u64 = 8 + 32;

/// Allowance for one byte-complete or row-advance interrupt entry, in µs
pub const IRQ_LATENCY_US: u64 = 2;

/// Scale used for the frame published before the animation starts
pub const STARTUP_SCALE: u16 = 127;

/// Row scan timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanConfig {
    /// Physical rows cycled through (at most [`MAX_ROW_LINES`])
    pub row_count: u8,
    /// Row index the engine starts from
    pub start_row: u8,
    /// Software PWM counter reload value (busy-loop strategy)
    ///
    /// One row lasts `pwm_top + 1` grayscale clock ticks.
    pub pwm_top: u16,
    /// Row-advance timer period in microseconds (interrupt-driven strategy)
    pub row_period_us: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            row_count: 8,
            start_row: 4,
            pwm_top: GRAYSCALE_MAX,
            // 4096 clocks of a 16 MHz part: one full grayscale cycle
            row_period_us: 256,
        }
    }
}

impl ScanConfig {
    /// Check the timing against the matrix geometry
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.row_count == 0 || self.row_count as usize > MAX_ROW_LINES {
            return Err(ConfigError::RowCountOutOfRange(self.row_count));
        }
        if self.start_row >= self.row_count {
            return Err(ConfigError::StartRowOutOfRange(self.start_row));
        }
        // The busy loop shifts one bit per PWM tick; a row must fit in a period.
        if (self.pwm_top as usize) + 1 < ROW_BITS {
            return Err(ConfigError::PwmTopTooShort(self.pwm_top));
        }
        if self.row_period_us == 0 {
            return Err(ConfigError::ZeroRowPeriod);
        }
        Ok(())
    }

    /// Worst-case time to shift one row through a hardware transmitter
    /// clocked at `serial_hz`, including interrupt entries, in µs
    pub fn row_shift_time_us(serial_hz: u32) -> u32 {
        if serial_hz == 0 {
            return u32::MAX;
        }
        let bits = ROW_BYTES as u64 * BYTE_COMPLETE_BITS;
        let wire = (bits * 1_000_000).div_ceil(u64::from(serial_hz));
        // One row advance plus one completion per byte
        let latency = (ROW_BYTES as u64 + 1) * IRQ_LATENCY_US;
        u32::try_from(wire + latency).unwrap_or(u32::MAX)
    }

    /// Check that a whole row can be shifted before the next row advance
    ///
    /// Only the interrupt-driven strategy depends on this; the busy loop is
    /// covered by [`ScanConfig::validate`].
    pub fn validate_serial(&self, serial_hz: u32) -> Result<(), ConfigError> {
        let shift = Self::row_shift_time_us(serial_hz);
        if shift >= self.row_period_us {
            return Err(ConfigError::RowShiftTooSlow(shift));
        }
        Ok(())
    }
}

/// Bounds of the animated brightness scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaleBounds {
    /// Scale at power-on
    pub initial: u16,
    /// Direction turns upward (and orientation flips) at or below this
    pub lower: u16,
    /// Direction turns downward at or above this
    pub upper: u16,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self {
            initial: 1,
            lower: 2,
            upper: 510,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry() {
        assert_eq!(CHANNEL_BYTES, 12);
        assert_eq!(ROW_BYTES, 24);
        assert_eq!(GRAYSCALE_MAX, 0x0FFF);
    }

    #[test]
    fn test_default_scan_config_is_valid() {
        let config = ScanConfig::default();
        assert_eq!(config.start_row, 4);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_scan_config_rejects_bad_rows() {
        let config = ScanConfig {
            row_count: 9,
            ..ScanConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::RowCountOutOfRange(9)));

        let config = ScanConfig {
            row_count: 4,
            start_row: 4,
            ..ScanConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::StartRowOutOfRange(4)));
    }

    #[test]
    fn test_scan_config_rejects_short_pwm_period() {
        let config = ScanConfig {
            pwm_top: (ROW_BITS - 2) as u16,
            ..ScanConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::PwmTopTooShort(_))));

        // Exactly one tick per bit is enough
        let config = ScanConfig {
            pwm_top: (ROW_BITS - 1) as u16,
            ..ScanConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_row_shift_time() {
        // 24 bytes × 40 bits at 12.5 MHz is 76.8µs, plus 25 interrupt entries
        assert_eq!(ScanConfig::row_shift_time_us(12_500_000), 77 + 50);
        assert_eq!(ScanConfig::row_shift_time_us(0), u32::MAX);
    }

    #[test]
    fn test_serial_fits_row_period() {
        let config = ScanConfig::default();
        assert_eq!(config.validate_serial(12_500_000), Ok(()));
    }

    #[test]
    fn test_slow_serial_overruns_row_period() {
        let config = ScanConfig::default();

        // 4 MHz: 240µs on the wire alone, 290µs with interrupts
        assert_eq!(
            config.validate_serial(4_000_000),
            Err(ConfigError::RowShiftTooSlow(290))
        );

        // Rounded down by the clock divider, the wire time still nearly fills a row
        assert!(config.validate_serial(3_906_250).is_err());
        assert!(config.validate_serial(0).is_err());
    }

    #[test]
    fn test_longer_row_period_accepts_slower_serial() {
        let config = ScanConfig {
            row_period_us: 512,
            ..ScanConfig::default()
        };
        assert_eq!(config.validate_serial(4_000_000), Ok(()));
    }
}
