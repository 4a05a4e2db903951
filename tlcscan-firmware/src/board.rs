//! Board binding
//!
//! The pin map and scan timing are generated from `board.toml` at build
//! time; this module turns them into lines and buses.

use defmt::*;
use tlcscan_core::config::{BoardConfig, PinConfig, ScanConfig, MAX_ROW_LINES};
use tlcscan_drivers::GpioRowSelect;
use tlcscan_hal::serial::SerialConfig;
use tlcscan_hal_rp2040::gpio::OutputLine;
use tlcscan_hal_rp2040::pins::{PinBank, PinError, GPIO_COUNT};

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));

/// Any output line of the board
pub type Line = OutputLine<'static>;

/// The row-select bus
pub type RowBus = GpioRowSelect<Line, MAX_ROW_LINES>;

/// Check the generated binding before touching any pin
pub fn validate() {
    unwrap!(BOARD.validate(GPIO_COUNT));
    unwrap!(SCAN.validate());
    #[cfg(feature = "irq-scan")]
    unwrap!(SCAN.validate_serial(SERIAL_FREQUENCY));
}

/// Serial shift settings for the hardware-serial path
pub fn serial_config() -> SerialConfig {
    SerialConfig {
        frequency: SERIAL_FREQUENCY,
        ..SerialConfig::default()
    }
}

/// Take every row line, all rows disabled
pub fn row_bus(bank: &mut PinBank) -> Result<RowBus, PinError> {
    let [r0, r1, r2, r3, r4, r5, r6, r7] = BOARD.row_select;
    Ok(GpioRowSelect::new([
        bank.take_line(r0, true)?,
        bank.take_line(r1, true)?,
        bank.take_line(r2, true)?,
        bank.take_line(r3, true)?,
        bank.take_line(r4, true)?,
        bank.take_line(r5, true)?,
        bank.take_line(r6, true)?,
        bank.take_line(r7, true)?,
    ]))
}

/// Log the binding
pub fn log_summary() {
    info!("Board: {}", BOARD.name);
    info!(
        "  sin={} sclk={} xlat={} blank={} gsclk={}",
        BOARD.sin.pin, BOARD.sclk.pin, BOARD.xlat.pin, BOARD.blank.pin, BOARD.gsclk.pin
    );
    info!("  rows={}", BOARD.row_select.map(|row| row.pin));
    if let Some(led) = BOARD.status_led {
        info!("  status_led={}", led.pin);
    }
    info!(
        "  {} rows from row {}, pwm_top={}, row period {}us",
        SCAN.row_count, SCAN.start_row, SCAN.pwm_top, SCAN.row_period_us
    );
}
