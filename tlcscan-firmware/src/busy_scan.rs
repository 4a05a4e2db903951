//! Busy-loop scan
//!
//! Everything is bit-banged from the main context: one data bit and one
//! grayscale clock per loop iteration. The loop never returns, so the frame
//! is encoded once at startup and never animated.

use defmt::*;
use tlcscan_core::encoder::PackedFrame;
use tlcscan_core::scan::{BusyScanEngine, ScanEngine};
use tlcscan_drivers::{StatusLed, Tlc5940, Tlc5940Pins};
use tlcscan_hal_rp2040::delay::CycleBusyWait;
use tlcscan_hal_rp2040::pins::PinBank;

use crate::board::{self, BOARD, SCAN};

/// Startup flashes of the status LED
const STATUS_FLASHES: u16 = 5;

/// Status LED half period in 100µs blocks (2ms)
const STATUS_HALF_PERIOD: u16 = 20;

/// Bring up the lines, flash the status LED and scan `initial` forever
pub fn run(bank: &mut PinBank, initial: &PackedFrame) -> ! {
    let rows = unwrap!(board::row_bus(bank));
    let chip = Tlc5940::new(Tlc5940Pins {
        sin: unwrap!(bank.take_line(BOARD.sin, false)),
        sclk: unwrap!(bank.take_line(BOARD.sclk, false)),
        xlat: unwrap!(bank.take_line(BOARD.xlat, false)),
        blank: unwrap!(bank.take_line(BOARD.blank, true)),
        gsclk: unwrap!(bank.take_line(BOARD.gsclk, false)),
    });

    if let Some(led) = BOARD.status_led {
        let mut led = StatusLed::new(unwrap!(bank.take_line(led, false)));
        let mut wait = CycleBusyWait::new();
        led.flash(&mut wait, STATUS_FLASHES, STATUS_HALF_PERIOD);
    }

    let mut engine: BusyScanEngine<_, _> = BusyScanEngine::new(chip, rows, SCAN);
    engine.start(initial);

    info!("Busy-loop scan running, {} ticks per row", u32::from(SCAN.pwm_top) + 1);
    engine.run()
}
