//! Interrupt-driven scan
//!
//! TIMER_IRQ_1 advances the row every row period; SPI0_IRQ feeds the next
//! byte each time the transmitter finishes one. The engine and row timer
//! live behind a critical-section mutex shared with the animation loop,
//! which publishes each new packed frame through [`publish`].

use core::cell::RefCell;

use defmt::*;
use embassy_rp::interrupt;
use embassy_rp::interrupt::Priority;
use embassy_rp::peripherals::{PIN_18, PIN_19, PIN_20, PWM_SLICE2, SPI0};
use embassy_rp::Peri;
use embassy_sync::blocking_mutex::CriticalSectionMutex;
use tlcscan_core::encoder::PackedFrame;
use tlcscan_core::scan::{IrqScanEngine, ScanEngine};
use tlcscan_drivers::Tlc5940Serial;
use tlcscan_hal_rp2040::pins::PinBank;
use tlcscan_hal_rp2040::pwm::GrayscaleClock;
use tlcscan_hal_rp2040::serial::Spi0Tx;
use tlcscan_hal_rp2040::timer::RowTimer;

use crate::board::{self, Line, RowBus, BOARD, SCAN};

/// Both scan interrupts run at the same priority so neither preempts the
/// other mid-update
const SCAN_PRIORITY: Priority = Priority::P1;

type Engine = IrqScanEngine<Tlc5940Serial<Line, Spi0Tx>, RowBus>;

struct Scan {
    engine: Engine,
    timer: RowTimer,
}

static SCAN_STATE: CriticalSectionMutex<RefCell<Option<Scan>>> =
    CriticalSectionMutex::new(RefCell::new(None));

/// Peripherals with fixed functions on this path
pub struct ScanPeripherals {
    pub spi0: Peri<'static, SPI0>,
    pub sclk: Peri<'static, PIN_18>,
    pub sin: Peri<'static, PIN_19>,
    pub pwm_slice2: Peri<'static, PWM_SLICE2>,
    pub gsclk: Peri<'static, PIN_20>,
}

/// Bring up the hardware and start scanning `initial`
///
/// Returns the grayscale clock, which must stay alive while scanning.
pub fn start(p: ScanPeripherals, bank: &mut PinBank, initial: &PackedFrame) -> GrayscaleClock {
    let rows = unwrap!(board::row_bus(bank));
    let xlat = unwrap!(bank.take_line(BOARD.xlat, false));
    let blank = unwrap!(bank.take_line(BOARD.blank, true));

    let serial = Spi0Tx::new(p.spi0, p.sclk, p.sin, &board::serial_config());
    let driver = Tlc5940Serial::new(xlat, blank, serial);

    // One full grayscale cycle per row period
    let gsclk_hz =
        (u64::from(SCAN.pwm_top) + 1) * 1_000_000 / u64::from(SCAN.row_period_us);
    let clock = GrayscaleClock::new(p.pwm_slice2, p.gsclk, gsclk_hz as u32);
    info!("Grayscale clock {} Hz", clock.frequency());

    let mut engine = Engine::new(driver, rows, SCAN);
    engine.start(initial);

    SCAN_STATE.lock(|cell| {
        let mut scan = Scan {
            engine,
            timer: RowTimer::new(SCAN.row_period_us),
        };
        scan.engine.driver().serial().enable_interrupt(SCAN_PRIORITY);
        scan.timer.start(SCAN_PRIORITY);
        *cell.borrow_mut() = Some(scan);
    });

    info!("Row timer running, {}us per row", SCAN.row_period_us);
    clock
}

/// Replace the frame being scanned
pub fn publish(packed: &PackedFrame) {
    SCAN_STATE.lock(|cell| {
        if let Some(scan) = cell.borrow_mut().as_mut() {
            scan.engine.publish(packed);
        }
    });
}

#[interrupt]
fn TIMER_IRQ_1() {
    SCAN_STATE.lock(|cell| {
        if let Some(scan) = cell.borrow_mut().as_mut() {
            scan.timer.rearm();
            scan.engine.on_row_advance();
        }
    });
}

#[interrupt]
fn SPI0_IRQ() {
    Spi0Tx::acknowledge();
    SCAN_STATE.lock(|cell| {
        if let Some(scan) = cell.borrow_mut().as_mut() {
            scan.engine.on_byte_complete();
        }
    });
}
