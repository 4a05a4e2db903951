//! tlcscan - TLC5940 LED matrix scan firmware
//!
//! Drives an 8×8 two-colour LED matrix through one TLC5940 grayscale PWM
//! chip with row multiplexing. Two scan strategies are available as cargo
//! features:
//!
//! - `irq-scan` (default): hardware serial shift chained from interrupts,
//!   free-running grayscale clock, animated brightness in the main loop
//! - `busy-scan`: everything bit-banged from one loop, static frame

#![no_std]
#![no_main]

#[cfg(all(feature = "irq-scan", feature = "busy-scan"))]
compile_error!("features `irq-scan` and `busy-scan` are mutually exclusive");

#[cfg(not(any(feature = "irq-scan", feature = "busy-scan")))]
compile_error!("enable exactly one of the `irq-scan` or `busy-scan` features");

use defmt::*;
use embassy_executor::Spawner;
use tlcscan_core::config::STARTUP_SCALE;
use tlcscan_core::encoder::{encode_frame, PackedFrame};
use tlcscan_core::frame::{test_pattern, Orientation};
use tlcscan_hal_rp2040::pins::{PinBank, PinBankPeripherals};
use tlcscan_hal_rp2040::reset;
use {defmt_rtt as _, panic_probe as _};

mod board;
#[cfg(feature = "busy-scan")]
mod busy_scan;
#[cfg(feature = "irq-scan")]
mod irq_scan;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    // Before anything can trip the watchdog
    let reset_cause = reset::capture_and_disable_watchdog();

    info!("tlcscan firmware starting...");
    info!(
        "Reset cause: {} (flags {:#x})",
        reset_cause,
        reset::stored_flags()
    );

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    board::validate();
    board::log_summary();

    // Frame shown until the first animation step
    let mut initial = PackedFrame::new();
    encode_frame(&test_pattern(), STARTUP_SCALE, Orientation::Normal, &mut initial);

    let (mut pins, remaining) = PinBankPeripherals::from_peripherals(p);

    #[cfg(feature = "irq-scan")]
    {
        info!("Scan strategy: interrupt-driven");
        let scan_peripherals = irq_scan::ScanPeripherals {
            spi0: remaining.spi0,
            sclk: unwrap!(pins.pin18.take()),
            sin: unwrap!(pins.pin19.take()),
            pwm_slice2: remaining.pwm_slice2,
            gsclk: unwrap!(pins.pin20.take()),
        };
        let mut bank = PinBank::new(&mut pins);
        let _clock = irq_scan::start(scan_peripherals, &mut bank, &initial);

        animate(initial).await;
    }

    #[cfg(feature = "busy-scan")]
    {
        info!("Scan strategy: busy-loop");
        let _ = remaining;
        let mut bank = PinBank::new(&mut pins);
        busy_scan::run(&mut bank, &initial);
    }
}

/// Animation loop: rescale, re-encode and publish forever
#[cfg(feature = "irq-scan")]
async fn animate(mut packed: PackedFrame) -> ! {
    use embassy_futures::yield_now;
    use embassy_time::Instant;
    use tlcscan_core::config::ScaleBounds;
    use tlcscan_core::frame::FrameSource;

    let mut source = FrameSource::new(test_pattern(), ScaleBounds::default());
    let mut traversal_start = Instant::now();
    let mut traversals: u32 = 0;

    info!("Animation running");

    loop {
        let flipped = source.step(&mut packed);
        irq_scan::publish(&packed);

        if flipped {
            traversals = traversals.wrapping_add(1);
            info!(
                "Traversal {} took {} ms, orientation now {}",
                traversals,
                traversal_start.elapsed().as_millis(),
                source.scale().orientation()
            );
            traversal_start = Instant::now();
        }

        yield_now().await;
    }
}
