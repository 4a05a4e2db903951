//! SPI0 transmit register
//!
//! The PL022 block shifts each byte out in hardware. Byte completion is
//! reported through the receive-timeout interrupt: every transmitted byte
//! also clocks one byte into the RX FIFO, and the timeout fires once the
//! line has been idle for 32 bit periods after the last one.
//!
//! A byte therefore costs 40 bit periods. `ScanConfig::validate_serial`
//! checks that a whole row of them fits in the row period.

use embassy_rp::interrupt::{self, InterruptExt, Priority};
use embassy_rp::pac;
use embassy_rp::peripherals::{PIN_18, PIN_19, SPI0};
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_rp::Peri;
use tlcscan_hal::serial::{Phase, Polarity, SerialConfig};
use tlcscan_hal::SerialTx;

/// SPI0 in master transmit-only mode, one byte per write
pub struct Spi0Tx {
    _spi: Spi<'static, SPI0, Blocking>,
}

impl Spi0Tx {
    /// Configure SPI0 on its SCK/TX pins and unmask the byte-complete
    /// interrupt source
    ///
    /// The NVIC line is left disabled until [`Spi0Tx::enable_interrupt`].
    pub fn new(
        spi: Peri<'static, SPI0>,
        sclk: Peri<'static, PIN_18>,
        sin: Peri<'static, PIN_19>,
        config: &SerialConfig,
    ) -> Self {
        let mut spi_config = spi::Config::default();
        spi_config.frequency = config.frequency;
        spi_config.polarity = match config.polarity {
            Polarity::IdleLow => spi::Polarity::IdleLow,
            Polarity::IdleHigh => spi::Polarity::IdleHigh,
        };
        spi_config.phase = match config.phase {
            Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
            Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
        };

        let spi = Spi::new_blocking_txonly(spi, sclk, sin, spi_config);

        Self::acknowledge();
        pac::SPI0.imsc().write(|w| w.set_rtim(true));

        Self { _spi: spi }
    }

    /// Enable the SPI0 interrupt in the NVIC
    pub fn enable_interrupt(&self, priority: Priority) {
        interrupt::SPI0_IRQ.unpend();
        interrupt::SPI0_IRQ.set_priority(priority);
        // SAFETY: the handler only touches state behind a critical section
        unsafe { interrupt::SPI0_IRQ.enable() };
    }

    /// Drain the RX FIFO and clear the byte-complete condition
    ///
    /// Called at the top of the SPI0 interrupt handler.
    pub fn acknowledge() {
        while pac::SPI0.sr().read().rne() {
            let _ = pac::SPI0.dr().read();
        }
        pac::SPI0.icr().write(|w| w.set_rtic(true));
    }
}

impl SerialTx for Spi0Tx {
    #[inline]
    fn write_byte(&mut self, byte: u8) {
        pac::SPI0.dr().write(|w| w.set_data(u16::from(byte)));
    }
}
