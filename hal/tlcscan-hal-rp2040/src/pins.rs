//! Dynamic pin allocation for config-driven hardware setup
//!
//! Board pin numbers come from the generated board configuration, so lines
//! are taken from the bank by number at startup. The hardware-serial path
//! needs a few pins with fixed peripheral functions; those are moved out of
//! [`PinBankPeripherals`] before the bank is built.

use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;
use embassy_rp::Peripherals;
use tlcscan_core::config::PinConfig;

use crate::gpio::OutputLine;

/// Number of user GPIOs on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// SPI0 SCK, wired to the chip's SCLK
pub const SPI0_SCLK_PIN: u8 = 18;

/// SPI0 TX, wired to the chip's SIN
pub const SPI0_SIN_PIN: u8 = 19;

/// PWM slice 2 channel A, wired to the chip's GSCLK
pub const PWM_GSCLK_PIN: u8 = 20;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
}

/// Pin bank that holds all GPIO pins and allows taking them by number
///
/// This enables config-driven pin assignment where pin numbers come from
/// `board.toml` rather than being hardcoded.
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT as usize],
}

impl PinBank {
    /// Create a new pin bank from peripherals
    ///
    /// Takes ownership of every GPIO pin still present in `p`. Pins moved
    /// out beforehand (fixed-function SPI and PWM pins) show as taken.
    pub fn new(p: &mut PinBankPeripherals) -> Self {
        Self {
            pins: [
                p.pin0.take().map(|pin| pin.into()),
                p.pin1.take().map(|pin| pin.into()),
                p.pin2.take().map(|pin| pin.into()),
                p.pin3.take().map(|pin| pin.into()),
                p.pin4.take().map(|pin| pin.into()),
                p.pin5.take().map(|pin| pin.into()),
                p.pin6.take().map(|pin| pin.into()),
                p.pin7.take().map(|pin| pin.into()),
                p.pin8.take().map(|pin| pin.into()),
                p.pin9.take().map(|pin| pin.into()),
                p.pin10.take().map(|pin| pin.into()),
                p.pin11.take().map(|pin| pin.into()),
                p.pin12.take().map(|pin| pin.into()),
                p.pin13.take().map(|pin| pin.into()),
                p.pin14.take().map(|pin| pin.into()),
                p.pin15.take().map(|pin| pin.into()),
                p.pin16.take().map(|pin| pin.into()),
                p.pin17.take().map(|pin| pin.into()),
                p.pin18.take().map(|pin| pin.into()),
                p.pin19.take().map(|pin| pin.into()),
                p.pin20.take().map(|pin| pin.into()),
                p.pin21.take().map(|pin| pin.into()),
                p.pin22.take().map(|pin| pin.into()),
                p.pin23.take().map(|pin| pin.into()),
                p.pin24.take().map(|pin| pin.into()),
                p.pin25.take().map(|pin| pin.into()),
                p.pin26.take().map(|pin| pin.into()),
                p.pin27.take().map(|pin| pin.into()),
                p.pin28.take().map(|pin| pin.into()),
                p.pin29.take().map(|pin| pin.into()),
            ],
        }
    }

    /// Take a pin by number
    ///
    /// Returns the pin if available, or an error if:
    /// - Pin number is invalid (>= GPIO_COUNT)
    /// - Pin was already taken
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }

    /// Take a pin by number and configure it as an output line
    ///
    /// The line starts at logical level `set`, honouring the configured
    /// inversion.
    pub fn take_line(
        &mut self,
        config: PinConfig,
        set: bool,
    ) -> Result<OutputLine<'static>, PinError> {
        let pin = self.take(config.pin)?;
        Ok(OutputLine::new(pin, config.inverted, set))
    }
}

/// Peripherals needed for PinBank
///
/// This struct holds the GPIO pins that will be moved into the PinBank.
/// Using Option allows taking pins individually without consuming the whole Peripherals.
pub struct PinBankPeripherals {
    pub pin0: Option<Peri<'static, embassy_rp::peripherals::PIN_0>>,
    pub pin1: Option<Peri<'static, embassy_rp::peripherals::PIN_1>>,
    pub pin2: Option<Peri<'static, embassy_rp::peripherals::PIN_2>>,
    pub pin3: Option<Peri<'static, embassy_rp::peripherals::PIN_3>>,
    pub pin4: Option<Peri<'static, embassy_rp::peripherals::PIN_4>>,
    pub pin5: Option<Peri<'static, embassy_rp::peripherals::PIN_5>>,
    pub pin6: Option<Peri<'static, embassy_rp::peripherals::PIN_6>>,
    pub pin7: Option<Peri<'static, embassy_rp::peripherals::PIN_7>>,
    pub pin8: Option<Peri<'static, embassy_rp::peripherals::PIN_8>>,
    pub pin9: Option<Peri<'static, embassy_rp::peripherals::PIN_9>>,
    pub pin10: Option<Peri<'static, embassy_rp::peripherals::PIN_10>>,
    pub pin11: Option<Peri<'static, embassy_rp::peripherals::PIN_11>>,
    pub pin12: Option<Peri<'static, embassy_rp::peripherals::PIN_12>>,
    pub pin13: Option<Peri<'static, embassy_rp::peripherals::PIN_13>>,
    pub pin14: Option<Peri<'static, embassy_rp::peripherals::PIN_14>>,
    pub pin15: Option<Peri<'static, embassy_rp::peripherals::PIN_15>>,
    pub pin16: Option<Peri<'static, embassy_rp::peripherals::PIN_16>>,
    pub pin17: Option<Peri<'static, embassy_rp::peripherals::PIN_17>>,
    pub pin18: Option<Peri<'static, embassy_rp::peripherals::PIN_18>>,
    pub pin19: Option<Peri<'static, embassy_rp::peripherals::PIN_19>>,
    pub pin20: Option<Peri<'static, embassy_rp::peripherals::PIN_20>>,
    pub pin21: Option<Peri<'static, embassy_rp::peripherals::PIN_21>>,
    pub pin22: Option<Peri<'static, embassy_rp::peripherals::PIN_22>>,
    pub pin23: Option<Peri<'static, embassy_rp::peripherals::PIN_23>>,
    pub pin24: Option<Peri<'static, embassy_rp::peripherals::PIN_24>>,
    pub pin25: Option<Peri<'static, embassy_rp::peripherals::PIN_25>>,
    pub pin26: Option<Peri<'static, embassy_rp::peripherals::PIN_26>>,
    pub pin27: Option<Peri<'static, embassy_rp::peripherals::PIN_27>>,
    pub pin28: Option<Peri<'static, embassy_rp::peripherals::PIN_28>>,
    pub pin29: Option<Peri<'static, embassy_rp::peripherals::PIN_29>>,
}

impl PinBankPeripherals {
    /// Create from Embassy Peripherals
    pub fn from_peripherals(p: Peripherals) -> (Self, RemainingPeripherals) {
        let pins = Self {
            pin0: Some(p.PIN_0),
            pin1: Some(p.PIN_1),
            pin2: Some(p.PIN_2),
            pin3: Some(p.PIN_3),
            pin4: Some(p.PIN_4),
            pin5: Some(p.PIN_5),
            pin6: Some(p.PIN_6),
            pin7: Some(p.PIN_7),
            pin8: Some(p.PIN_8),
            pin9: Some(p.PIN_9),
            pin10: Some(p.PIN_10),
            pin11: Some(p.PIN_11),
            pin12: Some(p.PIN_12),
            pin13: Some(p.PIN_13),
            pin14: Some(p.PIN_14),
            pin15: Some(p.PIN_15),
            pin16: Some(p.PIN_16),
            pin17: Some(p.PIN_17),
            pin18: Some(p.PIN_18),
            pin19: Some(p.PIN_19),
            pin20: Some(p.PIN_20),
            pin21: Some(p.PIN_21),
            pin22: Some(p.PIN_22),
            pin23: Some(p.PIN_23),
            pin24: Some(p.PIN_24),
            pin25: Some(p.PIN_25),
            pin26: Some(p.PIN_26),
            pin27: Some(p.PIN_27),
            pin28: Some(p.PIN_28),
            pin29: Some(p.PIN_29),
        };
        let remaining = RemainingPeripherals {
            spi0: p.SPI0,
            pwm_slice2: p.PWM_SLICE2,
        };
        (pins, remaining)
    }
}

/// Non-GPIO peripherals that remain after creating PinBank
pub struct RemainingPeripherals {
    pub spi0: Peri<'static, embassy_rp::peripherals::SPI0>,
    pub pwm_slice2: Peri<'static, embassy_rp::peripherals::PWM_SLICE2>,
}
