//! Reset cause capture
//!
//! The reason registers are read once at boot, folded into the normalised
//! flag byte and kept in a `.uninit` byte so it survives the next reset.
//! The watchdog is then disabled; nothing in the firmware feeds it.

use core::mem::MaybeUninit;
use core::ptr::addr_of_mut;

use embassy_rp::pac;
use tlcscan_hal::reset::{FLAG_DEBUG, FLAG_EXTERNAL, FLAG_POWER_ON, FLAG_WATCHDOG};
use tlcscan_hal::ResetCause;

#[link_section = ".uninit.RESET_CAUSE"]
static mut RESET_FLAGS: MaybeUninit<u8> = MaybeUninit::uninit();

/// Read the reset reason, store it and disable the watchdog
///
/// Must run once, before anything else touches the watchdog.
pub fn capture_and_disable_watchdog() -> ResetCause {
    let flags = read_flags();

    // SAFETY: single call at boot before interrupts are enabled
    unsafe { addr_of_mut!(RESET_FLAGS).write(MaybeUninit::new(flags)) };

    pac::WATCHDOG.ctrl().modify(|w| w.set_enable(false));

    ResetCause::from_flags(flags)
}

/// Flags stored by the last [`capture_and_disable_watchdog`]
pub fn stored_flags() -> u8 {
    // SAFETY: written at boot by capture_and_disable_watchdog
    unsafe { addr_of_mut!(RESET_FLAGS).read().assume_init() }
}

fn read_flags() -> u8 {
    let mut flags = 0;

    let watchdog = pac::WATCHDOG.reason().read();
    if watchdog.timer() || watchdog.force() {
        flags |= FLAG_WATCHDOG;
    }

    let chip = pac::VREG_AND_CHIP_RESET.chip_reset().read();
    // Brown-out is reported as a power-on reset
    if chip.had_por() {
        flags |= FLAG_POWER_ON;
    }
    if chip.had_run() {
        flags |= FLAG_EXTERNAL;
    }
    if chip.had_psm_restart() {
        flags |= FLAG_DEBUG;
    }

    flags
}
