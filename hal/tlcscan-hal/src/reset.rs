//! Reset cause reporting
//!
//! Board crates capture their reset-reason registers into a single byte
//! that survives the restart, before the watchdog is disabled. The byte
//! uses the layout below regardless of chip, so the firmware can decode
//! and log it the same way on every board. Nothing in the scan path reads it.

/// Power-on reset
pub const FLAG_POWER_ON: u8 = 1 << 0;
/// External reset pin (RUN / RESET)
pub const FLAG_EXTERNAL: u8 = 1 << 1;
/// Brown-out detector
pub const FLAG_BROWN_OUT: u8 = 1 << 2;
/// Watchdog timeout
pub const FLAG_WATCHDOG: u8 = 1 << 3;
/// Debugger or software-forced reset
pub const FLAG_DEBUG: u8 = 1 << 4;

/// Most significant reason for the last reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetCause {
    /// Cold start
    PowerOn,
    /// Reset pin asserted
    External,
    /// Supply dipped below threshold
    BrownOut,
    /// Watchdog expired
    Watchdog,
    /// Debugger or software request
    Debug,
    /// No flag set (e.g. the capture byte was never written)
    Unknown,
}

impl ResetCause {
    /// Decode a captured flag byte
    ///
    /// When several flags are set the most severe one wins: a watchdog
    /// reset is more interesting than the power-on flag that is still
    /// latched from the original cold start.
    pub fn from_flags(flags: u8) -> Self {
        if flags & FLAG_WATCHDOG != 0 {
            ResetCause::Watchdog
        } else if flags & FLAG_BROWN_OUT != 0 {
            ResetCause::BrownOut
        } else if flags & FLAG_DEBUG != 0 {
            ResetCause::Debug
        } else if flags & FLAG_EXTERNAL != 0 {
            ResetCause::External
        } else if flags & FLAG_POWER_ON != 0 {
            ResetCause::PowerOn
        } else {
            ResetCause::Unknown
        }
    }
}

impl From<u8> for ResetCause {
    fn from(flags: u8) -> Self {
        Self::from_flags(flags)
    }
}
