//! Scan engine state machine
//!
//! Per row the engine goes `Idle -> Shifting -> Idle`: a row advance starts
//! a transfer, and the transfer drains one byte (or bit) at a time until the
//! row buffer is exhausted. Anything arriving out of order leaves the state
//! unchanged.

/// Engine phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanPhase {
    /// Not started; row advances are ignored
    Stopped,
    /// Waiting for the next row advance
    Idle,
    /// A row's buffer is being shifted out
    Shifting,
}

/// Events driving the engine state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanEvent {
    /// Lines initialised and first frame loaded
    Started,
    /// Row advance fired: latch, select, first byte started
    RowAdvanced,
    /// Last byte of the row has left the shift register
    RowShifted,
}

impl ScanPhase {
    pub fn is_shifting(&self) -> bool {
        matches!(self, ScanPhase::Shifting)
    }

    /// Whether row advances are being serviced
    pub fn is_running(&self) -> bool {
        !matches!(self, ScanPhase::Stopped)
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: ScanEvent) -> Self {
        use ScanEvent::*;
        use ScanPhase::*;

        match (self, event) {
            (Stopped, Started) => Idle,

            // A new row always restarts the transfer, even mid-row
            (Idle, RowAdvanced) => Shifting,
            (Shifting, RowAdvanced) => Shifting,

            (Shifting, RowShifted) => Idle,

            // Default: stay in current phase
            _ => self,
        }
    }
}

/// State owned by a scan engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanState {
    /// Row index used by the next row advance
    pub row: u8,
    /// Bytes of the current row still to shift after the one in flight;
    /// negative once the row is exhausted
    pub remaining: i8,
    /// Engine phase
    pub phase: ScanPhase,
}

impl ScanState {
    pub const fn new(start_row: u8) -> Self {
        Self {
            row: start_row,
            remaining: -1,
            phase: ScanPhase::Stopped,
        }
    }

    /// Apply an event to the phase
    pub fn apply(&mut self, event: ScanEvent) {
        self.phase = self.phase.transition(event);
    }

    /// Whether the current row's buffer has been fully consumed
    pub fn is_exhausted(&self) -> bool {
        self.remaining < 0
    }
}
