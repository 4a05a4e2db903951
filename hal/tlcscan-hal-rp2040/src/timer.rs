//! Row-advance timer
//!
//! Uses TIMER alarm 1 (alarm 0 belongs to the embassy time driver). Each
//! deadline is derived from the previous one rather than from the time the
//! interrupt was serviced, so row periods do not drift.

use embassy_rp::interrupt::{self, InterruptExt, Priority};
use embassy_rp::pac;

const ALARM: usize = 1;

/// Periodic row-advance interrupt source
pub struct RowTimer {
    period_us: u32,
    deadline: u32,
}

impl RowTimer {
    pub fn new(period_us: u32) -> Self {
        Self {
            period_us: period_us.max(1),
            deadline: 0,
        }
    }

    /// Arm the first deadline and enable the alarm interrupt
    pub fn start(&mut self, priority: Priority) {
        let timer = pac::TIMER;
        self.deadline = timer.timerawl().read().wrapping_add(self.period_us);

        timer.intr().write(|w| w.set_alarm(ALARM, true));
        timer.inte().modify(|w| w.set_alarm(ALARM, true));
        timer.alarm(ALARM).write_value(self.deadline);

        interrupt::TIMER_IRQ_1.unpend();
        interrupt::TIMER_IRQ_1.set_priority(priority);
        // SAFETY: the handler only touches state behind a critical section
        unsafe { interrupt::TIMER_IRQ_1.enable() };
    }

    /// Clear the fired alarm and arm the next deadline
    ///
    /// Called at the top of the TIMER_IRQ_1 handler. If servicing ran past
    /// the next deadline the schedule restarts from now.
    pub fn rearm(&mut self) {
        let timer = pac::TIMER;
        timer.intr().write(|w| w.set_alarm(ALARM, true));

        let now = timer.timerawl().read();
        self.deadline = self.deadline.wrapping_add(self.period_us);
        if (self.deadline.wrapping_sub(now) as i32) <= 0 {
            self.deadline = now.wrapping_add(self.period_us);
        }
        timer.alarm(ALARM).write_value(self.deadline);
    }
}
