//! Startup inhibit window.
//!
//! Power-good asserting is followed by supply settling and by the startup
//! blink sequence; a fault edge during that window is never a real
//! brownout.  The window is bounded by `max_inhibit_ms` and closes early as
//! soon as power-good drops.

use super::{Millis, elapsed};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupInhibit {
    /// `None` disables the policy: the window never arms.
    max_inhibit_ms: Option<u32>,
    active: bool,
    started_at_ms: Millis,
}

impl StartupInhibit {
    pub const fn new(max_inhibit_ms: Option<u32>) -> Self {
        Self {
            max_inhibit_ms,
            active: false,
            started_at_ms: 0,
        }
    }

    /// Arm on a power-good rising edge, or at boot with power-good high.
    /// Returns `true` if the window was armed.
    pub fn on_power_good_rising_edge(&mut self, now: Millis) -> bool {
        if self.max_inhibit_ms.is_none() {
            return false;
        }
        self.active = true;
        self.started_at_ms = now;
        true
    }

    /// Expire the window.  Returns `true` on the poll that disarms it.
    pub fn poll(&mut self, now: Millis, power_good: bool) -> bool {
        let Some(max) = self.max_inhibit_ms else {
            return false;
        };
        if self.active && (!power_good || elapsed(now, self.started_at_ms) >= max) {
            self.active = false;
            return true;
        }
        false
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
