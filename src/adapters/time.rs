//! Monotonic millisecond clock.
//!
//! - **`target_os = "espidf"`**: wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant` for
//!   host-side testing and simulation.
//!
//! Both the fault ISR and the poll loop read time through [`uptime_ms`], so
//! every timestamp in the interlock sits on the same clock.  The 64-bit
//! microsecond count is truncated to a wrapping `u32` of milliseconds.

use crate::app::ports::TimePort;
use crate::interlock::Millis;

/// Milliseconds since boot, wrapping at `u32::MAX`.  ISR-safe.
#[cfg(target_os = "espidf")]
#[inline(always)]
pub fn uptime_ms() -> Millis {
    ((unsafe { esp_idf_svc::sys::esp_timer_get_time() }) / 1000) as u32
}

/// Milliseconds since the first call, wrapping at `u32::MAX`.
#[cfg(not(target_os = "espidf"))]
pub fn uptime_ms() -> Millis {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_millis() as u32
}

/// [`TimePort`] over [`uptime_ms`].
#[derive(Debug, Default, Clone, Copy)]
pub struct EspClock;

impl EspClock {
    pub fn new() -> Self {
        Self
    }
}

impl TimePort for EspClock {
    fn now_ms(&self) -> Millis {
        uptime_ms()
    }
}
