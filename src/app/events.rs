//! Outbound interlock notifications.
//!
//! The [`InterlockService`](super::service::InterlockService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Subscribers
//! (serial log, status LED) consume them; none of them feed back into kill
//! decisions.

use crate::interlock::{FaultEvent, Millis, ReleaseReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterlockEvent {
    /// The service seeded itself from the boot-time levels.
    Started { at_ms: Millis, power_good: bool },

    /// RESET went high.
    PowerGoodRose { at_ms: Millis },

    /// RESET went low.
    PowerGoodFell { at_ms: Millis },

    /// Startup inhibit window opened.
    InhibitArmed { at_ms: Millis },

    /// Startup inhibit window closed (expiry or RESET low).
    InhibitCleared { at_ms: Millis },

    /// A fault event was taken from the mailbox.
    FaultObserved(FaultEvent),

    /// KILL driven low.
    KillAsserted { at_ms: Millis },

    /// KILL released.
    KillReleased {
        at_ms: Millis,
        held_ms: u32,
        reason: ReleaseReason,
        power_good: bool,
    },

    /// Periodic raw-level report.
    Status(StatusSnapshot),
}

/// Raw line levels at one instant.  `true` = electrically high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub at_ms: Millis,
    pub reset_high: bool,
    pub int_high: bool,
    pub kill_high: bool,
}
