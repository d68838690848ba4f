//! Kill output controller.
//!
//! Two states, two transitions:
//!
//! ```text
//!            qualifying FaultEvent
//!   Idle ─────────────────────────────▶ Asserted { since }
//!    ▲                                        │
//!    │  (!power_good && held ≥ min_hold)      │
//!    └──────  || held ≥ timeout  ◀────────────┘
//! ```
//!
//! The controller is single-threaded and non-reentrant: only the poll loop
//! calls it.  It decides transitions; the caller applies each returned
//! [`KillTransition`] to the output exactly once.

use super::{FaultEvent, Millis, elapsed};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillState {
    Idle,
    Asserted { since: Millis },
}

/// Why an asserted kill line was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseReason {
    /// Power-good dropped and the minimum hold elapsed.
    PowerGoodLow,
    /// The absolute cap elapsed first.
    Timeout,
}

/// A state change the caller must mirror on the kill line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillTransition {
    Asserted {
        at_ms: Millis,
    },
    Released {
        at_ms: Millis,
        held_ms: u32,
        reason: ReleaseReason,
        /// Power-good level sampled for the release decision.
        power_good: bool,
    },
}

#[derive(Debug, Clone)]
pub struct KillController {
    min_hold_ms: u32,
    timeout_ms: u32,
    state: KillState,
}

impl KillController {
    pub const fn new(min_hold_ms: u32, timeout_ms: u32) -> Self {
        Self {
            min_hold_ms,
            timeout_ms,
            state: KillState::Idle,
        }
    }

    /// One poll cycle.
    ///
    /// `event` is the fault event taken from the mailbox this cycle, if any.
    /// A poll performs at most one transition: on the poll that asserts,
    /// the release rule is first evaluated on the following poll.
    pub fn poll(
        &mut self,
        now: Millis,
        event: Option<FaultEvent>,
        power_good: bool,
    ) -> Option<KillTransition> {
        if let Some(ev) = event {
            if let Some(t) = self.on_event(&ev, now) {
                return Some(t);
            }
        }
        self.evaluate_release(now, power_good)
    }

    fn on_event(&mut self, event: &FaultEvent, now: Millis) -> Option<KillTransition> {
        if !event.qualifies || self.is_asserted() {
            return None;
        }
        self.state = KillState::Asserted { since: now };
        Some(KillTransition::Asserted { at_ms: now })
    }

    fn evaluate_release(&mut self, now: Millis, power_good: bool) -> Option<KillTransition> {
        let KillState::Asserted { since } = self.state else {
            return None;
        };
        let held_ms = elapsed(now, since);

        let reason = if !power_good && held_ms >= self.min_hold_ms {
            ReleaseReason::PowerGoodLow
        } else if held_ms >= self.timeout_ms {
            ReleaseReason::Timeout
        } else {
            return None;
        };

        self.state = KillState::Idle;
        Some(KillTransition::Released {
            at_ms: now,
            held_ms,
            reason,
            power_good,
        })
    }

    pub fn state(&self) -> KillState {
        self.state
    }

    pub fn is_asserted(&self) -> bool {
        matches!(self.state, KillState::Asserted { .. })
    }
}
