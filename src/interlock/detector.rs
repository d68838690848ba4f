//! Debounced fault-edge detector.
//!
//! Runs in interrupt context.  It must stay bounded and side-effect free
//! apart from its own debounce stamp: the decision it takes is handed to the
//! poll loop as a [`FaultEvent`], and only the loop drives outputs.

use super::{FaultEvent, Millis, PowerGoodState, elapsed};

/// Debounce filter plus the qualification rule for INT falling edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeDetector {
    debounce_ms: u32,
    min_high_before_fault_ms: u32,
    /// `None` until the first edge is accepted.
    last_accepted_ms: Option<Millis>,
}

impl EdgeDetector {
    pub const fn new(debounce_ms: u32, min_high_before_fault_ms: u32) -> Self {
        Self {
            debounce_ms,
            min_high_before_fault_ms,
            last_accepted_ms: None,
        }
    }

    /// Handle one raw falling edge.
    ///
    /// Returns `None` when the edge lands inside the debounce window of the
    /// previously accepted edge.  Otherwise the edge is accepted and the
    /// event carries the decision computed from `power_good` and
    /// `inhibited` as they are at `now`.
    pub fn on_falling_edge(
        &mut self,
        now: Millis,
        power_good: &PowerGoodState,
        inhibited: bool,
    ) -> Option<FaultEvent> {
        if let Some(last) = self.last_accepted_ms {
            if elapsed(now, last) < self.debounce_ms {
                return None;
            }
        }
        self.last_accepted_ms = Some(now);

        let high_enough = power_good.is_asserted_for_at_least(self.min_high_before_fault_ms, now);
        Some(FaultEvent {
            observed_at_ms: now,
            qualifies: high_enough && !inhibited,
            high_for_ms: power_good.high_for(now),
            inhibited,
        })
    }

    pub fn last_accepted_ms(&self) -> Option<Millis> {
        self.last_accepted_ms
    }

    /// The same filter with its debounce stamp set to `last_accepted_ms`,
    /// for callers that keep the stamp outside the detector.
    pub const fn resumed(self, last_accepted_ms: Option<Millis>) -> Self {
        Self {
            last_accepted_ms,
            ..self
        }
    }
}
