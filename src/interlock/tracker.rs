//! Power-good (RESET) continuous-high duration tracker.

use super::{Millis, elapsed};

/// Snapshot of the power-good line as seen by the poll loop.
///
/// Invariant: `asserted_since_ms.is_some() == asserted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerGoodState {
    pub asserted: bool,
    pub asserted_since_ms: Option<Millis>,
}

impl PowerGoodState {
    /// Line not asserted, never timestamped.
    pub const LOW: Self = Self {
        asserted: false,
        asserted_since_ms: None,
    };

    /// Continuous-high duration at `now`, or `None` while de-asserted.
    pub fn high_for(&self, now: Millis) -> Option<u32> {
        self.asserted_since_ms.map(|since| elapsed(now, since))
    }

    /// True iff asserted and held for at least `duration_ms` at `now`.
    ///
    /// A line that has never been asserted is never "long enough".
    pub fn is_asserted_for_at_least(&self, duration_ms: u32, now: Millis) -> bool {
        self.high_for(now).is_some_and(|held| held >= duration_ms)
    }
}

/// Edge reported by [`PowerGoodTracker::on_level_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelChange {
    Rose,
    Fell,
}

/// Owns [`PowerGoodState`] on the poll-loop side.
#[derive(Debug, Clone, Default)]
pub struct PowerGoodTracker {
    state: PowerGoodState,
}

impl PowerGoodTracker {
    pub const fn new() -> Self {
        Self {
            state: PowerGoodState::LOW,
        }
    }

    /// Feed the current level.  Only an actual transition touches the
    /// timestamp; repeating the current level is a no-op.
    pub fn on_level_change(&mut self, level: bool, now: Millis) -> Option<LevelChange> {
        match (self.state.asserted, level) {
            (false, true) => {
                self.state = PowerGoodState {
                    asserted: true,
                    asserted_since_ms: Some(now),
                };
                Some(LevelChange::Rose)
            }
            (true, false) => {
                self.state = PowerGoodState::LOW;
                Some(LevelChange::Fell)
            }
            _ => None,
        }
    }

    pub fn is_asserted_for_at_least(&self, duration_ms: u32, now: Millis) -> bool {
        self.state.is_asserted_for_at_least(duration_ms, now)
    }

    pub fn is_asserted(&self) -> bool {
        self.state.asserted
    }

    pub fn state(&self) -> PowerGoodState {
        self.state
    }
}
