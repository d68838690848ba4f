//! Interlock core: the timing and decision state machines.
//!
//! ```text
//!   RESET level ──▶ PowerGoodTracker ──┐ (read at ISR time)
//!                         │            ▼
//!                         │      EdgeDetector ◀── INT falling edge (ISR)
//!                         │            │
//!                         │            ▼  FaultEvent (single-slot mailbox)
//!                         └──────▶ KillController ──▶ KILL line
//!                   StartupInhibit ─┘ (advisory, read by the detector)
//! ```
//!
//! Every type in here is pure state: no I/O, no globals, and every method
//! takes `now` explicitly.  The cross-context plumbing lives in
//! [`crate::events`]; the poll-loop orchestration in
//! [`crate::app::service`].
//!
//! ## Time
//!
//! All timestamps are [`Millis`] on a single monotonic clock that wraps at
//! `u32::MAX`.  Durations are always computed with [`elapsed`] (wrapping
//! subtraction) and compared against thresholds, never compared as absolute
//! instants.

pub mod detector;
pub mod inhibit;
pub mod kill;
pub mod tracker;

pub use detector::EdgeDetector;
pub use inhibit::StartupInhibit;
pub use kill::{KillController, KillState, KillTransition, ReleaseReason};
pub use tracker::{LevelChange, PowerGoodState, PowerGoodTracker};

/// Milliseconds since boot, truncated to 32 bits (wraps after ~49.7 days).
pub type Millis = u32;

/// Time elapsed from `since` to `now`, correct across clock rollover.
#[inline]
pub const fn elapsed(now: Millis, since: Millis) -> u32 {
    now.wrapping_sub(since)
}

/// One accepted fault edge, with the decision taken at detection time.
///
/// `qualifies` is computed exactly once, in the detector context, and is
/// never re-derived later.  `high_for_ms` and `inhibited` are the inputs of
/// that decision, captured in the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultEvent {
    /// When the edge was accepted.
    pub observed_at_ms: Millis,
    /// Whether this fault should assert the kill line.
    pub qualifies: bool,
    /// Continuous power-good duration at detection (`None` = not asserted).
    pub high_for_ms: Option<u32>,
    /// Whether the startup inhibit window was active at detection.
    pub inhibited: bool,
}
