//! Port traits: the hexagonal boundary between the interlock core and the
//! board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ InterlockService (domain)
//! ```
//!
//! The [`InterlockService`](super::service::InterlockService) consumes these
//! via generics, so the decision logic never touches GPIO registers
//! directly and runs unchanged against mocks on the host.

use crate::error::OutputError;
use crate::interlock::Millis;

use super::events::InterlockEvent;

// ───────────────────────────────────────────────────────────────
// Signal port (driven adapter: supervisor lines → domain)
// ───────────────────────────────────────────────────────────────

/// Raw levels of the supervisor's output lines.
pub trait SignalPort {
    /// RESET level.  `true` = power good.
    fn power_good(&mut self) -> bool;

    /// Raw INT level.  `true` = idle (pulled high).  Only used for status
    /// reporting; fault detection is edge-triggered in the ISR.
    fn fault_line(&mut self) -> bool;

    /// Raw KILL level as seen on the pin.  `true` = high.  Differs from
    /// [`KillOutput::is_kill_asserted`] when a write failed or something
    /// else on the net pulls the line low.
    fn kill_line(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Kill output port (driven adapter: domain → KILL line)
// ───────────────────────────────────────────────────────────────

/// The KILL line.
///
/// # Safety contract
///
/// `release_kill` must leave the line undriven (high impedance with
/// pull-up), never driven high, so that the supervisor's own output
/// dominates whenever this controller is absent or reset.
pub trait KillOutput {
    /// Drive KILL low.
    fn assert_kill(&mut self) -> Result<(), OutputError>;

    /// Release KILL to its passive pulled-up level.
    fn release_kill(&mut self) -> Result<(), OutputError>;

    /// Whether KILL is currently driven low.
    fn is_kill_asserted(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / indication)
// ───────────────────────────────────────────────────────────────

/// Subscribers to [`InterlockEvent`] notifications (serial log, status LED).
///
/// Implementations run on the poll loop and must return promptly: long
/// work belongs in their own `tick`, never in `emit`.
pub trait EventSink {
    fn emit(&mut self, event: &InterlockEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &InterlockEvent) {
        (**self).emit(event);
    }
}

/// Fan-out to two sinks, in order.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &InterlockEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock shared by the ISR and the poll loop.
pub trait TimePort {
    /// Milliseconds since boot, wrapping at `u32::MAX`.
    fn now_ms(&self) -> Millis;
}
