//! Interlock service, the poll-loop side of the core.
//!
//! [`InterlockService`] owns the power-good tracker, the startup inhibit
//! window and the kill controller.  It is the only writer of the state the
//! fault ISR reads, and the only consumer of the events the ISR publishes.
//!
//! ```text
//!  SignalPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │       InterlockService        │
//!  KillOutput ◀── │ Tracker · Inhibit · KillCtrl │
//!                 └──────────────┬───────────────┘
//!                                │ publish / take
//!                        InterlockShared (ISR)
//! ```
//!
//! One [`poll`](InterlockService::poll) per loop tick, in this order:
//!
//! 1. sample RESET and track level changes (arming the inhibit window on
//!    a rising edge);
//! 2. expire the inhibit window;
//! 3. take the pending fault event and run the kill controller;
//! 4. mirror any transition on the KILL line;
//! 5. emit the periodic status snapshot.

use log::{debug, error, info};

use crate::config::InterlockConfig;
use crate::events::InterlockShared;
use crate::interlock::{
    KillController, KillState, KillTransition, LevelChange, Millis, PowerGoodState,
    PowerGoodTracker, StartupInhibit, elapsed,
};

use super::events::{InterlockEvent, StatusSnapshot};
use super::ports::{EventSink, KillOutput, SignalPort};

pub struct InterlockService<'a> {
    shared: &'a InterlockShared,
    status_interval_ms: u32,
    tracker: PowerGoodTracker,
    inhibit: StartupInhibit,
    kill: KillController,
    last_status_ms: Millis,
}

impl<'a> InterlockService<'a> {
    /// Construct the service.  Does not touch hardware; call
    /// [`start`](Self::start) before the first poll.
    pub fn new(config: InterlockConfig, shared: &'a InterlockShared) -> Self {
        Self {
            shared,
            status_interval_ms: config.status_interval_ms,
            tracker: PowerGoodTracker::new(),
            inhibit: StartupInhibit::new(config.max_inhibit_ms),
            kill: KillController::new(config.min_hold_ms, config.timeout_ms),
            last_status_ms: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put KILL in its passive state and seed the tracker from the current
    /// RESET level.  A RESET already high at boot counts as a rising edge
    /// at `now` and arms the inhibit window.
    pub fn start(
        &mut self,
        now: Millis,
        hw: &mut (impl SignalPort + KillOutput),
        sink: &mut impl EventSink,
    ) {
        if let Err(e) = hw.release_kill() {
            error!("KILL release at boot failed: {e}");
        }

        let power_good = hw.power_good();
        self.last_status_ms = now;
        sink.emit(&InterlockEvent::Started {
            at_ms: now,
            power_good,
        });
        self.track_level(power_good, now, sink);
        info!(
            "InterlockService started (RESET={}, inhibit={})",
            level_char(power_good),
            self.inhibit.is_active()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one poll cycle at `now`.
    pub fn poll(
        &mut self,
        now: Millis,
        hw: &mut (impl SignalPort + KillOutput),
        sink: &mut impl EventSink,
    ) {
        // 1. RESET level tracking
        let power_good = hw.power_good();
        self.track_level(power_good, now, sink);

        // 2. Inhibit expiry
        if self.inhibit.poll(now, power_good) {
            self.shared.publish_inhibit(false);
            sink.emit(&InterlockEvent::InhibitCleared { at_ms: now });
        }

        // 3. Fault handoff + kill decision
        let event = self.shared.take_event();
        if let Some(ev) = event {
            sink.emit(&InterlockEvent::FaultObserved(ev));
        }

        // 4. Mirror the transition on the KILL line
        if let Some(transition) = self.kill.poll(now, event, power_good) {
            self.apply(transition, hw, sink);
        }

        // 5. Periodic status
        if elapsed(now, self.last_status_ms) >= self.status_interval_ms {
            self.last_status_ms = now;
            sink.emit(&InterlockEvent::Status(StatusSnapshot {
                at_ms: now,
                reset_high: power_good,
                int_high: hw.fault_line(),
                kill_high: hw.kill_line(),
            }));
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn kill_state(&self) -> KillState {
        self.kill.state()
    }

    pub fn power_good(&self) -> PowerGoodState {
        self.tracker.state()
    }

    pub fn inhibit_active(&self) -> bool {
        self.inhibit.is_active()
    }

    // ── Internal ──────────────────────────────────────────────

    fn track_level(&mut self, level: bool, now: Millis, sink: &mut impl EventSink) {
        match self.tracker.on_level_change(level, now) {
            Some(LevelChange::Rose) => {
                // Inhibit goes up before the ISR can see RESET high.
                let armed = self.inhibit.on_power_good_rising_edge(now);
                if armed {
                    self.shared.publish_inhibit(true);
                }
                self.shared.publish_power_good(self.tracker.state());
                sink.emit(&InterlockEvent::PowerGoodRose { at_ms: now });
                if armed {
                    sink.emit(&InterlockEvent::InhibitArmed { at_ms: now });
                }
            }
            Some(LevelChange::Fell) => {
                self.shared.publish_power_good(self.tracker.state());
                sink.emit(&InterlockEvent::PowerGoodFell { at_ms: now });
            }
            None => {}
        }
    }

    fn apply(
        &mut self,
        transition: KillTransition,
        hw: &mut impl KillOutput,
        sink: &mut impl EventSink,
    ) {
        match transition {
            KillTransition::Asserted { at_ms } => {
                if let Err(e) = hw.assert_kill() {
                    error!("KILL assert at t={at_ms}ms failed: {e}");
                }
                sink.emit(&InterlockEvent::KillAsserted { at_ms });
            }
            KillTransition::Released {
                at_ms,
                held_ms,
                reason,
                power_good,
            } => {
                if let Err(e) = hw.release_kill() {
                    error!("KILL release at t={at_ms}ms failed: {e}");
                }
                debug!("KILL release reason: {reason:?}");
                sink.emit(&InterlockEvent::KillReleased {
                    at_ms,
                    held_ms,
                    reason,
                    power_good,
                });
            }
        }
    }
}

/// `H` / `L` for a logic level.
pub fn level_char(high: bool) -> char {
    if high { 'H' } else { 'L' }
}
