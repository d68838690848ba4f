//! Interrupt-to-loop handoff.
//!
//! The INT falling-edge ISR (detector context) and the main poll loop
//! (controller context) share exactly three things:
//!
//! ```text
//! ┌──────────────┐  PowerGoodState (atomics) ┌──────────────┐
//! │              │◀──────────────────────────│              │
//! │   INT ISR    │   inhibit flag (atomic)   │  Poll loop   │
//! │ EdgeDetector │◀──────────────────────────│  (writer)    │
//! │              │                           │              │
//! │              │ FaultEvent (seqlock slot) │              │
//! │              │──────────────────────────▶│  (consumer)  │
//! └──────────────┘                           └──────────────┘
//! ```
//!
//! Nothing here locks.  Every field has exactly one writer, and the ISR
//! never waits on the loop:
//!
//! - The loop is the only writer of the power-good state and the inhibit
//!   flag.  A rising edge stores the inhibit flag, then the since-stamp,
//!   then `asserted` with `Release`; the ISR loads `asserted` with
//!   `Acquire` before the other two, so it always sees a pair the loop
//!   actually published.
//! - The ISR owns the debounce stamp outright.
//! - The ISR is the only producer of [`FaultEvent`]s.  [`FaultMailbox`] is a
//!   one-slot seqlock: the ISR writes it without waiting, the loop retries
//!   a read that raced a write, and a newer accepted edge overwrites an
//!   unconsumed one.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering, fence};

use crate::config::InterlockConfig;
use crate::interlock::{EdgeDetector, FaultEvent, Millis, PowerGoodState};

/// The instance wired to the INT GPIO interrupt.
pub static INTERLOCK: InterlockShared = InterlockShared::new(&InterlockConfig::BUILD);

// ── Single-slot mailbox ───────────────────────────────────────

const HAS_HIGH_FOR: u8 = 1 << 0;
const QUALIFIES: u8 = 1 << 1;
const INHIBITED: u8 = 1 << 2;

/// Holds the newest [`FaultEvent`] for a single producer and a single
/// consumer.
///
/// `seq` is odd while a publish is in flight and advances by two per
/// event.  The consumer remembers the last sequence it took, so each event
/// is taken at most once without the consumer ever writing the slot.
pub struct FaultMailbox {
    seq: AtomicU32,
    taken: AtomicU32,
    observed_at_ms: AtomicU32,
    high_for_ms: AtomicU32,
    flags: AtomicU8,
}

impl FaultMailbox {
    pub const fn new() -> Self {
        Self {
            seq: AtomicU32::new(0),
            taken: AtomicU32::new(0),
            observed_at_ms: AtomicU32::new(0),
            high_for_ms: AtomicU32::new(0),
            flags: AtomicU8::new(0),
        }
    }

    /// Store `event`, replacing any event not yet taken.  Wait-free.
    ///
    /// Producer side only; must not be called from two contexts at once.
    pub fn publish(&self, event: FaultEvent) {
        let seq = self.seq.load(Ordering::Relaxed);
        self.seq.store(seq.wrapping_add(1), Ordering::Relaxed);
        fence(Ordering::Release);

        let mut flags = 0;
        if event.high_for_ms.is_some() {
            flags |= HAS_HIGH_FOR;
        }
        if event.qualifies {
            flags |= QUALIFIES;
        }
        if event.inhibited {
            flags |= INHIBITED;
        }
        self.observed_at_ms
            .store(event.observed_at_ms, Ordering::Relaxed);
        self.high_for_ms
            .store(event.high_for_ms.unwrap_or(0), Ordering::Relaxed);
        self.flags.store(flags, Ordering::Relaxed);

        self.seq.store(seq.wrapping_add(2), Ordering::Release);
    }

    /// Read the pending event and mark it taken.
    ///
    /// Consumer side only.  Retries while a publish is in flight.
    pub fn take(&self) -> Option<FaultEvent> {
        let (seq, event) = self.read();
        if seq == self.taken.load(Ordering::Relaxed) {
            return None;
        }
        self.taken.store(seq, Ordering::Relaxed);
        Some(event)
    }

    pub fn is_pending(&self) -> bool {
        self.seq.load(Ordering::Acquire) != self.taken.load(Ordering::Relaxed)
    }

    /// One consistent copy of the slot and the sequence it belongs to.
    fn read(&self) -> (u32, FaultEvent) {
        loop {
            let before = self.seq.load(Ordering::Acquire);
            if before & 1 == 1 {
                core::hint::spin_loop();
                continue;
            }

            let observed_at_ms = self.observed_at_ms.load(Ordering::Relaxed);
            let high_for_ms = self.high_for_ms.load(Ordering::Relaxed);
            let flags = self.flags.load(Ordering::Relaxed);

            fence(Ordering::Acquire);
            if self.seq.load(Ordering::Relaxed) == before {
                let event = FaultEvent {
                    observed_at_ms,
                    qualifies: flags & QUALIFIES != 0,
                    high_for_ms: (flags & HAS_HIGH_FOR != 0).then_some(high_for_ms),
                    inhibited: flags & INHIBITED != 0,
                };
                return (before, event);
            }
        }
    }
}

impl Default for FaultMailbox {
    fn default() -> Self {
        Self::new()
    }
}

// ── Shared interlock state ────────────────────────────────────

/// Everything the fault ISR touches.
pub struct InterlockShared {
    pg_asserted: AtomicBool,
    pg_since_ms: AtomicU32,
    inhibited: AtomicBool,
    /// Debounce and qualification thresholds; the stamp lives below.
    detector: EdgeDetector,
    /// Written only from [`Self::on_fault_edge`].
    edge_seen: AtomicBool,
    last_edge_ms: AtomicU32,
    mailbox: FaultMailbox,
}

impl InterlockShared {
    pub const fn new(config: &InterlockConfig) -> Self {
        Self {
            pg_asserted: AtomicBool::new(false),
            pg_since_ms: AtomicU32::new(0),
            inhibited: AtomicBool::new(false),
            detector: EdgeDetector::new(config.debounce_ms, config.min_high_before_fault_ms),
            edge_seen: AtomicBool::new(false),
            last_edge_ms: AtomicU32::new(0),
            mailbox: FaultMailbox::new(),
        }
    }

    // ── Detector context ──────────────────────────────────────

    /// ISR entry point for one raw INT falling edge at `now`.
    ///
    /// Lock-free and bounded.  Returns `true` if the edge was accepted and
    /// an event published, `false` if it was debounced away.
    pub fn on_fault_edge(&self, now: Millis) -> bool {
        let last = self
            .edge_seen
            .load(Ordering::Relaxed)
            .then(|| self.last_edge_ms.load(Ordering::Relaxed));
        let mut detector = self.detector.resumed(last);

        let power_good = self.power_good();
        let inhibited = self.inhibited.load(Ordering::Acquire);
        let Some(event) = detector.on_falling_edge(now, &power_good, inhibited) else {
            return false;
        };

        self.last_edge_ms.store(now, Ordering::Relaxed);
        self.edge_seen.store(true, Ordering::Relaxed);
        self.mailbox.publish(event);
        true
    }

    // ── Controller context ────────────────────────────────────

    /// Publish the loop's current power-good record for the ISR.
    pub fn publish_power_good(&self, state: PowerGoodState) {
        match state.asserted_since_ms {
            Some(since) if state.asserted => {
                self.pg_since_ms.store(since, Ordering::Relaxed);
                self.pg_asserted.store(true, Ordering::Release);
            }
            _ => self.pg_asserted.store(false, Ordering::Release),
        }
    }

    /// Publish whether the startup inhibit window is active.
    pub fn publish_inhibit(&self, active: bool) {
        self.inhibited.store(active, Ordering::Release);
    }

    /// Take the pending fault event, if any.
    pub fn take_event(&self) -> Option<FaultEvent> {
        self.mailbox.take()
    }

    pub fn event_pending(&self) -> bool {
        self.mailbox.is_pending()
    }

    pub fn power_good(&self) -> PowerGoodState {
        if self.pg_asserted.load(Ordering::Acquire) {
            PowerGoodState {
                asserted: true,
                asserted_since_ms: Some(self.pg_since_ms.load(Ordering::Relaxed)),
            }
        } else {
            PowerGoodState::LOW
        }
    }

    pub fn inhibited(&self) -> bool {
        self.inhibited.load(Ordering::Acquire)
    }
}
