//! Mock hardware adapter and test bench for integration tests.
//!
//! Records every KILL write so tests can assert on the full output history
//! without touching real GPIO registers.

use killgate::app::events::InterlockEvent;
use killgate::app::ports::{EventSink, KillOutput, SignalPort};
use killgate::app::service::InterlockService;
use killgate::config::InterlockConfig;
use killgate::error::OutputError;
use killgate::events::InterlockShared;
use killgate::interlock::{FaultEvent, Millis};

// ── Kill call record ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillCall {
    Assert,
    Release,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub reset: bool,
    pub int: bool,
    pub calls: Vec<KillCall>,
    /// Every KILL write fails while set.
    pub fail_writes: bool,
    kill_low: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            reset: false,
            int: true,
            calls: Vec::new(),
            fail_writes: false,
            kill_low: false,
        }
    }

    pub fn asserts(&self) -> usize {
        self.calls.iter().filter(|c| **c == KillCall::Assert).count()
    }

    pub fn kill_low(&self) -> bool {
        self.kill_low
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalPort for MockHardware {
    fn power_good(&mut self) -> bool {
        self.reset
    }

    fn fault_line(&mut self) -> bool {
        self.int
    }

    fn kill_line(&mut self) -> bool {
        !self.kill_low
    }
}

impl KillOutput for MockHardware {
    fn assert_kill(&mut self) -> Result<(), OutputError> {
        self.calls.push(KillCall::Assert);
        if self.fail_writes {
            return Err(OutputError::KillAssertFailed);
        }
        self.kill_low = true;
        Ok(())
    }

    fn release_kill(&mut self) -> Result<(), OutputError> {
        self.calls.push(KillCall::Release);
        if self.fail_writes {
            return Err(OutputError::KillReleaseFailed);
        }
        self.kill_low = false;
        Ok(())
    }

    fn is_kill_asserted(&self) -> bool {
        self.kill_low
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<InterlockEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn faults(&self) -> Vec<FaultEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                InterlockEvent::FaultObserved(ev) => Some(*ev),
                _ => None,
            })
            .collect()
    }

    pub fn kill_asserted_at(&self) -> Vec<Millis> {
        self.events
            .iter()
            .filter_map(|e| match e {
                InterlockEvent::KillAsserted { at_ms } => Some(*at_ms),
                _ => None,
            })
            .collect()
    }

    pub fn releases(&self) -> Vec<InterlockEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, InterlockEvent::KillReleased { .. }))
            .copied()
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &InterlockEvent) {
        self.events.push(*event);
    }
}

// ── Bench ─────────────────────────────────────────────────────

/// Service + mocks on a clock whose zero sits at `origin`.
///
/// All `rel` arguments are offsets from `origin`; the bench polls once per
/// millisecond the way the firmware loop does.
pub struct Bench {
    pub origin: Millis,
    pub shared: &'static InterlockShared,
    pub service: InterlockService<'static>,
    pub hw: MockHardware,
    pub sink: RecordingSink,
    last_polled: u32,
}

#[allow(dead_code)]
impl Bench {
    /// Boot at `rel = 0` with RESET at `reset_high`.
    pub fn boot(config: InterlockConfig, origin: Millis, reset_high: bool) -> Self {
        let shared: &'static InterlockShared = Box::leak(Box::new(InterlockShared::new(&config)));
        let mut bench = Self {
            origin,
            shared,
            service: InterlockService::new(config, shared),
            hw: MockHardware::new(),
            sink: RecordingSink::new(),
            last_polled: 0,
        };
        bench.hw.reset = reset_high;
        bench
            .service
            .start(origin, &mut bench.hw, &mut bench.sink);
        bench
    }

    pub fn at(&self, rel: u32) -> Millis {
        self.origin.wrapping_add(rel)
    }

    /// Poll every millisecond up to and including `rel`.
    pub fn run_to(&mut self, rel: u32) {
        while self.last_polled < rel {
            self.last_polled += 1;
            let now = self.at(self.last_polled);
            self.service.poll(now, &mut self.hw, &mut self.sink);
        }
    }

    /// Poll once at the current instant again (same `now`).
    pub fn poll_now(&mut self) {
        let now = self.at(self.last_polled);
        self.service.poll(now, &mut self.hw, &mut self.sink);
    }

    /// Raw INT falling edge at `rel`, as the ISR would see it.
    pub fn fault(&self, rel: u32) -> bool {
        self.shared.on_fault_edge(self.at(rel))
    }
}
