//! Non-blocking blink sequencer for the status LED.
//!
//! Subscribes to interlock events and turns RESET transitions into short
//! light sequences.  The main loop calls [`Indicator::tick`] every poll and
//! writes the returned level to the [`StatusLed`](super::status_led::StatusLed);
//! nothing here ever sleeps.
//!
//! | Trigger        | Sequence                                   |
//! |----------------|--------------------------------------------|
//! | RESET rises    | `startup_blink_count` × (on, off)          |
//! | RESET falls    | one long flash of `powerdown_blink_on_ms`  |
//! | otherwise      | off                                        |
//!
//! A new trigger replaces whatever sequence is still running.

use heapless::Vec;

use crate::app::events::InterlockEvent;
use crate::app::ports::EventSink;
use crate::config::IndicatorConfig;
use crate::interlock::{Millis, elapsed};

/// Longest sequence held; extra startup blinks are dropped.
pub const MAX_STEPS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    lit: bool,
    duration_ms: u32,
}

pub struct Indicator {
    config: IndicatorConfig,
    steps: Vec<Step, MAX_STEPS>,
    index: usize,
    step_started_ms: Millis,
}

impl Indicator {
    pub fn new(config: IndicatorConfig) -> Self {
        Self {
            config,
            steps: Vec::new(),
            index: 0,
            step_started_ms: 0,
        }
    }

    /// Queue the RESET-rising sequence starting at `now`.
    pub fn startup(&mut self, now: Millis) {
        self.load(now);
        for _ in 0..self.config.startup_blink_count {
            let on = Step {
                lit: true,
                duration_ms: self.config.startup_blink_on_ms,
            };
            let off = Step {
                lit: false,
                duration_ms: self.config.startup_blink_off_ms,
            };
            if self.steps.push(on).is_err() || self.steps.push(off).is_err() {
                break;
            }
        }
    }

    /// Queue the RESET-falling sequence starting at `now`.
    pub fn powerdown(&mut self, now: Millis) {
        self.load(now);
        let _ = self.steps.push(Step {
            lit: true,
            duration_ms: self.config.powerdown_blink_on_ms,
        });
    }

    /// Advance to `now` and return whether the LED should be lit.
    pub fn tick(&mut self, now: Millis) -> bool {
        while let Some(step) = self.steps.get(self.index) {
            if elapsed(now, self.step_started_ms) < step.duration_ms {
                return step.lit;
            }
            self.step_started_ms = self.step_started_ms.wrapping_add(step.duration_ms);
            self.index += 1;
        }
        false
    }

    /// A sequence is still playing.
    pub fn is_busy(&self) -> bool {
        self.index < self.steps.len()
    }

    fn load(&mut self, now: Millis) {
        self.steps.clear();
        self.index = 0;
        self.step_started_ms = now;
    }
}

impl EventSink for Indicator {
    fn emit(&mut self, event: &InterlockEvent) {
        match *event {
            InterlockEvent::PowerGoodRose { at_ms } => self.startup(at_ms),
            InterlockEvent::PowerGoodFell { at_ms } => self.powerdown(at_ms),
            _ => {}
        }
    }
}
