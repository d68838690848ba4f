//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing interlock events to the ESP-IDF
//! logger (UART / USB-CDC in production).  The `[INT]`, `[KILL]` and
//! `[STAT]` lines are the board's bench diagnostics and keep a fixed
//! format; everything else is free-form.

use core::fmt::Write;

use heapless::String;
use log::{Level, log};

use crate::app::events::InterlockEvent;
use crate::app::ports::EventSink;
use crate::app::service::level_char;
use crate::interlock::ReleaseReason;

/// Longest rendered line.
pub const LINE_CAP: usize = 96;

pub type Line = String<LINE_CAP>;

/// Adapter that logs every [`InterlockEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &InterlockEvent) {
        for (level, line) in render(event).into_iter().flatten() {
            log!(level, "{line}");
        }
    }
}

/// Render `event` into at most two log lines.
///
/// A timeout release with RESET still high yields the release line plus a
/// warning.
pub fn render(event: &InterlockEvent) -> [Option<(Level, Line)>; 2] {
    let mut out = [None, None];
    let mut line = Line::new();
    // Lines are sized for the worst case; a truncated write is still logged.
    let level = match *event {
        InterlockEvent::Started { at_ms, power_good } => {
            let _ = write!(line, "[BOOT] t={at_ms}ms RESET={}", level_char(power_good));
            Level::Info
        }
        InterlockEvent::PowerGoodRose { at_ms } => {
            let _ = write!(line, "[RESET] high at t={at_ms}ms");
            Level::Info
        }
        InterlockEvent::PowerGoodFell { at_ms } => {
            let _ = write!(line, "[RESET] low at t={at_ms}ms");
            Level::Info
        }
        InterlockEvent::InhibitArmed { at_ms } => {
            let _ = write!(line, "[INH] armed at t={at_ms}ms");
            Level::Debug
        }
        InterlockEvent::InhibitCleared { at_ms } => {
            let _ = write!(line, "[INH] cleared at t={at_ms}ms");
            Level::Debug
        }
        InterlockEvent::FaultObserved(ev) => {
            let high_for = ev.high_for_ms.map_or(-1, i64::from);
            let verdict = if ev.qualifies { "KILL" } else { "ignore" };
            let _ = write!(
                line,
                "[INT] t={}ms, RESET high for {high_for} ms -> {verdict}",
                ev.observed_at_ms
            );
            Level::Info
        }
        InterlockEvent::KillAsserted { at_ms } => {
            let _ = write!(line, "[KILL] asserted at t={at_ms}ms");
            Level::Warn
        }
        InterlockEvent::KillReleased {
            at_ms,
            held_ms,
            reason,
            power_good,
        } => {
            let _ = write!(
                line,
                "[KILL] released at t={at_ms}ms (elapsed={held_ms}ms, RESET={})",
                level_char(power_good)
            );
            if reason == ReleaseReason::Timeout && power_good {
                let mut warn = Line::new();
                let _ = warn.push_str("[KILL] timeout with RESET still high");
                out[1] = Some((Level::Warn, warn));
            }
            Level::Info
        }
        InterlockEvent::Status(s) => {
            let _ = write!(
                line,
                "[STAT] t={}ms RESET={} INT={} KILL={}",
                s.at_ms,
                level_char(s.reset_high),
                level_char(s.int_high),
                level_char(s.kill_high)
            );
            Level::Info
        }
    };
    out[0] = Some((level, line));
    out
}
