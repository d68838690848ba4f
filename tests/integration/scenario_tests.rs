//! End-to-end timing scenarios: ISR edge → mailbox → service → KILL line.
//!
//! Each scenario runs twice: once with the clock starting at zero and once
//! with the clock a few tens of milliseconds short of `u32::MAX`, so every
//! window straddles the rollover.

use killgate::adapters::log_sink::render;
use killgate::app::events::InterlockEvent;
use killgate::config::InterlockConfig;
use killgate::interlock::{KillState, ReleaseReason};
use log::Level;

use crate::mock_hw::{Bench, KillCall};

const ORIGINS: [u32; 2] = [0, u32::MAX - 60];

/// min_high 80, no inhibit window.
fn bench_config() -> InterlockConfig {
    InterlockConfig {
        min_high_before_fault_ms: 80,
        max_inhibit_ms: None,
        ..InterlockConfig::BUILD
    }
}

/// Boot with RESET low, then raise it at rel 0.
fn powered_bench(config: InterlockConfig, origin: u32) -> Bench {
    let mut b = Bench::boot(config, origin, false);
    b.hw.reset = true;
    b.poll_now();
    b
}

// ── Scenario A: fault too soon after power-good ──────────────

#[test]
fn scenario_a_short_power_good_is_ignored() {
    for origin in ORIGINS {
        let mut b = powered_bench(bench_config(), origin);
        b.run_to(49);
        assert!(b.fault(50));
        b.run_to(300);

        let faults = b.sink.faults();
        assert_eq!(faults.len(), 1);
        assert!(!faults[0].qualifies);
        assert_eq!(faults[0].high_for_ms, Some(50));
        assert!(b.hw.calls.iter().all(|c| *c == KillCall::Release));
        assert_eq!(b.service.kill_state(), KillState::Idle);
    }
}

// ── Scenario B: qualifying fault, power-good drops ───────────

#[test]
fn scenario_b_kill_then_release_on_power_good_low() {
    for origin in ORIGINS {
        let mut b = powered_bench(bench_config(), origin);
        b.run_to(99);
        assert!(b.fault(100));
        b.run_to(100);

        assert!(b.hw.kill_low());
        assert_eq!(b.sink.kill_asserted_at(), vec![b.at(100)]);

        b.run_to(149);
        assert!(b.hw.kill_low());
        b.hw.reset = false;
        b.run_to(160);

        assert!(!b.hw.kill_low());
        assert_eq!(
            b.sink.releases(),
            vec![InterlockEvent::KillReleased {
                at_ms: b.at(150),
                held_ms: 50,
                reason: ReleaseReason::PowerGoodLow,
                power_good: false,
            }]
        );
    }
}

// ── Scenario C: power-good stuck high ────────────────────────

#[test]
fn scenario_c_timeout_releases_with_warning() {
    for origin in ORIGINS {
        let mut b = powered_bench(bench_config(), origin);
        b.run_to(99);
        b.fault(100);
        b.run_to(1099);
        assert!(b.hw.kill_low(), "released before timeout");

        b.run_to(1100);
        assert!(!b.hw.kill_low());

        let releases = b.sink.releases();
        assert_eq!(releases.len(), 1);
        let release = releases[0];
        assert_eq!(
            release,
            InterlockEvent::KillReleased {
                at_ms: b.at(1100),
                held_ms: 1000,
                reason: ReleaseReason::Timeout,
                power_good: true,
            }
        );

        let [_, warning] = render(&release);
        let (level, line) = warning.expect("timeout with RESET high must warn");
        assert_eq!(level, Level::Warn);
        assert_eq!(line.as_str(), "[KILL] timeout with RESET still high");
    }
}

// ── Scenario D: chatter on INT ───────────────────────────────

#[test]
fn scenario_d_debounce_keeps_first_edge() {
    for origin in ORIGINS {
        let mut b = powered_bench(bench_config(), origin);
        b.run_to(99);
        assert!(b.fault(100));
        b.run_to(104);
        assert!(!b.fault(105), "edge 5 ms after an accepted one must be dropped");
        b.run_to(129);
        assert!(b.fault(130));
        b.run_to(200);

        let observed: Vec<_> = b.sink.faults().iter().map(|f| f.observed_at_ms).collect();
        assert_eq!(observed, vec![b.at(100), b.at(130)]);
        // Second qualifying fault lands while already asserted.
        assert_eq!(b.hw.asserts(), 1);
    }
}

// ── Startup inhibit ──────────────────────────────────────────

#[test]
fn fault_inside_inhibit_window_is_ignored() {
    for origin in ORIGINS {
        let mut b = powered_bench(InterlockConfig::BUILD, origin);
        assert!(b.service.inhibit_active());
        b.run_to(499);
        b.fault(500);
        b.run_to(999);
        assert!(b.service.inhibit_active());
        b.run_to(1000);
        assert!(!b.service.inhibit_active());
        b.run_to(1199);
        b.fault(1200);
        b.run_to(1200);

        let faults = b.sink.faults();
        assert_eq!(faults.len(), 2);
        assert!(faults[0].inhibited && !faults[0].qualifies);
        assert!(!faults[1].inhibited && faults[1].qualifies);
        assert_eq!(b.sink.kill_asserted_at(), vec![b.at(1200)]);
        assert!(
            b.sink
                .events
                .contains(&InterlockEvent::InhibitCleared { at_ms: b.at(1000) })
        );
    }
}

#[test]
fn power_good_drop_clears_inhibit_and_rise_rearms() {
    let mut b = powered_bench(InterlockConfig::BUILD, 0);
    b.run_to(200);
    b.hw.reset = false;
    b.run_to(201);
    assert!(!b.service.inhibit_active());
    assert!(!b.shared.inhibited());

    b.run_to(300);
    b.hw.reset = true;
    b.run_to(301);
    assert!(b.service.inhibit_active());
    assert!(b.shared.inhibited());
    assert_eq!(b.shared.power_good().asserted_since_ms, Some(301));
}

// ── Boot seeding ─────────────────────────────────────────────

#[test]
fn reset_high_at_boot_counts_as_rising_edge() {
    for origin in ORIGINS {
        let mut b = Bench::boot(bench_config(), origin, true);
        assert_eq!(
            b.sink.events[..2],
            [
                InterlockEvent::Started {
                    at_ms: origin,
                    power_good: true,
                },
                InterlockEvent::PowerGoodRose { at_ms: origin },
            ]
        );
        b.run_to(79);
        b.fault(80);
        b.run_to(80);
        assert_eq!(b.sink.kill_asserted_at(), vec![b.at(80)]);
    }
}

#[test]
fn reset_high_at_boot_arms_inhibit_window() {
    for origin in ORIGINS {
        let mut b = Bench::boot(InterlockConfig::BUILD, origin, true);
        assert!(b.service.inhibit_active());
        assert!(b.shared.inhibited());
        assert!(
            b.sink
                .events
                .contains(&InterlockEvent::InhibitArmed { at_ms: origin })
        );

        b.run_to(499);
        assert!(b.fault(500));
        b.run_to(500);
        let faults = b.sink.faults();
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].observed_at_ms, b.at(500));
        assert!(!faults[0].qualifies);
        assert_eq!(faults[0].high_for_ms, Some(500));
        assert!(faults[0].inhibited);
        assert_eq!(b.hw.asserts(), 0);

        b.run_to(1000);
        assert!(!b.service.inhibit_active());
        assert!(!b.shared.inhibited());
    }
}

#[test]
fn boot_releases_kill_before_anything_else() {
    let b = Bench::boot(bench_config(), 0, false);
    assert_eq!(b.hw.calls, vec![KillCall::Release]);
}

#[test]
fn fault_before_power_good_ever_asserts_is_ignored() {
    let mut b = Bench::boot(bench_config(), 0, false);
    b.run_to(499);
    b.fault(500);
    b.run_to(600);

    let faults = b.sink.faults();
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].high_for_ms, None);
    assert!(!faults[0].qualifies);
    assert_eq!(b.hw.asserts(), 0);
}

// ── Output failures ──────────────────────────────────────────

#[test]
fn failed_kill_write_keeps_controller_state() {
    let mut b = powered_bench(bench_config(), 0);
    b.hw.fail_writes = true;
    b.run_to(99);
    b.fault(100);
    b.run_to(100);

    assert!(!b.hw.kill_low());
    assert_eq!(b.service.kill_state(), KillState::Asserted { since: 100 });
    // Not retried while nothing changes.
    b.run_to(140);
    assert_eq!(b.hw.asserts(), 1);

    b.hw.fail_writes = false;
    b.hw.reset = false;
    b.run_to(141);
    assert_eq!(b.service.kill_state(), KillState::Idle);
    assert_eq!(b.hw.calls.last(), Some(&KillCall::Release));
}

// ── Periodic status ──────────────────────────────────────────

#[test]
fn status_reports_raw_levels() {
    let mut b = powered_bench(bench_config(), 0);
    b.run_to(99);
    b.fault(100);
    b.hw.int = false;
    b.run_to(1000);

    let status = b
        .sink
        .events
        .iter()
        .find_map(|e| match e {
            InterlockEvent::Status(s) => Some(*s),
            _ => None,
        })
        .expect("status emitted at 1000 ms");
    assert_eq!(status.at_ms, 1000);
    assert!(status.reset_high);
    assert!(!status.int_high);
    assert!(!status.kill_high);

    let [line, _] = render(&InterlockEvent::Status(status));
    assert_eq!(line.unwrap().1.as_str(), "[STAT] t=1000ms RESET=H INT=L KILL=L");
}
