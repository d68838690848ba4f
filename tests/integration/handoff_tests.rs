//! ISR ↔ loop handoff under real concurrency.
//!
//! One thread plays the INT ISR and hammers the detector; another plays the
//! poll loop, republishing power-good and taking events.  Threads are a
//! harsher schedule than the board's single-core preemption: reads and
//! writes truly overlap here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use killgate::config::InterlockConfig;
use killgate::events::InterlockShared;
use killgate::interlock::{FaultEvent, PowerGoodState};

const MIN_HIGH: u32 = 80;
const EDGES: u32 = 20_000;
const STEP: u32 = 10;

fn config() -> InterlockConfig {
    InterlockConfig {
        min_high_before_fault_ms: MIN_HIGH,
        ..InterlockConfig::BUILD
    }
}

/// Every published `asserted_since_ms` is `k * 1000 + 3`.
fn published_since(k: u32) -> u32 {
    k * 1000 + 3
}

fn is_published_since(since: u32) -> bool {
    since % 1000 == 3
}

#[test]
fn events_are_never_torn() {
    let shared = InterlockShared::new(&config());
    let done = AtomicBool::new(false);

    let taken: Vec<FaultEvent> = thread::scope(|s| {
        s.spawn(|| {
            for i in 1..=EDGES {
                assert!(shared.on_fault_edge(i * STEP), "edges {STEP} ms apart are never debounced");
            }
            done.store(true, Ordering::Release);
        });

        let consumer = s.spawn(|| {
            let mut taken = Vec::new();
            let mut k = 0u32;
            loop {
                let finished = done.load(Ordering::Acquire);

                k = k.wrapping_add(1) % 256;
                let state = if k % 3 == 0 {
                    PowerGoodState::LOW
                } else {
                    PowerGoodState {
                        asserted: true,
                        asserted_since_ms: Some(published_since(k)),
                    }
                };
                shared.publish_power_good(state);
                shared.publish_inhibit(k % 5 == 0);

                if let Some(ev) = shared.take_event() {
                    taken.push(ev);
                }
                if finished && !shared.event_pending() {
                    break;
                }
            }
            taken
        });

        consumer.join().expect("consumer panicked")
    });

    assert!(!taken.is_empty());
    for ev in &taken {
        match ev.high_for_ms {
            Some(h) => {
                let since = ev.observed_at_ms.wrapping_sub(h);
                assert!(is_published_since(since), "torn power-good snapshot: {ev:?}");
            }
            None => assert!(!ev.qualifies, "qualified without power-good: {ev:?}"),
        }
        assert_eq!(
            ev.qualifies,
            ev.high_for_ms.is_some_and(|h| h >= MIN_HIGH) && !ev.inhibited,
            "verdict does not match its own inputs: {ev:?}"
        );
        assert_eq!(ev.observed_at_ms % STEP, 0);
    }

    // Overwrite semantics: each take sees a strictly newer edge.
    assert!(taken.windows(2).all(|w| w[0].observed_at_ms < w[1].observed_at_ms));
    assert_eq!(taken.last().map(|e| e.observed_at_ms), Some(EDGES * STEP));
}

#[test]
fn unconsumed_event_is_replaced_by_newest() {
    let shared = InterlockShared::new(&config());
    shared.publish_power_good(PowerGoodState {
        asserted: true,
        asserted_since_ms: Some(0),
    });

    for i in 1..=100 {
        shared.on_fault_edge(i * STEP);
    }
    let ev = shared.take_event().expect("event pending");
    assert_eq!(ev.observed_at_ms, 100 * STEP);
    assert_eq!(shared.take_event(), None);
}
