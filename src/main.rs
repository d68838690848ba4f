//! Killgate Firmware: Main Entry Point
//!
//! Power-good / fault interlock with a fixed-rate poll loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter      LogEventSink   Indicator     EspClock    │
//! │  (Signal+KillOutput)  (EventSink)    (EventSink)   (TimePort)  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           InterlockService (pure logic)                │    │
//! │  │  PowerGoodTracker · StartupInhibit · KillController    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  INT ISR ── EdgeDetector ── FaultMailbox (events::INTERLOCK)   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use std::time::Duration;

use anyhow::Result;
use log::{error, info};

use killgate::adapters::hardware::HardwareAdapter;
use killgate::adapters::log_sink::LogEventSink;
use killgate::adapters::time::EspClock;
use killgate::app::ports::TimePort;
use killgate::app::service::InterlockService;
use killgate::config::{IndicatorConfig, InterlockConfig};
use killgate::drivers::gpio::GpioPin;
use killgate::drivers::hw_init;
use killgate::drivers::indicator::Indicator;
use killgate::drivers::kill_line::KillLine;
use killgate::drivers::status_led::StatusLed;
use killgate::drivers::watchdog::Watchdog;
use killgate::error::Error;
use killgate::events::INTERLOCK;
use killgate::pins;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Killgate v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = InterlockConfig::BUILD;
    let indicator_config = IndicatorConfig::BUILD;
    info!("Config: {}", serde_json::to_string(&config)?);
    info!("Indicator: {}", serde_json::to_string(&indicator_config)?);

    // ── 2. Initialise hardware peripherals ────────────────────
    // KILL comes out of init released, so a failure here leaves the
    // supervisor in sole control of the load.
    hw_init::init_peripherals().map_err(Error::from)?;
    let watchdog = Watchdog::default();

    let clock = EspClock::new();
    let mut hw = HardwareAdapter::new(
        GpioPin::new(pins::RESET_GPIO),
        GpioPin::new(pins::INT_GPIO),
        KillLine::new(GpioPin::new(pins::KILL_GPIO)),
    );
    let mut led = StatusLed::new(GpioPin::new(pins::LED_GPIO), pins::LED_ACTIVE_HIGH);
    let mut sinks = (LogEventSink::new(), Indicator::new(indicator_config));

    // ── 3. Seed from current levels, then arm the fault ISR ───
    let mut service = InterlockService::new(config, &INTERLOCK);
    service.start(clock.now_ms(), &mut hw, &mut sinks);
    hw_init::init_isr_service().map_err(Error::from)?;

    info!(
        "Entering poll loop ({}ms tick, status every {}ms)",
        config.poll_interval_ms, config.status_interval_ms
    );

    // ── 4. Poll loop ──────────────────────────────────────────
    let tick = Duration::from_millis(u64::from(config.poll_interval_ms));
    let mut led_ok = true;
    loop {
        let now = clock.now_ms();
        service.poll(now, &mut hw, &mut sinks);

        // Log the first LED failure only; the write is retried every tick.
        match led.set(sinks.1.tick(now)) {
            Ok(()) => led_ok = true,
            Err(e) if led_ok => {
                error!("{}", Error::from(e));
                led_ok = false;
            }
            Err(_) => {}
        }

        watchdog.feed();
        std::thread::sleep(tick);
    }
}
