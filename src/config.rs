//! Build-time configuration parameters.
//!
//! All thresholds are fixed when the firmware is built; nothing here can be
//! changed at runtime.  [`InterlockConfig::BUILD`] is checked by a `const`
//! assertion, so an inconsistent set of constants fails compilation instead
//! of shipping.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Timing thresholds of the interlock core (all milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterlockConfig {
    // --- Fault detection ---
    /// Minimum spacing between accepted INT edges.
    pub debounce_ms: u32,
    /// Continuous RESET-high time required before a fault edge qualifies.
    pub min_high_before_fault_ms: u32,

    // --- Kill hold ---
    /// Minimum time KILL stays asserted before it may be released.
    /// Must outlast the supervisor's KILL-ignore window after INT.
    pub min_hold_ms: u32,
    /// Absolute cap on KILL assertion, regardless of RESET.
    pub timeout_ms: u32,

    // --- Startup inhibit ---
    /// Upper bound on the startup inhibit window.  `None` disables it.
    pub max_inhibit_ms: Option<u32>,

    // --- Loop timing ---
    /// Poll loop period.  Must stay below `debounce_ms`.
    pub poll_interval_ms: u32,
    /// Period of the `[STAT]` line.
    pub status_interval_ms: u32,
}

impl InterlockConfig {
    /// The configuration this firmware is built with.
    pub const BUILD: Self = Self {
        debounce_ms: 10,
        // 50–150 ms suits most boards; 10 ms matches the reference EVM.
        min_high_before_fault_ms: 10,
        min_hold_ms: 10,
        timeout_ms: 1000,
        max_inhibit_ms: Some(1000),
        poll_interval_ms: 1,
        status_interval_ms: 1000,
    };

    /// Check the relations between thresholds.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        if self.poll_interval_ms == 0 || self.poll_interval_ms >= self.debounce_ms {
            return Err(ConfigError::PollNotBelowDebounce);
        }
        if self.min_hold_ms > self.timeout_ms {
            return Err(ConfigError::HoldExceedsTimeout);
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if let Some(0) = self.max_inhibit_ms {
            return Err(ConfigError::ZeroInhibit);
        }
        if self.status_interval_ms == 0 {
            return Err(ConfigError::ZeroStatusInterval);
        }
        Ok(())
    }
}

impl Default for InterlockConfig {
    fn default() -> Self {
        Self::BUILD
    }
}

const _: () = assert!(
    InterlockConfig::BUILD.validate().is_ok(),
    "InterlockConfig::BUILD is inconsistent"
);

/// Status LED blink timings (all milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Number of short flashes when RESET rises.
    pub startup_blink_count: u8,
    pub startup_blink_on_ms: u32,
    pub startup_blink_off_ms: u32,
    /// Single long flash when RESET falls.
    pub powerdown_blink_on_ms: u32,
}

impl IndicatorConfig {
    pub const BUILD: Self = Self {
        startup_blink_count: 3,
        startup_blink_on_ms: 120,
        startup_blink_off_ms: 120,
        powerdown_blink_on_ms: 500,
    };
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self::BUILD
    }
}
