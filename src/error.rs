//! Unified error types for the killgate firmware.
//!
//! Timing disqualification (debounced edges, short power-good, inhibit,
//! timeout release) is *not* an error and never appears here: those are
//! ordinary outcomes of the interlock core.  This module only covers the
//! hardware and configuration edges of the system.  Configuration is checked
//! at compile time, so [`ConfigError`] never reaches [`Error`].
//!
//! All variants are `Copy` so they can be passed out of the poll loop and
//! logged without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// An output write (KILL line, status LED) failed.
    Output(OutputError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Output(e) => write!(f, "output: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Peripheral initialisation
// ---------------------------------------------------------------------------

/// Errors during one-shot peripheral initialisation (ESP-IDF return codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
    IsrHandlerAddFailed(i32),
    IntrEnableFailed(i32),
}

impl fmt::Display for HwInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::IsrHandlerAddFailed(rc) => write!(f, "GPIO ISR handler add failed (rc={})", rc),
            Self::IntrEnableFailed(rc) => write!(f, "GPIO interrupt enable failed (rc={})", rc),
        }
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Output writes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputError {
    /// Driving KILL low failed.
    KillAssertFailed,
    /// Releasing KILL to high impedance failed.
    KillReleaseFailed,
    /// Status LED write failed.
    LedWriteFailed,
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KillAssertFailed => write!(f, "KILL assert failed"),
            Self::KillReleaseFailed => write!(f, "KILL release failed"),
            Self::LedWriteFailed => write!(f, "status LED write failed"),
        }
    }
}

impl From<OutputError> for Error {
    fn from(e: OutputError) -> Self {
        Self::Output(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Rejected threshold relations in [`InterlockConfig`](crate::config::InterlockConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroDebounce,
    /// The loop must observe edges and releases at sub-debounce granularity.
    PollNotBelowDebounce,
    HoldExceedsTimeout,
    ZeroTimeout,
    ZeroInhibit,
    ZeroStatusInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDebounce => write!(f, "debounce_ms must be non-zero"),
            Self::PollNotBelowDebounce => {
                write!(f, "poll_interval_ms must be non-zero and below debounce_ms")
            }
            Self::HoldExceedsTimeout => write!(f, "min_hold_ms exceeds timeout_ms"),
            Self::ZeroTimeout => write!(f, "timeout_ms must be non-zero"),
            Self::ZeroInhibit => write!(f, "max_inhibit_ms must be non-zero when set"),
            Self::ZeroStatusInterval => write!(f, "status_interval_ms must be non-zero"),
        }
    }
}
