//! GPIO pin assignments for the supervisor interlock board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Supervisor (TPS3424-class) interface
// ---------------------------------------------------------------------------

/// Power-good input.  Push-pull from the supervisor, HIGH = supply good.
pub const RESET_GPIO: i32 = 1;
/// Fault input.  Open drain, active LOW, falling-edge interrupt.
/// Internal pull-up enabled.
pub const INT_GPIO: i32 = 2;
/// Kill output.  Active LOW; released as open drain with pull-up,
/// never driven HIGH.
pub const KILL_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Status LED
// ---------------------------------------------------------------------------

/// On-board LED.
pub const LED_GPIO: i32 = 21;
/// The on-board LED lights when its pin is driven LOW.
pub const LED_ACTIVE_HIGH: bool = false;
