//! Hardware adapter. Bridges the supervisor lines to domain port traits.
//!
//! Owns the RESET and INT input pins and the [`KillLine`] driver, exposing
//! them through [`SignalPort`] and [`KillOutput`].  Generic over
//! `embedded-hal` pins: on the board these are
//! [`GpioPin`](crate::drivers::gpio::GpioPin)s, in tests anything else.
//!
//! A failed input read is reported as the line's safe reading: RESET low
//! (power not good) and INT high (idle).  A failed KILL read-back falls
//! back to the level last written.

use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::ports::{KillOutput, SignalPort};
use crate::drivers::kill_line::KillLine;
use crate::error::OutputError;

/// Concrete adapter that combines the supervisor interface behind port
/// traits.
pub struct HardwareAdapter<R, I, K>
where
    R: InputPin,
    I: InputPin,
    K: OutputPin + InputPin,
{
    reset: R,
    int: I,
    kill: KillLine<K>,
}

impl<R, I, K> HardwareAdapter<R, I, K>
where
    R: InputPin,
    I: InputPin,
    K: OutputPin + InputPin,
{
    pub fn new(reset: R, int: I, kill: KillLine<K>) -> Self {
        Self { reset, int, kill }
    }
}

// ── SignalPort implementation ─────────────────────────────────

impl<R, I, K> SignalPort for HardwareAdapter<R, I, K>
where
    R: InputPin,
    I: InputPin,
    K: OutputPin + InputPin,
{
    fn power_good(&mut self) -> bool {
        self.reset.is_high().unwrap_or_else(|e| {
            warn!("RESET read failed: {e:?}");
            false
        })
    }

    fn fault_line(&mut self) -> bool {
        self.int.is_high().unwrap_or_else(|e| {
            warn!("INT read failed: {e:?}");
            true
        })
    }

    fn kill_line(&mut self) -> bool {
        match self.kill.is_high() {
            Ok(high) => high,
            Err(e) => {
                warn!("KILL read failed: {e:?}");
                !self.kill.is_asserted()
            }
        }
    }
}

// ── KillOutput implementation ─────────────────────────────────

impl<R, I, K> KillOutput for HardwareAdapter<R, I, K>
where
    R: InputPin,
    I: InputPin,
    K: OutputPin + InputPin,
{
    fn assert_kill(&mut self) -> Result<(), OutputError> {
        self.kill.assert()
    }

    fn release_kill(&mut self) -> Result<(), OutputError> {
        self.kill.release()
    }

    fn is_kill_asserted(&self) -> bool {
        self.kill.is_asserted()
    }
}
