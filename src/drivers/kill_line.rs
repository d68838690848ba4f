//! KILL output driver.
//!
//! The line is open drain with a pull-up: `set_low` sinks it (kill
//! asserted), `set_high` turns the driver off and lets the pull-up take it.
//! It is never actively driven high.
//!
//! On pins that can also be read back (the board configures KILL as input
//! plus open-drain output), [`KillLine::is_high`] reports the level actually
//! on the net rather than the level last written.

use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::error::OutputError;

pub struct KillLine<P: OutputPin> {
    pin: P,
    asserted: bool,
}

impl<P: OutputPin> KillLine<P> {
    /// Wrap an already released pin.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            asserted: false,
        }
    }

    pub fn assert(&mut self) -> Result<(), OutputError> {
        self.pin.set_low().map_err(|e| {
            warn!("KILL set_low: {e:?}");
            OutputError::KillAssertFailed
        })?;
        self.asserted = true;
        Ok(())
    }

    pub fn release(&mut self) -> Result<(), OutputError> {
        self.pin.set_high().map_err(|e| {
            warn!("KILL set_high: {e:?}");
            OutputError::KillReleaseFailed
        })?;
        self.asserted = false;
        Ok(())
    }

    /// Level last written successfully.
    pub fn is_asserted(&self) -> bool {
        self.asserted
    }
}

impl<P: OutputPin + InputPin> KillLine<P> {
    pub fn is_high(&mut self) -> Result<bool, P::Error> {
        self.pin.is_high()
    }
}
