//! Single-colour status LED driver.
//!
//! ## Polarity
//!
//! Boards differ in whether the LED lights on a high or a low pin; the
//! driver takes `active_high` and callers only deal in lit / unlit.
//! Writes are skipped when the requested state is already shown.

use embedded_hal::digital::OutputPin;

use crate::error::OutputError;

pub struct StatusLed<P: OutputPin> {
    pin: P,
    active_high: bool,
    lit: Option<bool>,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(pin: P, active_high: bool) -> Self {
        Self {
            pin,
            active_high,
            lit: None,
        }
    }

    pub fn set(&mut self, lit: bool) -> Result<(), OutputError> {
        if self.lit == Some(lit) {
            return Ok(());
        }
        let high = lit == self.active_high;
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|_| OutputError::LedWriteFailed)?;
        self.lit = Some(lit);
        Ok(())
    }

    pub fn on(&mut self) -> Result<(), OutputError> {
        self.set(true)
    }

    pub fn off(&mut self) -> Result<(), OutputError> {
        self.set(false)
    }

    pub fn is_lit(&self) -> bool {
        self.lit.unwrap_or(false)
    }
}
