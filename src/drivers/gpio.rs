//! `embedded-hal` 1.0 digital pins over the raw [`hw_init`] level calls.
//!
//! The pin must already be configured by [`hw_init::init_peripherals`];
//! `GpioPin` only reads and writes levels.

use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};

use crate::drivers::hw_init;

/// ESP-IDF return code from a failed level write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioError(pub i32);

impl digital::Error for GpioError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl core::fmt::Display for GpioError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "gpio_set_level failed (rc={})", self.0)
    }
}

#[derive(Debug)]
pub struct GpioPin {
    gpio: i32,
}

impl GpioPin {
    pub const fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl ErrorType for GpioPin {
    type Error = GpioError;
}

impl InputPin for GpioPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(hw_init::gpio_read(self.gpio))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!hw_init::gpio_read(self.gpio))
    }
}

impl OutputPin for GpioPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        write(self.gpio, false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        write(self.gpio, true)
    }
}

fn write(gpio: i32, high: bool) -> Result<(), GpioError> {
    match hw_init::gpio_write(gpio, high) {
        0 => Ok(()),
        rc => Err(GpioError(rc)),
    }
}
