//! Output drivers, hardware initialisation, and peripheral helpers.

pub mod gpio;
pub mod hw_init;
pub mod indicator;
pub mod kill_line;
pub mod status_led;
pub mod watchdog;
