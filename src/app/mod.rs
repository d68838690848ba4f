//! Application core: interlock orchestration, zero I/O.
//!
//! The decision state machines live in [`crate::interlock`]; this layer
//! wires them to the board.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
