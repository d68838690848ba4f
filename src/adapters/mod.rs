//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to                |
//! |------------|-------------|----------------------------|
//! | `hardware` | SignalPort  | RESET / INT GPIO inputs    |
//! |            | KillOutput  | KILL open-drain GPIO       |
//! | `log_sink` | EventSink   | Serial log output          |
//! | `time`     | TimePort    | ESP32 system timer         |
//!
//! The status LED sink lives with its driver in
//! [`drivers::indicator`](crate::drivers::indicator).

pub mod hardware;
pub mod log_sink;
pub mod time;
