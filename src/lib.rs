//! Killgate firmware library.
//!
//! Exposes the interlock core and its adapters for integration testing.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod interlock;
pub mod pins;

pub mod adapters;
pub mod drivers;
