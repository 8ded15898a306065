//! Humidistat firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;

pub mod pins;

// Hardware-facing modules compile on every target; the ESP-IDF paths are
// cfg-gated inside and the host builds fall back to in-memory simulation.
pub mod adapters;
pub mod drivers;
pub mod sensors;
