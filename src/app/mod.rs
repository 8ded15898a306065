//! Application core — pure domain orchestration, zero I/O.
//!
//! Owns the humidistat on the control task, applies inbound commands and
//! emits events. All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod channel;
pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
