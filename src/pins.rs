//! GPIO / peripheral pin assignments for the humidistat board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Relay
// ---------------------------------------------------------------------------

/// Digital output driving the relay coil transistor.
pub const RELAY_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Analog hygrometer output. ADC1 channel 6 (GPIO 34 on ESP32).
pub const HUMIDITY_ADC_GPIO: i32 = 34;
