//! Relay driver for the humidifier/dehumidifier switch.
//!
//! Wraps any `embedded_hal` output pin. Relay boards come in active-high
//! and active-low variants; the polarity is fixed at construction.
//!
//! ## Fault contract
//!
//! A failed pin write is logged and counted but never propagated: the
//! humidistat keeps treating the command as applied, and the next
//! transition writes the pin again.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    pub fn from_active_low(active_low: bool) -> Self {
        if active_low {
            Self::ActiveLow
        } else {
            Self::ActiveHigh
        }
    }
}

pub struct RelayDriver<P> {
    pin: P,
    polarity: Polarity,
    energised: bool,
    write_failures: u32,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Take the pin and immediately release the relay.
    pub fn new(pin: P, polarity: Polarity) -> Self {
        let mut relay = Self {
            pin,
            polarity,
            energised: false,
            write_failures: 0,
        };
        relay.set(false);
        relay
    }

    /// Energise or release the relay.
    pub fn set(&mut self, on: bool) {
        if let Err(e) = self.drive(on) {
            self.write_failures = self.write_failures.saturating_add(1);
            warn!("Relay write ({}) failed: {}", if on { "on" } else { "off" }, e);
        }
        self.energised = on;
    }

    fn drive(&mut self, on: bool) -> Result<(), ActuatorError> {
        let high = match self.polarity {
            Polarity::ActiveHigh => on,
            Polarity::ActiveLow => !on,
        };
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|_| ActuatorError::GpioWriteFailed)
    }

    /// Last commanded state.
    pub fn is_energised(&self) -> bool {
        self.energised
    }

    /// Pin writes that failed since construction.
    pub fn write_failures(&self) -> u32 {
        self.write_failures
    }
}
