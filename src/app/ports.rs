//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService / Humidistat (domain)
//! ```
//!
//! Driven adapters (relay, hygrometer, clock, event sinks) implement these
//! traits. The domain consumes them via generics, so the control core never
//! touches hardware directly.

use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → relay)
// ───────────────────────────────────────────────────────────────

/// Binary output driving the humidifier/dehumidifier relay.
///
/// The domain tracks the last commanded value itself, so there is no
/// read-back. Hardware faults are the adapter's concern: it logs them and
/// the domain keeps treating the command as applied.
pub trait ActuatorPort {
    /// Energise (`true`) or release (`false`) the relay.
    fn write(&mut self, on: bool);
}

impl<T: ActuatorPort + ?Sized> ActuatorPort for &mut T {
    fn write(&mut self, on: bool) {
        (**self).write(on);
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic seconds source shared by the dwell windows and the loop cadence.
pub trait ClockPort {
    fn now_secs(&self) -> i64;
}

impl<T: ClockPort + ?Sized> ClockPort for &T {
    fn now_secs(&self) -> i64 {
        (**self).now_secs()
    }
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One sample from the environment sensor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnvironmentReading {
    /// Relative humidity (%).
    pub humidity_percent: f32,
    /// Temperature, when the sensor provides one.
    pub temperature: Option<f32>,
}

/// Read-side port: the domain calls this once per evaluation.
pub trait SensorPort {
    fn read(&mut self) -> Result<EnvironmentReading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log, MQTT,
/// display).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
