//! Hardware adapters — bridge the real peripherals to domain port traits.
//!
//! The relay and the hygrometer live on opposite sides of the service:
//! the humidistat owns the relay ([`ActuatorPort`]) for its whole life,
//! while the hygrometer ([`SensorPort`]) is handed to each
//! [`tick`](crate::app::service::AppService::tick). On non-espidf targets
//! the underlying drivers use cfg-gated simulation stubs.

use embedded_hal::digital::OutputPin;
use log::{debug, info};

use crate::app::ports::{ActuatorPort, ClockPort, EnvironmentReading, SensorPort};
use crate::drivers::relay::RelayDriver;
use crate::error::SensorError;
use crate::sensors::humidity::HumiditySensor;

// ── ActuatorPort implementation ───────────────────────────────

impl<P: OutputPin> ActuatorPort for RelayDriver<P> {
    fn write(&mut self, on: bool) {
        self.set(on);
    }
}

// ── SensorPort implementation ─────────────────────────────────

/// Hygrometer behind the [`SensorPort`], refusing reads until the probe has
/// settled after power-on.
pub struct HygrometerAdapter<C> {
    sensor: HumiditySensor,
    clock: C,
    ready_at: i64,
    announced_ready: bool,
}

impl<C: ClockPort> HygrometerAdapter<C> {
    pub fn new(sensor: HumiditySensor, clock: C, warmup_secs: u32) -> Self {
        let ready_at = clock.now_secs().saturating_add(i64::from(warmup_secs));
        Self {
            sensor,
            clock,
            ready_at,
            announced_ready: false,
        }
    }
}

impl<C: ClockPort> SensorPort for HygrometerAdapter<C> {
    fn read(&mut self) -> Result<EnvironmentReading, SensorError> {
        if self.clock.now_secs() < self.ready_at {
            return Err(SensorError::WarmingUp);
        }
        if !self.announced_ready {
            info!("Hygrometer: warm-up complete");
            self.announced_ready = true;
        }
        let reading = self.sensor.read()?;
        debug!("Hygrometer: raw={} rh={:.1}%", reading.raw, reading.percent);
        Ok(EnvironmentReading {
            humidity_percent: reading.percent,
            temperature: None,
        })
    }
}
