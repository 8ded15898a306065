//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them: log to serial, publish over MQTT, refresh
//! the display.

use core::fmt::Write;

use serde::Serialize;

use crate::control::Mode;
use crate::error::SensorError;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries the boot configuration).
    Started { mode: Mode, desired_humidity: i32 },

    /// The relay was switched.
    StateChanged { running: bool },

    /// The hygrometer could not be read; the evaluation was skipped.
    SensorFault(SensorError),

    /// Periodic or transition-triggered telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    /// WiFi signal strength (dBm); `None` when not associated.
    pub rssi: Option<i8>,
    pub temperature: Option<f32>,
    pub humidity_percent: Option<f32>,
    pub running: bool,
    pub mode: Mode,
    pub desired_humidity: i32,
}

/// Wire form of the metrics payload. Every value is a string, as the
/// dashboard on the other side of the broker expects.
#[derive(Serialize)]
struct MetricsPayload {
    s: heapless::String<8>,
    t: heapless::String<12>,
    h: heapless::String<12>,
    r: heapless::String<2>,
}

fn one_decimal(v: Option<f32>) -> heapless::String<12> {
    let mut s = heapless::String::new();
    if let Some(v) = v {
        // 12 bytes holds any plausible reading; larger values are truncated.
        let _ = write!(s, "{:.1}", v);
    }
    s
}

impl TelemetryData {
    /// Compact metrics payload, e.g. `{"s":"-61","t":"21.5","h":"38.0","r":"1"}`.
    pub fn to_json(&self) -> String {
        let mut s = heapless::String::new();
        match self.rssi {
            Some(rssi) => {
                let _ = write!(s, "{rssi}");
            }
            None => {
                let _ = s.push_str("NA");
            }
        }
        let mut r = heapless::String::new();
        let _ = r.push(if self.running { '1' } else { '0' });

        let payload = MetricsPayload {
            s,
            t: one_decimal(self.temperature),
            h: one_decimal(self.humidity_percent),
            r,
        };
        // Four string fields cannot fail to serialize.
        serde_json::to_string(&payload).unwrap_or_default()
    }
}
