//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART in production). An MQTT adapter would
//! implement the same trait and publish the telemetry payload to
//! `home/<device>/metrics`.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | mode={} desired={}% | {} | relay={}",
                    t.mode,
                    t.desired_humidity,
                    t.to_json(),
                    if t.running { "ON" } else { "OFF" },
                );
            }
            AppEvent::StateChanged { running } => {
                info!("RELAY | {}", if *running { "ON" } else { "OFF" });
            }
            AppEvent::SensorFault(e) => {
                warn!("SENSOR | {}", e);
            }
            AppEvent::Started {
                mode,
                desired_humidity,
            } => {
                info!("START | mode={} desired={}%", mode, desired_humidity);
            }
        }
    }
}
