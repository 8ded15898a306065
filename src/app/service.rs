//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the [`Humidistat`] and is the only code allowed to
//! mutate it. It exposes a hardware-agnostic API: sensor samples and
//! events flow through port traits injected at call sites, the relay and
//! clock through the ports the humidistat was built with.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       AppService        │
//! AppCommand ───▶ │  Humidistat · cadence   │ ──▶ ActuatorPort
//!                 └────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::control::status::StatusMessage;
use crate::control::{Humidistat, Mode};
use crate::error::SensorError;

use super::channel;
use super::commands::AppCommand;
use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, ClockPort, EventSink, SensorPort};

/// Read-only view for the display and control page.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub mode: Mode,
    pub desired_humidity: i32,
    pub running: bool,
    pub humidity_percent: Option<f32>,
    pub temperature: Option<f32>,
    pub message: StatusMessage,
}

impl StatusSnapshot {
    /// `"ON"` / `"OFF"`, as shown next to the relay on the control page.
    pub fn relay_label(&self) -> &'static str {
        if self.running { "ON" } else { "OFF" }
    }
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates the humidistat and loop cadence.
pub struct AppService<A, C> {
    humidistat: Humidistat<A, C>,
    config: SystemConfig,
    last_humidity: Option<f32>,
    last_temperature: Option<f32>,
    /// Time of the last evaluation; `None` until the first one.
    last_evaluation: Option<i64>,
    /// Time of the last telemetry report; `None` until the first one.
    last_report: Option<i64>,
    /// A relay transition happened since the last report.
    report_pending: bool,
}

impl<A: ActuatorPort, C: ClockPort> AppService<A, C> {
    /// Construct the service and its humidistat (relay driven off).
    ///
    /// Does **not** apply the setpoint — call [`start`](Self::start) next.
    pub fn new(config: SystemConfig, actuator: A, clock: C) -> Self {
        let humidistat = Humidistat::new(actuator, clock, config.humidistat.settings());
        Self {
            humidistat,
            config,
            last_humidity: None,
            last_temperature: None,
            last_evaluation: None,
            last_report: None,
            report_pending: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Apply the configured setpoint and enable the humidistat.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        let desired = self.config.humidistat.desired_humidity;
        self.humidistat.set_humidity_percent(desired);
        self.humidistat.enable();
        sink.emit(&AppEvent::Started {
            mode: self.humidistat.mode(),
            desired_humidity: desired,
        });
        info!(
            "AppService started: mode={} desired={}%",
            self.humidistat.mode(),
            desired
        );
    }

    // ── Per-sample orchestration ──────────────────────────────

    /// Read the hygrometer and run one evaluation.
    ///
    /// Returns the relay state, or `None` when the sensor failed and the
    /// evaluation was skipped. A sensor still warming up does not count as
    /// an evaluation, so the next loop pass tries again.
    pub fn tick(&mut self, sensor: &mut impl SensorPort, sink: &mut impl EventSink) -> Option<bool> {
        let reading = match sensor.read() {
            Ok(r) => r,
            Err(SensorError::WarmingUp) => {
                debug!("Hygrometer warming up, evaluation postponed");
                return None;
            }
            Err(e) => {
                self.last_evaluation = Some(self.now());
                warn!("Humidity read failed: {}", e);
                sink.emit(&AppEvent::SensorFault(e));
                return None;
            }
        };
        self.last_evaluation = Some(self.now());
        self.last_humidity = Some(reading.humidity_percent);
        self.last_temperature = reading.temperature;

        Some(self.evaluate(reading.humidity_percent, false, sink))
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply a configuration change and re-evaluate with the dwell windows
    /// overridden, so the new intent takes effect at once.
    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) {
        match cmd {
            AppCommand::SetHumidity(value) => {
                info!("Setpoint -> {}%", value);
                self.humidistat.set_humidity_percent(value);
                self.reevaluate(sink);
            }
            AppCommand::SetMode(mode) => {
                info!("Mode -> {}", mode);
                self.humidistat.set_mode(mode);
                self.reevaluate(sink);
            }
            AppCommand::Enable => {
                info!("Humidistat enabled");
                self.humidistat.enable();
            }
            AppCommand::Disable => {
                info!("Humidistat disabled");
                self.humidistat.disable();
            }
        }
    }

    /// Apply every command queued in [`COMMAND_CHANNEL`](channel::COMMAND_CHANNEL).
    /// Returns how many were handled.
    pub fn drain_commands(&mut self, sink: &mut impl EventSink) -> usize {
        let mut handled = 0;
        while let Some(cmd) = channel::try_next() {
            self.handle_command(cmd, sink);
            handled += 1;
        }
        handled
    }

    fn reevaluate(&mut self, sink: &mut impl EventSink) {
        match self.last_humidity {
            Some(h) => {
                self.evaluate(h, true, sink);
            }
            // Manual modes don't need a reading.
            None if self.humidistat.mode() != Mode::Auto => {
                self.evaluate(0.0, true, sink);
            }
            None => info!("No humidity sample yet, deferring evaluation"),
        }
    }

    fn evaluate(&mut self, humidity: f32, override_windows: bool, sink: &mut impl EventSink) -> bool {
        let was_running = self.humidistat.is_running();
        let running = self.humidistat.evaluate(humidity, override_windows);
        if running != was_running {
            self.report_pending = true;
            sink.emit(&AppEvent::StateChanged { running });
        }
        running
    }

    // ── Cadence ───────────────────────────────────────────────

    /// An evaluation is due (always true before the first one).
    pub fn evaluation_due(&self) -> bool {
        let interval = i64::from(self.config.timing.evaluation_interval_secs);
        self.last_evaluation
            .is_none_or(|t| self.now().saturating_sub(t) >= interval)
    }

    /// A telemetry report is due: the interval elapsed, nothing was
    /// reported yet, or the relay switched since the last report.
    pub fn telemetry_due(&self) -> bool {
        let interval = i64::from(self.config.timing.reporting_interval_secs);
        self.report_pending
            || self
                .last_report
                .is_none_or(|t| self.now().saturating_sub(t) >= interval)
    }

    /// Build a snapshot and mark the report as sent.
    pub fn report_telemetry(&mut self, rssi: Option<i8>, sink: &mut impl EventSink) {
        let t = self.build_telemetry(rssi);
        sink.emit(&AppEvent::Telemetry(t));
        self.last_report = Some(self.now());
        self.report_pending = false;
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current state.
    /// `rssi`: WiFi signal strength in dBm when associated.
    pub fn build_telemetry(&self, rssi: Option<i8>) -> TelemetryData {
        TelemetryData {
            rssi,
            temperature: self.last_temperature,
            humidity_percent: self.last_humidity,
            running: self.humidistat.is_running(),
            mode: self.humidistat.mode(),
            desired_humidity: self.humidistat.desired_humidity(),
        }
    }

    /// Read-through view of the humidistat for display readers.
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            mode: self.humidistat.mode(),
            desired_humidity: self.humidistat.desired_humidity(),
            running: self.humidistat.is_running(),
            humidity_percent: self.last_humidity,
            temperature: self.last_temperature,
            message: self.humidistat.status_message(),
        }
    }

    /// Publish [`status`](Self::status) for other tasks.
    pub fn publish_status(&self) {
        channel::publish_status(self.status());
    }

    pub fn humidistat(&self) -> &Humidistat<A, C> {
        &self.humidistat
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    fn now(&self) -> i64 {
        self.humidistat.clock().now_secs()
    }
}
