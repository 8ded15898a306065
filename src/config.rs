//! System configuration parameters
//!
//! Every tunable value of the humidistat lives here and is passed into the
//! constructors at startup. Nothing is looked up from globals. The
//! configuration is not persisted: each boot starts from the compiled
//! defaults or from a JSON document supplied at startup.

use core::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::control::{Mode, Settings};
use crate::error::ConfigError;

/// Humidistat control parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumidistatConfig {
    /// Mode applied at boot
    pub initial_mode: Mode,
    /// Shortest run before a non-override stop (minutes)
    pub minimum_run_minutes: i64,
    /// Shortest rest before a non-override start (minutes)
    pub minimum_off_minutes: i64,
    /// Longest run before a forced stop (minutes)
    pub maximum_run_minutes: i64,
    /// Setpoint applied at boot (% RH)
    pub desired_humidity: i32,
    /// Hold the relay off while the humidistat is disabled
    pub respect_enabled_flag: bool,
}

impl Default for HumidistatConfig {
    fn default() -> Self {
        Self {
            initial_mode: Mode::Auto,
            minimum_run_minutes: 15,
            minimum_off_minutes: 15,
            maximum_run_minutes: 240,
            desired_humidity: 40,
            respect_enabled_flag: false,
        }
    }
}

impl HumidistatConfig {
    /// Construction parameters for [`Humidistat`](crate::control::Humidistat).
    pub fn settings(&self) -> Settings {
        Settings {
            mode: self.initial_mode,
            minimum_run_minutes: self.minimum_run_minutes,
            minimum_off_minutes: self.minimum_off_minutes,
            maximum_run_minutes: self.maximum_run_minutes,
            respect_enabled_flag: self.respect_enabled_flag,
        }
    }
}

/// Loop cadence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Humidity evaluation interval (seconds)
    pub evaluation_interval_secs: u32,
    /// Telemetry report interval (seconds)
    pub reporting_interval_secs: u32,
    /// Sensor settling time after boot before the first evaluation (seconds)
    pub sensor_warmup_secs: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            evaluation_interval_secs: 60,  // 1/min
            reporting_interval_secs: 300,  // 1/5 min
            sensor_warmup_secs: 20,
        }
    }
}

/// Network identity and broker credentials for the transport adapters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Device name used in MQTT topics
    pub device_name: heapless::String<32>,
    pub wifi_ssid: heapless::String<32>,
    pub wifi_password: heapless::String<64>,
    pub mqtt_broker: heapless::String<64>,
    pub mqtt_port: u16,
    pub mqtt_user: heapless::String<32>,
    pub mqtt_password: heapless::String<64>,
    pub ntp_server: heapless::String<64>,
    /// Local time offset from UTC (hours)
    pub utc_offset_hours: i8,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let mut device_name = heapless::String::new();
        let _ = device_name.push_str("humidistat");
        let mut ntp_server = heapless::String::new();
        let _ = ntp_server.push_str("pool.ntp.org");
        Self {
            device_name,
            wifi_ssid: heapless::String::new(),
            wifi_password: heapless::String::new(),
            mqtt_broker: heapless::String::new(),
            mqtt_port: 1883,
            mqtt_user: heapless::String::new(),
            mqtt_password: heapless::String::new(),
            ntp_server,
            utc_offset_hours: 0,
        }
    }
}

impl NetworkConfig {
    /// Topic the device subscribes to for remote commands.
    pub fn command_topic(&self) -> heapless::String<48> {
        self.topic("cmd")
    }

    /// Topic the device publishes telemetry to.
    pub fn metrics_topic(&self) -> heapless::String<48> {
        self.topic("metrics")
    }

    fn topic(&self, leaf: &str) -> heapless::String<48> {
        let mut t = heapless::String::new();
        // device_name is at most 32 bytes: "home/" + 32 + "/metrics" fits.
        let _ = write!(t, "home/{}/{}", self.device_name, leaf);
        t
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub humidistat: HumidistatConfig,
    pub timing: TimingConfig,
    pub network: NetworkConfig,
    /// Relay board energises on a LOW output
    pub relay_active_low: bool,
}

impl SystemConfig {
    /// Decode a JSON document; missing fields keep their defaults.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the control loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let h = &self.humidistat;
        if h.minimum_run_minutes < 0 {
            return Err(ConfigError::ValidationFailed("minimum_run_minutes < 0"));
        }
        if h.minimum_off_minutes < 0 {
            return Err(ConfigError::ValidationFailed("minimum_off_minutes < 0"));
        }
        if h.maximum_run_minutes < h.minimum_run_minutes {
            return Err(ConfigError::ValidationFailed(
                "maximum_run_minutes < minimum_run_minutes",
            ));
        }

        let t = &self.timing;
        if t.evaluation_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed("evaluation_interval_secs == 0"));
        }
        if t.reporting_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed("reporting_interval_secs == 0"));
        }
        Ok(())
    }
}
