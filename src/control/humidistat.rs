//! Hysteresis humidistat with dwell-time protection.
//!
//! Converts {desired humidity, measured humidity, time since the last relay
//! transition, mode} into a relay command. In `Auto` mode the relay:
//!
//! - starts when the air is drier than the setpoint, unless it stopped less
//!   than `minimum_off` ago;
//! - stops when the setpoint is met, unless it started less than
//!   `minimum_run` ago;
//! - is forced off after `maximum_run` even if the air is still too dry.
//!
//! An `override` evaluation skips all three windows once; configuration
//! changes use it so a new setpoint or mode takes effect immediately.
//!
//! The dwell windows are measured from `last_activity`, which moves only
//! on a real transition. Re-commanding the current state never touches it.

use log::{debug, info};

use crate::app::ports::{ActuatorPort, ClockPort};

use super::mode::Mode;
use super::status::{Activity, StatusMessage, format_status};

/// Setpoint value before the first `set_humidity_percent`. Below any real
/// reading, so `Auto` never starts the relay before it is configured.
pub const UNSET_HUMIDITY: i32 = -1;

/// Construction parameters. Durations are taken as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub mode: Mode,
    pub minimum_run_minutes: i64,
    pub minimum_off_minutes: i64,
    pub maximum_run_minutes: i64,
    /// When set, a disabled humidistat holds the relay off.
    pub respect_enabled_flag: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::Auto,
            minimum_run_minutes: 15,
            minimum_off_minutes: 15,
            maximum_run_minutes: 240,
            respect_enabled_flag: false,
        }
    }
}

pub struct Humidistat<A, C> {
    actuator: A,
    clock: C,
    mode: Mode,
    desired_humidity: i32,
    enabled: bool,
    respect_enabled_flag: bool,
    running: bool,
    /// Set by the first real transition; never cleared.
    transitioned: bool,
    last_activity: i64,
    init_time: i64,
    minimum_run_secs: i64,
    minimum_off_secs: i64,
    maximum_run_secs: i64,
}

impl<A: ActuatorPort, C: ClockPort> Humidistat<A, C> {
    /// Build the humidistat and drive the relay off.
    ///
    /// `last_activity` is back-dated by the minimum run time while
    /// `init_time` stays at boot, so "never switched" is
    /// `last_activity < init_time`.
    pub fn new(mut actuator: A, clock: C, settings: Settings) -> Self {
        let now = clock.now_secs();
        let minimum_run_secs = settings.minimum_run_minutes.saturating_mul(60);

        // Bypasses set_state: the boot write is not a transition.
        actuator.write(false);

        info!(
            "Humidistat: mode={} min_run={}m min_off={}m max_run={}m",
            settings.mode,
            settings.minimum_run_minutes,
            settings.minimum_off_minutes,
            settings.maximum_run_minutes
        );

        Self {
            actuator,
            clock,
            mode: settings.mode,
            desired_humidity: UNSET_HUMIDITY,
            enabled: false,
            respect_enabled_flag: settings.respect_enabled_flag,
            running: false,
            transitioned: false,
            last_activity: now.saturating_sub(minimum_run_secs),
            init_time: now,
            minimum_run_secs,
            minimum_off_secs: settings.minimum_off_minutes.saturating_mul(60),
            maximum_run_secs: settings.maximum_run_minutes.saturating_mul(60),
        }
    }

    // ── Configuration ─────────────────────────────────────────

    pub fn set_humidity_percent(&mut self, value: i32) {
        self.desired_humidity = value;
    }

    /// Store the mode. The relay follows on the next [`evaluate`](Self::evaluate).
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    // ── Relay primitive ───────────────────────────────────────

    /// Command the relay. Only a real change writes the output and stamps
    /// `last_activity`.
    pub fn set_state(&mut self, on: bool) {
        if self.running == on {
            return;
        }
        let now = self.clock.now_secs();
        info!(
            "Humidistat: switching {} -> {} at {}",
            u8::from(self.running),
            u8::from(on),
            now
        );
        self.actuator.write(on);
        self.running = on;
        self.transitioned = true;
        self.last_activity = now;
    }

    // ── Control law ───────────────────────────────────────────

    /// Run one control decision and return the resulting relay state.
    pub fn evaluate(&mut self, current_humidity: f32, override_windows: bool) -> bool {
        if self.respect_enabled_flag && !self.enabled {
            debug!("Humidistat: disabled, holding relay off");
            self.set_state(false);
            return self.running;
        }

        match self.mode {
            Mode::On => {
                self.set_state(true);
                self.running
            }
            Mode::Off => {
                self.set_state(false);
                self.running
            }
            Mode::Auto => self.evaluate_auto(current_humidity, override_windows),
        }
    }

    fn evaluate_auto(&mut self, current_humidity: f32, override_windows: bool) -> bool {
        let now = self.clock.now_secs();
        let elapsed = now.saturating_sub(self.last_activity);
        let desired = self.desired_humidity as f32;

        if desired > current_humidity {
            if self.running {
                if elapsed > self.maximum_run_secs && !override_windows {
                    info!(
                        "Humidistat: {current_humidity}% < {desired}% but maximum run reached after {elapsed}s, stopping"
                    );
                    self.set_state(false);
                    return false;
                }
                debug!("Humidistat: {current_humidity}% < {desired}%, running for {elapsed}s");
                return true;
            }

            if elapsed <= self.minimum_off_secs && !override_windows && self.transitioned {
                debug!(
                    "Humidistat: {current_humidity}% < {desired}% but off for only {elapsed}s (minimum {}s)",
                    self.minimum_off_secs
                );
                return false;
            }

            info!("Humidistat: {current_humidity}% < {desired}%, starting");
            self.set_state(true);
            return true;
        }

        if self.running && elapsed < self.minimum_run_secs && !override_windows {
            debug!(
                "Humidistat: {current_humidity}% >= {desired}% but running for only {elapsed}s (minimum {}s)",
                self.minimum_run_secs
            );
            return true;
        }

        debug!("Humidistat: {current_humidity}% >= {desired}%, holding off");
        self.set_state(false);
        false
    }

    /// Boot-time bookkeeping still in effect: `last_activity` predates
    /// `init_time`. Drives the "No events" status line only; with a zero
    /// minimum run it is false from the start.
    fn is_cold(&self) -> bool {
        self.last_activity < self.init_time
    }

    // ── Queries ───────────────────────────────────────────────

    /// Status line for the display and control page.
    pub fn status_message(&self) -> StatusMessage {
        let now = self.clock.now_secs();
        if self.is_cold() {
            format_status(Activity::NoEvents, now.saturating_sub(self.init_time))
        } else if self.running {
            format_status(Activity::Running, now.saturating_sub(self.last_activity))
        } else {
            format_status(Activity::Stopped, now.saturating_sub(self.last_activity))
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn desired_humidity(&self) -> i32 {
        self.desired_humidity
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Seconds timestamp of the last relay transition (back-dated at boot).
    pub fn last_activity(&self) -> i64 {
        self.last_activity
    }

    pub fn init_time(&self) -> i64 {
        self.init_time
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
