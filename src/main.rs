//! Humidistat Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  RelayDriver     HygrometerAdapter   LogEventSink   Monotonic  │
//! │  (ActuatorPort)  (SensorPort)        (EventSink)    (Clock)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Humidistat · evaluation / telemetry cadence           │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  COMMAND_CHANNEL (inbound) · STATUS (outbound snapshot)        │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The control loop is the only owner of the humidistat. Transport
//! adapters (control page, MQTT) run elsewhere and talk to it through
//! `app::channel`.
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use log::info;

use humidistat::adapters::hardware::HygrometerAdapter;
use humidistat::adapters::log_sink::LogEventSink;
use humidistat::adapters::time::MonotonicClock;
use humidistat::app::service::AppService;
use humidistat::config::SystemConfig;
use humidistat::drivers::hw_init;
use humidistat::drivers::relay::{Polarity, RelayDriver};
use humidistat::error::Error;
use humidistat::pins;
use humidistat::sensors::humidity::HumiditySensor;

/// Loop period. Commands are picked up within one period; evaluations and
/// reports follow their own cadence on top of it.
const LOOP_PERIOD_MS: u64 = 500;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Humidistat v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate().map_err(Error::from)?;

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        log::error!("{}", e);
        return Err(Error::from(e).into());
    }
    let peripherals = Peripherals::take()?;
    // GPIO13 is pins::RELAY_GPIO; esp-idf-hal needs the typed pin.
    let relay_pin = PinDriver::output(peripherals.pins.gpio13)?;
    let relay = RelayDriver::new(relay_pin, Polarity::from_active_low(config.relay_active_low));

    let mut hygrometer = HygrometerAdapter::new(
        HumiditySensor::new(pins::HUMIDITY_ADC_GPIO),
        MonotonicClock::new(),
        config.timing.sensor_warmup_secs,
    );
    let mut sink = LogEventSink::new();

    // ── 4. Application service ────────────────────────────────
    let mut app = AppService::new(config.clone(), relay, MonotonicClock::new());
    app.start(&mut sink);
    app.publish_status();

    info!(
        "System ready: evaluating every {}s, reporting every {}s",
        config.timing.evaluation_interval_secs, config.timing.reporting_interval_secs
    );

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        app.drain_commands(&mut sink);

        if app.evaluation_due() {
            app.tick(&mut hygrometer, &mut sink);
        }

        if app.telemetry_due() {
            app.report_telemetry(None, &mut sink);
        }

        // Status text carries an elapsed time, so refresh it every pass.
        app.publish_status();

        std::thread::sleep(Duration::from_millis(LOOP_PERIOD_MS));
    }
}
