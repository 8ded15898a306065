//! Integration tests for the AppService → Humidistat → relay pipeline.
//!
//! These run on the host (x86_64) and drive the service with a manual
//! clock, a scripted hygrometer and a recording relay.

use humidistat::adapters::time::ManualClock;
use humidistat::app::commands::AppCommand;
use humidistat::app::events::AppEvent;
use humidistat::app::ports::ClockPort;
use humidistat::app::service::AppService;
use humidistat::config::SystemConfig;
use humidistat::control::Mode;
use humidistat::error::SensorError;

use crate::mock_hw::{MockRelay, MockSensor, RecordingSink};

fn make_app() -> (AppService<MockRelay, ManualClock>, MockRelay, ManualClock, RecordingSink) {
    let relay = MockRelay::new();
    let clock = ManualClock::new(0);
    let mut sink = RecordingSink::new();
    let mut app = AppService::new(SystemConfig::default(), relay.clone(), clock.clone());
    app.start(&mut sink);
    (app, relay, clock, sink)
}

#[test]
fn boot_drives_relay_off_and_announces_start() {
    let (app, relay, _clock, sink) = make_app();

    assert_eq!(relay.writes(), vec![false]);
    assert!(!app.status().running);
    assert_eq!(
        sink.events.first(),
        Some(&AppEvent::Started {
            mode: Mode::Auto,
            desired_humidity: 40,
        })
    );
}

#[test]
fn dry_air_at_boot_starts_relay() {
    let (mut app, relay, _clock, mut sink) = make_app();
    let mut sensor = MockSensor::constant(30.0);

    assert_eq!(app.tick(&mut sensor, &mut sink), Some(true));
    assert_eq!(relay.writes(), vec![false, true]);
    assert_eq!(sink.state_changes(), vec![true]);
}

#[test]
fn humid_air_at_boot_keeps_relay_off() {
    let (mut app, relay, _clock, mut sink) = make_app();
    let mut sensor = MockSensor::constant(55.0);

    assert_eq!(app.tick(&mut sensor, &mut sink), Some(false));
    assert_eq!(relay.writes(), vec![false], "no redundant write");
    assert!(sink.state_changes().is_empty());
    assert_eq!(app.humidistat().last_activity(), -900);
}

#[test]
fn minimum_run_holds_relay_on_after_setpoint_met() {
    let (mut app, relay, clock, mut sink) = make_app();
    let mut sensor = MockSensor::constant(30.0);
    app.tick(&mut sensor, &mut sink);

    sensor.set(50.0);
    clock.set(60);
    assert_eq!(app.tick(&mut sensor, &mut sink), Some(true));
    clock.set(899);
    assert_eq!(app.tick(&mut sensor, &mut sink), Some(true));
    clock.set(900);
    assert_eq!(app.tick(&mut sensor, &mut sink), Some(false));

    assert_eq!(relay.writes(), vec![false, true, false]);
    assert_eq!(app.humidistat().last_activity(), 900);
}

#[test]
fn minimum_off_delays_restart() {
    let (mut app, relay, clock, mut sink) = make_app();
    let mut sensor = MockSensor::constant(30.0);
    app.tick(&mut sensor, &mut sink);

    sensor.set(50.0);
    clock.set(900);
    app.tick(&mut sensor, &mut sink);

    sensor.set(30.0);
    clock.set(960);
    assert_eq!(app.tick(&mut sensor, &mut sink), Some(false));
    clock.set(1800);
    assert_eq!(app.tick(&mut sensor, &mut sink), Some(false), "exactly 900s is still too soon");
    clock.set(1801);
    assert_eq!(app.tick(&mut sensor, &mut sink), Some(true));

    assert_eq!(relay.writes(), vec![false, true, false, true]);
}

#[test]
fn maximum_run_forces_relay_off_while_still_dry() {
    let (mut app, relay, clock, mut sink) = make_app();
    let mut sensor = MockSensor::constant(30.0);
    app.tick(&mut sensor, &mut sink);

    clock.set(14_400);
    assert_eq!(app.tick(&mut sensor, &mut sink), Some(true));
    clock.set(14_401);
    assert_eq!(app.tick(&mut sensor, &mut sink), Some(false));

    // Still dry, but now inside the minimum off window.
    clock.set(14_461);
    assert_eq!(app.tick(&mut sensor, &mut sink), Some(false));
    assert_eq!(relay.writes(), vec![false, true, false]);
}

#[test]
fn setpoint_change_takes_effect_immediately() {
    let (mut app, relay, clock, mut sink) = make_app();
    let mut sensor = MockSensor::constant(30.0);
    app.tick(&mut sensor, &mut sink);
    clock.set(60);

    // 20% is now below the last reading; override skips minimum run.
    app.handle_command(AppCommand::SetHumidity(20), &mut sink);

    assert!(!app.status().running);
    assert_eq!(app.status().desired_humidity, 20);
    assert_eq!(relay.writes(), vec![false, true, false]);
    assert_eq!(app.humidistat().last_activity(), clock.now_secs());
}

#[test]
fn setpoint_change_before_first_sample_waits_for_reading() {
    let (mut app, relay, _clock, mut sink) = make_app();

    app.handle_command(AppCommand::SetHumidity(80), &mut sink);

    assert_eq!(app.status().desired_humidity, 80);
    assert_eq!(relay.writes(), vec![false]);
}

#[test]
fn manual_modes_switch_without_a_sample() {
    let (mut app, relay, clock, mut sink) = make_app();

    app.handle_command(AppCommand::SetMode(Mode::On), &mut sink);
    assert!(app.status().running);

    clock.set(10);
    app.handle_command(AppCommand::SetMode(Mode::Off), &mut sink);
    assert!(!app.status().running);

    assert_eq!(relay.writes(), vec![false, true, false]);
    assert_eq!(sink.state_changes(), vec![true, false]);
}

#[test]
fn mode_on_ignores_humidity() {
    let (mut app, relay, clock, mut sink) = make_app();
    let mut sensor = MockSensor::constant(90.0);

    app.handle_command(AppCommand::SetMode(Mode::On), &mut sink);
    for t in [60, 120, 20_000] {
        clock.set(t);
        assert_eq!(app.tick(&mut sensor, &mut sink), Some(true));
    }
    assert_eq!(relay.writes(), vec![false, true]);
}

#[test]
fn sensor_fault_skips_evaluation() {
    let (mut app, relay, _clock, mut sink) = make_app();
    let mut sensor = MockSensor::constant(30.0);
    sensor.push_fault(SensorError::AdcReadFailed);

    assert_eq!(app.tick(&mut sensor, &mut sink), None);
    assert!(sink.events.contains(&AppEvent::SensorFault(SensorError::AdcReadFailed)));
    assert_eq!(relay.writes(), vec![false]);
    assert_eq!(app.status().humidity_percent, None);

    // The next read recovers.
    assert_eq!(app.tick(&mut sensor, &mut sink), Some(true));
}

#[test]
fn disable_is_ignored_unless_configured() {
    let (mut app, _relay, _clock, mut sink) = make_app();
    let mut sensor = MockSensor::constant(30.0);

    app.handle_command(AppCommand::Disable, &mut sink);
    assert!(!app.humidistat().is_enabled());
    assert_eq!(app.tick(&mut sensor, &mut sink), Some(true));
}

#[test]
fn disable_forces_relay_off_when_respected() {
    let mut config = SystemConfig::default();
    config.humidistat.respect_enabled_flag = true;
    let relay = MockRelay::new();
    let clock = ManualClock::new(0);
    let mut sink = RecordingSink::new();
    let mut app = AppService::new(config, relay.clone(), clock.clone());
    app.start(&mut sink);

    let mut sensor = MockSensor::constant(30.0);
    assert_eq!(app.tick(&mut sensor, &mut sink), Some(true));

    app.handle_command(AppCommand::Disable, &mut sink);
    clock.set(60);
    assert_eq!(app.tick(&mut sensor, &mut sink), Some(false));

    app.handle_command(AppCommand::Enable, &mut sink);
    clock.set(2000);
    assert_eq!(app.tick(&mut sensor, &mut sink), Some(true));
    assert_eq!(relay.writes(), vec![false, true, false, true]);
}

#[test]
fn evaluation_cadence_follows_interval() {
    let (mut app, _relay, clock, mut sink) = make_app();
    let mut sensor = MockSensor::constant(50.0);

    assert!(app.evaluation_due(), "first evaluation is always due");
    app.tick(&mut sensor, &mut sink);
    assert!(!app.evaluation_due());

    clock.set(59);
    assert!(!app.evaluation_due());
    clock.set(60);
    assert!(app.evaluation_due());
}

#[test]
fn telemetry_follows_interval_and_transitions() {
    let (mut app, _relay, clock, mut sink) = make_app();
    let mut sensor = MockSensor::constant(50.0);

    assert!(app.telemetry_due());
    app.tick(&mut sensor, &mut sink);
    app.report_telemetry(Some(-61), &mut sink);
    assert!(!app.telemetry_due());

    clock.set(299);
    assert!(!app.telemetry_due());
    clock.set(300);
    assert!(app.telemetry_due());
    app.report_telemetry(None, &mut sink);

    // A relay transition forces an early report.
    sensor.set(30.0);
    clock.set(310);
    app.tick(&mut sensor, &mut sink);
    assert!(app.telemetry_due());

    assert_eq!(sink.telemetry_count(), 2);
}

#[test]
fn telemetry_payload_reflects_last_sample() {
    let (mut app, _relay, _clock, mut sink) = make_app();
    let mut sensor = MockSensor::constant(38.0);
    app.tick(&mut sensor, &mut sink);

    let t = app.build_telemetry(Some(-61));
    assert!(t.running);
    assert_eq!(t.to_json(), r#"{"s":"-61","t":"21.0","h":"38.0","r":"1"}"#);
}

#[test]
fn status_message_tracks_activity() {
    let (mut app, _relay, clock, mut sink) = make_app();
    let mut sensor = MockSensor::constant(50.0);

    clock.set(30);
    app.tick(&mut sensor, &mut sink);
    assert_eq!(app.status().message.as_str(), "No events for 30 seconds");

    sensor.set(30.0);
    app.tick(&mut sensor, &mut sink);
    clock.set(30 + 121);
    assert_eq!(app.status().message.as_str(), "Running for 2 minutes");
    assert_eq!(app.status().relay_label(), "ON");
}

#[test]
fn first_evaluation_follows_sensor_warmup() {
    use humidistat::adapters::hardware::HygrometerAdapter;
    use humidistat::pins;
    use humidistat::sensors::humidity::HumiditySensor;

    let (mut app, _relay, clock, mut sink) = make_app();
    let mut hygro =
        HygrometerAdapter::new(HumiditySensor::new(pins::HUMIDITY_ADC_GPIO), clock.clone(), 20);

    // The control loop polls every pass until the probe has settled.
    for t in [0, 5, 10, 19] {
        clock.set(t);
        assert!(app.evaluation_due());
        assert_eq!(app.tick(&mut hygro, &mut sink), None);
    }
    clock.set(20);
    assert!(app.evaluation_due());
    assert!(app.tick(&mut hygro, &mut sink).is_some());
    assert!(!app.evaluation_due());
    assert!(!sink.events.iter().any(|e| matches!(e, AppEvent::SensorFault(_))));
}
