//! End-to-end command path: request text → parser → COMMAND_CHANNEL →
//! control loop → published status.
//!
//! The channel and status cell are process-wide statics, so everything
//! touching them lives in a single test.

use humidistat::adapters::time::ManualClock;
use humidistat::app::channel;
use humidistat::app::commands::{parse_http_request, parse_remote};
use humidistat::app::service::AppService;
use humidistat::config::SystemConfig;
use humidistat::control::Mode;

use crate::mock_hw::{MockRelay, MockSensor, RecordingSink};

#[test]
fn commands_flow_from_handlers_to_control_loop() {
    let relay = MockRelay::new();
    let clock = ManualClock::new(0);
    let mut sink = RecordingSink::new();
    let mut app = AppService::new(SystemConfig::default(), relay.clone(), clock.clone());
    app.start(&mut sink);
    let mut sensor = MockSensor::constant(45.0);

    assert_eq!(app.drain_commands(&mut sink), 0);
    app.tick(&mut sensor, &mut sink);
    app.publish_status();
    let status = channel::latest_status().unwrap();
    assert_eq!(status.relay_label(), "OFF");
    assert_eq!(status.humidity_percent, Some(45.0));

    // Control page: raise the setpoint above the current reading.
    let req = "POST / HTTP/1.1\r\nHost: humidistat\r\n\r\nset_humidity=55";
    assert_eq!(channel::submit_all(&parse_http_request(req)), 1);
    clock.set(5);
    assert_eq!(app.drain_commands(&mut sink), 1);
    app.publish_status();

    let status = channel::latest_status().unwrap();
    assert_eq!(status.desired_humidity, 55);
    assert!(status.running, "override starts the relay at once");
    assert_eq!(status.message.as_str(), "Running for 0 seconds");

    // Remote message: manual off.
    let cmds = parse_remote(br#"{"mode":"off","humidity":35}"#).unwrap();
    assert_eq!(channel::submit_all(&cmds), 2);
    clock.set(65);
    assert_eq!(app.drain_commands(&mut sink), 2);
    app.publish_status();

    let status = channel::latest_status().unwrap();
    assert_eq!(status.mode, Mode::Off);
    assert_eq!(status.desired_humidity, 35);
    assert!(!status.running);
    assert_eq!(relay.writes(), vec![false, true, false]);

    // A full queue drops the overflow instead of blocking the handler.
    let burst = parse_http_request("GET /?gpioSwitch=auto HTTP/1.1\r\n\r\n");
    let accepted = (0..10).filter(|_| channel::submit_all(&burst) == 1).count();
    assert_eq!(accepted, 8);
    assert_eq!(app.drain_commands(&mut sink), 8);
    assert_eq!(app.status().mode, Mode::Auto);
}
