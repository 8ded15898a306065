//! Fuzz target: `parse_http_request`
//!
//! cargo fuzz run fuzz_http_request

#![no_main]

use humidistat::app::commands::{AppCommand, parse_http_request};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let request = String::from_utf8_lossy(data);
    let cmds = parse_http_request(&request);

    assert!(cmds.len() <= 2);
    if let Some(AppCommand::SetHumidity(v)) = cmds.last() {
        assert!(*v >= 0, "setpoint is parsed from digits only");
    }
});
