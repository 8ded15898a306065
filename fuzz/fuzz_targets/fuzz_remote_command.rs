//! Fuzz target: `parse_remote`
//!
//! Feeds arbitrary broker payloads to the remote-command decoder and
//! checks the command list stays bounded and ordered.
//!
//! cargo fuzz run fuzz_remote_command

#![no_main]

use humidistat::app::commands::{AppCommand, parse_remote};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(cmds) = parse_remote(data) else {
        return;
    };
    assert!(cmds.len() <= 3);

    // The enabled flag, when present, always comes first.
    for cmd in cmds.iter().skip(1) {
        assert!(!matches!(cmd, AppCommand::Enable | AppCommand::Disable));
    }
});
