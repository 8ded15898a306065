//! Fuzz target: `SystemConfig::from_json`
//!
//! A config that loads must also survive validation without panicking,
//! and its topics must fit their fixed buffers.
//!
//! cargo fuzz run fuzz_config

#![no_main]

use humidistat::config::SystemConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = SystemConfig::from_json(data) {
        let _ = config.validate();
        let _ = config.network.command_topic();
        let _ = config.network.metrics_topic();
    }
});
