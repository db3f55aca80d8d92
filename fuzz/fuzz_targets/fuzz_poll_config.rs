//! Fuzz target: `PollConfig::from_json`
//!
//! Arbitrary bytes must either be rejected with an error or yield a config
//! that passes validation and builds a timer with a non-zero period.
//!
//! cargo fuzz run fuzz_poll_config

#![no_main]

use libfuzzer_sys::fuzz_target;
use pollwatch::PollConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = PollConfig::from_json(data) {
        assert!(config.validate().is_ok());
        assert!(config.timer("tick").period_ms().is_some_and(|p| p >= 1));
    }
});
