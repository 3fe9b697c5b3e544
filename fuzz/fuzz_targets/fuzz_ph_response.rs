//! Fuzz target: pH stamp response parsing
//!
//! Feeds arbitrary bytes back as the stamp's answer and asserts that only
//! a short answer fails (counted, window untouched) and that anything
//! longer records a finite value.
//!
//! cargo fuzz run fuzz_ph_response

#![no_main]

use aqmonitor::adapters::sim::{SimDelay, SimPhStamp};
use aqmonitor::config::MonitorConfig;
use aqmonitor::sensors::ph::PhProbe;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut probe = PhProbe::new(SimPhStamp::new(), &MonitorConfig::default());
    probe.link_mut().queue_reply(data);
    let before = probe.average_value();

    match probe.sample(25.0, &mut SimDelay::new()) {
        Ok(reading) => {
            assert!(data.len() >= 4);
            assert!(reading.ph.is_finite());
        }
        Err(_) => {
            assert!(data.len() < 4);
            assert_eq!(probe.errors(), 1);
            assert_eq!(probe.average_value().to_bits(), before.to_bits());
        }
    }
    assert!(probe.last_response().len() <= 15);
});
