//! Fuzz target: console command stream
//!
//! Pushes arbitrary operator input through the parser and dispatcher
//! against a simulated DS1307 and asserts that nothing panics, that no
//! write ever lands outside the chip's 64 registers, and that the time
//! block still renders to a fixed-width string.
//!
//! cargo fuzz run fuzz_console

#![no_main]

use aqmonitor::adapters::sim::{SimConsole, SimRtc};
use aqmonitor::app::commands::Command;
use aqmonitor::app::dispatcher::dispatch;
use aqmonitor::clock::Clock;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut clock = Clock::new(SimRtc::with_registers([0x00, 0x00, 0x12, 1, 1, 1, 0x24, 0]));
    let mut console = SimConsole::new();
    console.push_input(data);

    // Every command consumes at least its opcode, so this terminates.
    while let Some(cmd) = Command::read_from(&mut console) {
        dispatch(cmd, &mut clock, &mut console).expect("simulated bus never fails");
    }

    assert!(clock.source().write_log().iter().all(|(addr, _)| *addr <= 0x3F));
    let len = clock.render_formatted().len();
    assert!(len == 17 || len == 18, "rendered {len} bytes");
});
