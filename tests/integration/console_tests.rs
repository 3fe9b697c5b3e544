//! Integration tests for the serial console: typed bytes → clock chip.
//!
//! Each test pushes raw operator input into the simulated console, lets
//! the monitor parse and dispatch it, and checks both the chip registers
//! and the text written back.

use super::mock_hw::{SimMonitor, sim_monitor};

use aqmonitor::adapters::sim::SimConsole;
use aqmonitor::app::commands::Command;

const MIDNIGHT: [u8; 8] = [0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x00, 0x00];

fn loaded(regs: [u8; 8]) -> SimMonitor {
    let mut m = sim_monitor(regs);
    m.clock_mut().read_all().unwrap();
    m
}

/// Dispatch everything buffered; returns the commands in order.
fn drain(m: &mut SimMonitor, console: &mut SimConsole) -> Vec<Command> {
    let mut handled = Vec::new();
    while let Some(cmd) = m.poll_console(console).unwrap() {
        handled.push(cmd);
    }
    handled
}

#[test]
fn full_time_set_in_one_burst() {
    let mut m = loaded(MIDNIGHT);
    let mut console = SimConsole::new();
    console.push_input(b"h10\ri30\rs5\rd15\rm6\ry25\rw1\r");

    assert_eq!(drain(&mut m, &mut console).len(), 7);
    let rtc = m.clock().source();
    let chip: Vec<u8> = (0..8).map(|a| rtc.register(a)).collect();
    assert_eq!(chip, vec![0x05, 0x30, 0x10, 0x01, 0x15, 0x06, 0x25, 0x00]);
    assert_eq!(m.clock().render_formatted().as_str(), "06-15-25 10:30:05");
    assert!(console.output().starts_with("Setting hours to: 10\r\nSetting minutes to: 30\r\n"));
}

#[test]
fn truncated_operands() {
    let mut m = loaded([0x00, 0x00, 0x15, 0x01, 0x01, 0x01, 0x00, 0x00]);
    let mut console = SimConsole::new();

    console.push_input(b"H7x");
    assert_eq!(drain(&mut m, &mut console), vec![Command::SetHours(7)]);
    assert_eq!(m.clock().registers().hours(), 7);

    console.push_input(b"H");
    assert_eq!(drain(&mut m, &mut console), vec![Command::SetHours(0)]);
    assert_eq!(m.clock().registers().hours(), 0);
}

#[test]
fn out_of_range_setters_leave_chip_alone() {
    let mut m = loaded(MIDNIGHT);
    let mut console = SimConsole::new();
    console.push_input(b"s60\rm0\rd32\rw8\ry100\rh24\r");
    drain(&mut m, &mut console);

    let rtc = m.clock().source();
    let chip: Vec<u8> = (0..8).map(|a| rtc.register(a)).collect();
    assert_eq!(chip, MIDNIGHT.to_vec());
    assert!(console.output().contains("Setting seconds to: 60"));
}

#[test]
fn meridiem_round_trip_through_twelve_hour_mode() {
    let mut m = loaded([0x00, 0x00, 0x21, 0x01, 0x01, 0x01, 0x00, 0x00]);
    let mut console = SimConsole::new();

    console.push_input(b"a");
    drain(&mut m, &mut console);
    assert_eq!(console.output(), "(Set hours only in 24-hour mode.)\r\n");

    console.push_input(b"tat");
    drain(&mut m, &mut console);
    // 21:00 -> 9 PM -> 9 AM -> 09:00
    assert_eq!(m.clock().source().register(2), 0x09);
    assert!(console.output().ends_with(
        "Switching to 12-hour clock.\r\nSet AM.\r\nSwitching to 24-hour clock.\r\n"
    ));
}

#[test]
fn raw_register_commands() {
    let mut m = loaded(MIDNIGHT);
    let mut console = SimConsole::new();
    console.push_input(b">8,300\r<8\r<64\r>64,1\r");
    drain(&mut m, &mut console);

    assert_eq!(m.clock().source().register(8), 44);
    assert_eq!(
        console.output(),
        "Write to register 8 the value 44\r\n\
         Read from register 8 the value 44\r\n\
         Read from register 64 the value 255\r\n\
         Register 64 is out of range\r\n"
    );
}

#[test]
fn square_wave_toggle_preserves_other_control_bits() {
    let mut m = loaded([0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x00, 0x80]);
    let mut console = SimConsole::new();

    console.push_input(b"q");
    drain(&mut m, &mut console);
    assert_eq!(m.clock().source().register(7), 0x90);

    console.push_input(b"Q");
    drain(&mut m, &mut console);
    assert_eq!(m.clock().source().register(7), 0x00);
}

#[test]
fn unknown_opcode_changes_nothing() {
    let mut m = loaded(MIDNIGHT);
    let mut console = SimConsole::new();
    console.push_input(b"x");

    assert_eq!(drain(&mut m, &mut console), vec![Command::Unknown(b'x')]);
    assert_eq!(m.clock().source().writes(), 0);
    assert!(console.output().contains(" >##,### - write to register ## the value ###"));
}
