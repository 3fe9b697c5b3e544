//! Integration tests for the Monitor loop: startup → wait → sample → display.
//!
//! Drives whole loop iterations against the simulated RTC, pH stamp, ADC and
//! console, and checks what reaches the display and the event sink.

use super::mock_hw::{DisplayCall, RecordingDisplay, RecordingSink, sim_monitor};

use aqmonitor::adapters::sim::{SimConsole, SimDelay};
use aqmonitor::app::commands::Command;
use aqmonitor::app::events::AppEvent;
use aqmonitor::error::{ClockError, Error, SensorError};
use aqmonitor::sensors::temperature::counts_to_degrees;

// 2024-12-09 09:59:58 PM, 12h mode, oscillator halted.
const HALTED_EVENING: [u8; 8] = [0x80 | 0x58, 0x59, 0x69, 0x02, 0x09, 0x12, 0x24, 0x00];
// 00:00:10, 24h mode, running.
const RUNNING: [u8; 8] = [0x10, 0x00, 0x00, 0x01, 0x01, 0x01, 0x00, 0x00];

fn lm34_at_241() -> f64 {
    counts_to_degrees(241, 3.32)
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn startup_restarts_halted_clock_and_draws_labels() {
    let mut m = sim_monitor(HALTED_EVENING);
    let (mut delay, mut display, mut sink) =
        (SimDelay::new(), RecordingDisplay::new(), RecordingSink::new());

    m.initialize(&mut delay, &mut display, &mut sink).unwrap();

    assert!(!m.clock().registers().is_halted());
    assert_eq!(m.clock().source().register(0), 0x58);
    assert_eq!(m.sensors().ph.link().sent(), b"l1\r");
    assert_eq!(delay.waits_ms(), vec![1_000]);
    assert_eq!(display.calls, vec![DisplayCall::Init]);
    assert!(matches!(
        sink.events.as_slice(),
        [AppEvent::Started { timestamp }] if timestamp.as_str() == "12-09-24 09:59:58P"
    ));
}

// ── One full cycle ────────────────────────────────────────────

#[test]
fn cycle_updates_display_in_order_and_emits_telemetry() {
    let mut m = sim_monitor(HALTED_EVENING);
    let (mut delay, mut display, mut sink) =
        (SimDelay::new(), RecordingDisplay::new(), RecordingSink::new());
    let mut console = SimConsole::new();
    m.initialize(&mut delay, &mut display, &mut sink).unwrap();
    display.calls.clear();
    sink.events.clear();

    m.sensors_mut().ph.link_mut().queue_reply(b"7.02\r");
    let snap = m
        .run_cycle(&mut console, &mut delay, &mut display, &mut sink)
        .expect("cycle should sample");

    assert_eq!(snap.ph_error, None);
    assert_eq!(
        display.calls,
        vec![
            DisplayCall::Ph(7.02),
            DisplayCall::Temperature(lm34_at_241()),
            DisplayCall::Time { h: 9, m: 59, s: 59, is_12: true, pm: true },
            DisplayCall::Date { month: 12, date: 9, year: 24 },
        ]
    );
    match sink.events.as_slice() {
        [AppEvent::Telemetry(t)] => {
            assert_eq!(t.cycle, 1);
            assert_eq!(t.timestamp.as_str(), "12-09-24 09:59:59P");
            assert_eq!(t.avg_ph, 7.02);
            assert_eq!(t.ph_errors, 0);
        }
        other => panic!("unexpected events: {other:?}"),
    }
    // pH compensation uses the two-decimal temperature average.
    assert_eq!(m.sensors().ph.link().sent(), b"l1\r78.14\rr\r");
}

#[test]
fn ph_failure_keeps_previous_average_on_display() {
    let mut m = sim_monitor(RUNNING);
    let (mut delay, mut display, mut sink) =
        (SimDelay::new(), RecordingDisplay::new(), RecordingSink::new());
    let mut console = SimConsole::new();

    m.sensors_mut().ph.link_mut().queue_reply(b"7.00\r");
    m.sensors_mut().ph.link_mut().queue_reply(b"7\r");
    m.sensors_mut().ph.link_mut().queue_reply(b"8.00\r");

    let first = m.run_cycle(&mut console, &mut delay, &mut display, &mut sink).unwrap();
    let second = m.run_cycle(&mut console, &mut delay, &mut display, &mut sink).unwrap();
    let third = m.run_cycle(&mut console, &mut delay, &mut display, &mut sink).unwrap();

    assert_eq!(first.avg_ph, 7.0);
    assert_eq!(second.avg_ph, 7.0);
    assert_eq!(second.ph_error, Some(SensorError::ShortResponse { available: 2 }));
    assert_eq!(third.avg_ph, 7.5);
    assert_eq!(third.ph_errors, 1);

    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::SampleFailed { errors: 1, .. })),
        1
    );
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Telemetry(_))), 3);
    let ph_shown: Vec<f64> = display
        .calls
        .iter()
        .filter_map(|c| match c {
            DisplayCall::Ph(v) => Some(*v),
            _ => None,
        })
        .collect();
    assert_eq!(ph_shown, vec![7.0, 7.0, 7.5]);
}

// ── Oscillator control from the console ──────────────────────

#[test]
fn stopped_oscillator_skips_cycles_until_restarted() {
    let mut m = sim_monitor(RUNNING);
    let (mut delay, mut display, mut sink) =
        (SimDelay::new(), RecordingDisplay::new(), RecordingSink::new());
    let mut console = SimConsole::new();
    m.initialize(&mut delay, &mut display, &mut sink).unwrap();

    assert!(m.run_cycle(&mut console, &mut delay, &mut display, &mut sink).is_some());

    console.push_input(b"Z");
    assert!(m.run_cycle(&mut console, &mut delay, &mut display, &mut sink).is_none());
    assert!(console.output().contains("Clock oscillator stopped."));
    assert!(sink.events.contains(&AppEvent::CommandHandled(Command::StopOscillator)));
    assert!(sink.events.contains(&AppEvent::SecondMissed { polls: 10 }));

    console.push_input(b"z");
    assert!(m.run_cycle(&mut console, &mut delay, &mut display, &mut sink).is_some());
    assert!(!m.clock().registers().is_halted());
    assert_eq!(m.cycles(), 3);
    assert_eq!(m.sensors().ph.requests(), 2);
}

#[test]
fn bus_failure_abandons_cycle_but_not_loop() {
    let mut m = sim_monitor(RUNNING);
    let (mut delay, mut display, mut sink) =
        (SimDelay::new(), RecordingDisplay::new(), RecordingSink::new());
    let mut console = SimConsole::new();

    m.clock_mut().source_mut().fail_next();
    assert!(m.run_cycle(&mut console, &mut delay, &mut display, &mut sink).is_none());
    assert_eq!(
        sink.events,
        vec![AppEvent::ClockFault(Error::Clock(ClockError::Bus))]
    );
    assert!(display.calls.is_empty());

    assert!(m.run_cycle(&mut console, &mut delay, &mut display, &mut sink).is_some());
}

#[test]
fn display_follows_hour_mode_change() {
    let mut m = sim_monitor([0x00, 0x30, 0x21, 0x01, 0x01, 0x01, 0x00, 0x00]);
    let (mut delay, mut display, mut sink) =
        (SimDelay::new(), RecordingDisplay::new(), RecordingSink::new());
    let mut console = SimConsole::new();

    m.run_cycle(&mut console, &mut delay, &mut display, &mut sink);
    assert_eq!(
        display.last_time(),
        Some(&DisplayCall::Time { h: 21, m: 30, s: 0, is_12: false, pm: true })
    );

    console.push_input(b"t");
    m.run_cycle(&mut console, &mut delay, &mut display, &mut sink);
    assert_eq!(
        display.last_time(),
        Some(&DisplayCall::Time { h: 9, m: 30, s: 1, is_12: true, pm: true })
    );
}
