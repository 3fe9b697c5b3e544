//! Mock display and event sink for integration tests.
//!
//! Records every display update and every emitted event so tests can
//! assert on the full history. Clock, probes and console come from
//! `aqmonitor::adapters::sim`.

use aqmonitor::adapters::sim::{SimAnalog, SimPhStamp, SimRtc};
use aqmonitor::app::events::AppEvent;
use aqmonitor::app::ports::{DisplaySink, EventSink};
use aqmonitor::app::service::Monitor;
use aqmonitor::clock::Clock;
use aqmonitor::config::MonitorConfig;
use aqmonitor::sensors::SensorHub;

// ── Display call record ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    Init,
    Time { h: u8, m: u8, s: u8, is_12: bool, pm: bool },
    Date { month: u8, date: u8, year: u8 },
    Temperature(f64),
    Ph(f64),
}

// ── RecordingDisplay ──────────────────────────────────────────

#[derive(Default)]
pub struct RecordingDisplay {
    pub calls: Vec<DisplayCall>,
}

#[allow(dead_code)]
impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_time(&self) -> Option<&DisplayCall> {
        self.calls
            .iter()
            .rev()
            .find(|c| matches!(c, DisplayCall::Time { .. }))
    }
}

impl DisplaySink for RecordingDisplay {
    fn initialize(&mut self) {
        self.calls.push(DisplayCall::Init);
    }

    fn update_time(&mut self, h: u8, m: u8, s: u8, is_12: bool, pm: bool) {
        self.calls.push(DisplayCall::Time { h, m, s, is_12, pm });
    }

    fn update_date(&mut self, month: u8, date: u8, year: u8) {
        self.calls.push(DisplayCall::Date { month, date, year });
    }

    fn update_temperature(&mut self, value: f64) {
        self.calls.push(DisplayCall::Temperature(value));
    }

    fn update_ph(&mut self, value: f64) {
        self.calls.push(DisplayCall::Ph(value));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Fixtures ──────────────────────────────────────────────────

pub type SimMonitor = Monitor<SimRtc, SimPhStamp, SimAnalog>;

/// Monitor over simulated devices. The RTC ticks every other read and the
/// temperature probe reads a constant 241 counts (about 78.14 F).
#[allow(dead_code)]
pub fn sim_monitor(regs: [u8; 8]) -> SimMonitor {
    let config = MonitorConfig {
        max_second_polls: 10,
        ..MonitorConfig::default()
    };
    let rtc = SimRtc::with_registers(regs).ticking_every(2);
    let sensors = SensorHub::new(SimPhStamp::new(), SimAnalog::constant(241), &config);
    Monitor::new(Clock::new(rtc), sensors, &config)
}
