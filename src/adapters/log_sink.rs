//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (the ESP-IDF logger on the board, UART0).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] as one tagged line.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | #{} | {} | T={:.2}F | pH={:.2} | ph_errors={}",
                    t.cycle, t.timestamp, t.avg_temperature, t.avg_ph, t.ph_errors,
                );
            }
            AppEvent::CommandHandled(cmd) => {
                info!("CMD   | {:?}", cmd);
            }
            AppEvent::SampleFailed { error, errors } => {
                warn!("PH    | {} (total {})", error, errors);
            }
            AppEvent::SecondMissed { polls } => {
                warn!("CLOCK | seconds unchanged after {} reads", polls);
            }
            AppEvent::ClockFault(e) => {
                warn!("CLOCK | {}", e);
            }
            AppEvent::Started { timestamp } => {
                info!("START | clock={}", timestamp);
            }
        }
    }
}
