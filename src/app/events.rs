//! Outbound application events.
//!
//! The [`Monitor`](super::service::Monitor) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them; on the board they go to the serial log.

use heapless::String;

use super::commands::Command;
use crate::clock::registers::FORMATTED_LEN;
use crate::error::{Error, SensorError};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Startup finished; carries the clock reading at that moment.
    Started { timestamp: String<FORMATTED_LEN> },

    /// An operator command was applied.
    CommandHandled(Command),

    /// A pH sample failed; `errors` is the running failure count.
    SampleFailed { error: SensorError, errors: u32 },

    /// The seconds register did not move within the poll budget.
    SecondMissed { polls: u32 },

    /// A clock transfer failed; the cycle was abandoned.
    ClockFault(Error),

    /// One completed sample-and-display cycle.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    pub cycle: u64,
    pub timestamp: String<FORMATTED_LEN>,
    pub avg_temperature: f64,
    pub avg_ph: f64,
    pub ph_errors: u32,
}
