//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Clock / probes / Monitor (domain)
//! ```
//!
//! Driven adapters (clock chip, probe UART, ADC, LCD, console) implement
//! these traits. The domain consumes them via generics, so nothing in
//! `clock`, `sensors` or `app` touches a peripheral directly. Blocking waits
//! go through [`embedded_hal::delay::DelayNs`] rather than a port of our own.

use crate::clock::registers::REGISTER_COUNT;
use crate::error::ClockError;

// ───────────────────────────────────────────────────────────────
// Time source (driven adapter: clock chip ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Highest register address the clock chip exposes (time registers + RAM).
pub const MAX_REGISTER_ADDR: u8 = 0x3F;

/// Battery-backed clock chip holding the eight time-keeping registers.
pub trait TimeSource {
    /// Read registers `0x00..=0x07` in one burst.
    ///
    /// A snapshot, not an atomic latch: if the chip rolls over mid-burst the
    /// fields can disagree by one tick.
    fn read_all(&mut self) -> Result<[u8; REGISTER_COUNT], ClockError>;

    /// Write all eight registers.
    ///
    /// Implementations MUST write the seconds register last, so the
    /// oscillator restarts with the complete new time already in place.
    fn write_all(&mut self, regs: &[u8; REGISTER_COUNT]) -> Result<(), ClockError>;

    /// Read one register. `addr` has already been range-checked by the caller.
    fn read_register(&mut self, addr: u8) -> Result<u8, ClockError>;

    /// Write one register. `addr` has already been range-checked by the caller.
    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), ClockError>;
}

// ───────────────────────────────────────────────────────────────
// Byte streams (pH probe link, operator console)
// ───────────────────────────────────────────────────────────────

/// Receive side of a buffered serial link. Never blocks.
pub trait ByteSource {
    /// Bytes already received and waiting to be read.
    fn bytes_available(&self) -> usize;

    /// Next buffered byte, or `None` if the receive buffer is empty.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Transmit side of a serial link.
pub trait ByteSink {
    fn write(&mut self, bytes: &[u8]);
}

/// UART to the pH stamp.
pub trait SensorLink: ByteSource + ByteSink {}

impl<T: ByteSource + ByteSink> SensorLink for T {}

/// Operator console: opcodes in, human-readable lines out.
pub trait Console: ByteSource + ByteSink {
    fn write_line(&mut self, line: &str) {
        self.write(line.as_bytes());
        self.write(b"\r\n");
    }
}

impl<T: ByteSource + ByteSink> Console for T {}

// ───────────────────────────────────────────────────────────────
// Analog input (driven adapter: ADC → domain)
// ───────────────────────────────────────────────────────────────

/// Largest raw count the 10-bit converter returns.
pub const ANALOG_MAX_COUNT: u16 = 1023;

pub trait AnalogInput {
    /// One conversion on `pin`, `0..=ANALOG_MAX_COUNT`.
    fn read(&mut self, pin: u8) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Display sink (driven adapter: domain → LCD)
// ───────────────────────────────────────────────────────────────

/// Pure output; nothing flows back into the domain.
pub trait DisplaySink {
    /// Bring the panel up and draw static labels. Called once at startup.
    fn initialize(&mut self) {}
    fn update_time(&mut self, hours: u8, minutes: u8, seconds: u8, is_12_hour: bool, is_pm: bool);
    fn update_date(&mut self, month: u8, date: u8, year: u8);
    fn update_temperature(&mut self, value: f64);
    fn update_ph(&mut self, value: f64);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
