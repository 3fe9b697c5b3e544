//! Application service: the hexagonal core.
//!
//! [`Monitor`] owns the clock, both probes and the loop bookkeeping. It
//! exposes one call per loop iteration. All I/O flows through port traits
//! injected at call sites, so the whole loop runs against mock adapters.
//!
//! ```text
//!  Console ──▶ ┌────────────────────────┐ ──▶ DisplaySink
//!              │        Monitor          │
//! TimeSource ◀─│  Clock · SensorHub      │ ──▶ EventSink
//!              └────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use super::commands::Command;
use super::dispatcher::dispatch;
use super::events::{AppEvent, TelemetryData};
use super::ports::{AnalogInput, Console, DisplaySink, EventSink, SensorLink, TimeSource};
use crate::clock::Clock;
use crate::config::MonitorConfig;
use crate::error::Result;
use crate::sensors::{SensorHub, SensorSnapshot};

// ───────────────────────────────────────────────────────────────
// Monitor
// ───────────────────────────────────────────────────────────────

pub struct Monitor<T, L, A> {
    clock: Clock<T>,
    sensors: SensorHub<L, A>,
    max_second_polls: u32,
    last_seconds: Option<u8>,
    cycles: u64,
}

impl<T: TimeSource, L: SensorLink, A: AnalogInput> Monitor<T, L, A> {
    /// Assemble the monitor. Nothing touches hardware until
    /// [`initialize`](Self::initialize).
    pub fn new(clock: Clock<T>, sensors: SensorHub<L, A>, config: &MonitorConfig) -> Self {
        Self {
            clock,
            sensors,
            max_second_polls: config.max_second_polls,
            last_seconds: None,
            cycles: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Startup: probes, then the display, then the clock.
    pub fn initialize(
        &mut self,
        delay: &mut impl DelayNs,
        display: &mut impl DisplaySink,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        self.sensors.initialize(delay);
        display.initialize();
        self.clock.initialize()?;

        let timestamp = self.clock.render_formatted();
        info!("Monitor started at {}", timestamp);
        sink.emit(&AppEvent::Started { timestamp });
        Ok(())
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// One loop iteration: console, wait for the next second, sample,
    /// display, telemetry.
    ///
    /// Returns the snapshot if the iteration got as far as sampling. Clock
    /// failures are logged and reported as events; they never stop the loop.
    pub fn run_cycle(
        &mut self,
        console: &mut impl Console,
        delay: &mut impl DelayNs,
        display: &mut impl DisplaySink,
        sink: &mut impl EventSink,
    ) -> Option<SensorSnapshot> {
        self.cycles += 1;

        // 1. Operator command, if one is waiting
        match self.poll_console(console) {
            Ok(Some(cmd)) => sink.emit(&AppEvent::CommandHandled(cmd)),
            Ok(None) => {}
            Err(e) => {
                warn!("Command failed: {}", e);
                sink.emit(&AppEvent::ClockFault(e));
            }
        }

        // 2. Pace the loop on the clock chip
        match self.wait_for_next_second() {
            Ok(Some(_)) => {}
            Ok(None) => {
                sink.emit(&AppEvent::SecondMissed {
                    polls: self.max_second_polls,
                });
                return None;
            }
            Err(e) => {
                warn!("Clock read failed: {}", e);
                sink.emit(&AppEvent::ClockFault(e));
                return None;
            }
        }

        // 3. Sample
        let snapshot = self.sensors.sample_all(delay);
        if let Some(error) = snapshot.ph_error {
            sink.emit(&AppEvent::SampleFailed {
                error,
                errors: snapshot.ph_errors,
            });
        }

        // 4. Display and report
        self.update_display(display, &snapshot);
        sink.emit(&AppEvent::Telemetry(self.build_telemetry(&snapshot)));

        Some(snapshot)
    }

    /// Parse and apply at most one buffered console command.
    pub fn poll_console(&mut self, console: &mut impl Console) -> Result<Option<Command>> {
        let Some(cmd) = Command::read_from(console) else {
            return Ok(None);
        };
        dispatch(cmd, &mut self.clock, console)?;
        Ok(Some(cmd))
    }

    /// Re-read the clock until the seconds register changes.
    ///
    /// Gives up after `max_second_polls` reads and returns `None`, so a
    /// stopped oscillator cannot starve the console.
    pub fn wait_for_next_second(&mut self) -> Result<Option<u8>> {
        for _ in 0..self.max_second_polls {
            self.clock.read_all()?;
            let seconds = self.clock.registers().seconds();
            if self.last_seconds != Some(seconds) {
                self.last_seconds = Some(seconds);
                return Ok(Some(seconds));
            }
        }
        warn!(
            "Seconds register stuck after {} reads; skipping cycle",
            self.max_second_polls
        );
        Ok(None)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn build_telemetry(&self, snapshot: &SensorSnapshot) -> TelemetryData {
        TelemetryData {
            cycle: self.cycles,
            timestamp: self.clock.render_formatted(),
            avg_temperature: snapshot.avg_temperature,
            avg_ph: snapshot.avg_ph,
            ph_errors: snapshot.ph_errors,
        }
    }

    /// Loop iterations since startup, including skipped ones.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn clock(&self) -> &Clock<T> {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock<T> {
        &mut self.clock
    }

    pub fn sensors(&self) -> &SensorHub<L, A> {
        &self.sensors
    }

    pub fn sensors_mut(&mut self) -> &mut SensorHub<L, A> {
        &mut self.sensors
    }

    // ── Internal ──────────────────────────────────────────────

    fn update_display(&self, display: &mut impl DisplaySink, snapshot: &SensorSnapshot) {
        let regs = self.clock.registers();
        display.update_ph(snapshot.avg_ph);
        display.update_temperature(snapshot.avg_temperature);
        display.update_time(
            regs.hours(),
            regs.minutes(),
            regs.seconds(),
            regs.is_12_hour(),
            regs.is_pm(),
        );
        display.update_date(regs.month(), regs.date(), regs.year());
    }
}
