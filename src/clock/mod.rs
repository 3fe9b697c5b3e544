//! Register-backed real-time clock.
//!
//! [`Clock`] pairs a [`TimeSource`] with a shadow copy of its registers
//! ([`ClockRegisters`]). Reads refresh the shadow in one burst; setters
//! mutate only the shadow until [`Clock::write_all`] persists it. The
//! oscillator and square-wave controls write their single register through
//! immediately.

pub mod bcd;
pub mod registers;

use heapless::String;
use log::{debug, info, warn};

use crate::app::ports::{MAX_REGISTER_ADDR, TimeSource};
use crate::error::Result;
use registers::{ClockRegisters, FORMATTED_LEN, REG_CONTROL, REG_SECONDS, REGISTER_COUNT, SqwRate};

/// Returned by [`Clock::read_register`] for an address outside the chip.
pub const REGISTER_SENTINEL: u8 = 0xFF;

pub struct Clock<T> {
    source: T,
    regs: ClockRegisters,
}

impl<T: TimeSource> Clock<T> {
    /// Wrap `source`. The shadow starts zeroed until the first [`read_all`](Self::read_all).
    pub fn new(source: T) -> Self {
        Self {
            source,
            regs: ClockRegisters::default(),
        }
    }

    /// Load the registers and restart the oscillator if the chip powered up halted.
    pub fn initialize(&mut self) -> Result<()> {
        self.read_all()?;
        if self.regs.is_halted() {
            info!("RTC: oscillator halted at power-up, starting");
            self.start()?;
        }
        info!("RTC: {}", self.render_formatted());
        Ok(())
    }

    // ── Bulk transfer ─────────────────────────────────────────

    pub fn read_all(&mut self) -> Result<()> {
        let raw = self.source.read_all()?;
        self.regs = ClockRegisters::from_raw(raw);
        Ok(())
    }

    /// Persist every register; the time source writes seconds last.
    pub fn write_all(&mut self) -> Result<()> {
        self.source.write_all(&self.regs.raw())?;
        debug!("RTC: persisted {}", self.regs.render());
        Ok(())
    }

    // ── Shadow access ─────────────────────────────────────────

    pub fn registers(&self) -> &ClockRegisters {
        &self.regs
    }

    /// Mutable shadow. Changes reach the chip on the next [`write_all`](Self::write_all).
    pub fn registers_mut(&mut self) -> &mut ClockRegisters {
        &mut self.regs
    }

    pub fn render_formatted(&self) -> String<FORMATTED_LEN> {
        self.regs.render()
    }

    // ── Write-through controls ────────────────────────────────

    pub fn start(&mut self) -> Result<()> {
        self.regs.set_halted(false);
        self.write_shadow(REG_SECONDS)
    }

    pub fn stop(&mut self) -> Result<()> {
        self.regs.set_halted(true);
        self.write_shadow(REG_SECONDS)
    }

    pub fn sqw_enable(&mut self, rate: SqwRate) -> Result<()> {
        self.regs.sqw_enable(rate);
        self.write_shadow(REG_CONTROL)
    }

    pub fn sqw_disable(&mut self, idle_high: bool) -> Result<()> {
        self.regs.sqw_disable(idle_high);
        self.write_shadow(REG_CONTROL)
    }

    // ── Raw register access ───────────────────────────────────

    /// Read any chip register. Addresses above `0x3F` return
    /// [`REGISTER_SENTINEL`] without touching the bus.
    pub fn read_register(&mut self, addr: u16) -> Result<u8> {
        let Some(addr) = checked_addr(addr) else {
            warn!("RTC: refused read of register {}", addr);
            return Ok(REGISTER_SENTINEL);
        };
        Ok(self.source.read_register(addr)?)
    }

    /// Write any chip register. Returns `false` (and writes nothing) for
    /// addresses above `0x3F`. Writes into the time-keeping block also
    /// update the shadow so a later `write_all` does not undo them.
    pub fn write_register(&mut self, addr: u16, value: u8) -> Result<bool> {
        let Some(addr) = checked_addr(addr) else {
            warn!("RTC: refused write of register {}", addr);
            return Ok(false);
        };
        self.source.write_register(addr, value)?;
        if usize::from(addr) < REGISTER_COUNT {
            let mut raw = self.regs.raw();
            raw[usize::from(addr)] = value;
            self.regs = ClockRegisters::from_raw(raw);
        }
        Ok(true)
    }

    pub fn source(&self) -> &T {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut T {
        &mut self.source
    }

    fn write_shadow(&mut self, index: usize) -> Result<()> {
        let value = self.regs.raw()[index];
        self.source.write_register(index as u8, value)?;
        Ok(())
    }
}

fn checked_addr(addr: u16) -> Option<u8> {
    u8::try_from(addr).ok().filter(|a| *a <= MAX_REGISTER_ADDR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sim::SimRtc;
    use crate::error::{ClockError, Error};

    fn clock_at(raw: [u8; REGISTER_COUNT]) -> Clock<SimRtc> {
        let mut clock = Clock::new(SimRtc::with_registers(raw));
        clock.read_all().unwrap();
        clock
    }

    #[test]
    fn initialize_starts_halted_oscillator() {
        let mut clock = Clock::new(SimRtc::with_registers([0x80 | 0x12, 0, 0, 1, 1, 1, 0, 0]));
        clock.initialize().unwrap();
        assert!(!clock.registers().is_halted());
        assert_eq!(clock.registers().seconds(), 12);
        assert_eq!(clock.source().register(0), 0x12);
    }

    #[test]
    fn stop_and_start_keep_seconds() {
        let mut clock = clock_at([0x37, 0, 0, 1, 1, 1, 0, 0]);
        clock.stop().unwrap();
        assert_eq!(clock.source().register(0), 0x80 | 0x37);
        clock.start().unwrap();
        assert_eq!(clock.source().register(0), 0x37);
    }

    #[test]
    fn setters_reach_chip_only_on_write_all() {
        let mut clock = clock_at([0x00, 0x00, 0x08, 1, 1, 1, 0, 0]);
        clock.registers_mut().set_minutes(45);
        assert_eq!(clock.source().register(1), 0x00);
        clock.write_all().unwrap();
        assert_eq!(clock.source().register(1), 0x45);
    }

    #[test]
    fn sqw_writes_control_through() {
        let mut clock = clock_at([0, 0, 0, 1, 1, 1, 0, 0x0C]);
        clock.sqw_enable(SqwRate::Hz1).unwrap();
        assert_eq!(clock.source().register(7), 0x1C);
        clock.sqw_disable(false).unwrap();
        assert_eq!(clock.source().register(7), 0x0C);
    }

    #[test]
    fn out_of_range_register_access_is_refused() {
        let mut clock = clock_at([0; REGISTER_COUNT]);
        assert_eq!(clock.read_register(0x40).unwrap(), REGISTER_SENTINEL);
        assert_eq!(clock.read_register(300).unwrap(), REGISTER_SENTINEL);
        assert!(!clock.write_register(0x40, 1).unwrap());
        assert_eq!(clock.source().writes(), 0);
    }

    #[test]
    fn raw_write_to_ram_and_time_block() {
        let mut clock = clock_at([0; REGISTER_COUNT]);
        assert!(clock.write_register(0x3F, 0xAB).unwrap());
        assert_eq!(clock.read_register(0x3F).unwrap(), 0xAB);

        assert!(clock.write_register(6, 0x25).unwrap());
        assert_eq!(clock.registers().year(), 25);
    }

    #[test]
    fn bus_failure_propagates() {
        let mut rtc = SimRtc::with_registers([0; REGISTER_COUNT]);
        rtc.fail_next();
        let mut clock = Clock::new(rtc);
        assert_eq!(clock.read_all(), Err(Error::Clock(ClockError::Bus)));
    }
}
