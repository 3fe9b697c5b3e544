//! DS1307 real-time clock over I2C.
//!
//! The chip auto-increments its register pointer, so a burst read of the
//! time block is one write-read transaction starting at 0x00. Registers
//! 0x08..=0x3F are battery-backed RAM and are reached through the same
//! single-register path.

use embedded_hal::i2c::I2c;
use log::warn;

use crate::app::ports::TimeSource;
use crate::clock::registers::{HALT_BIT, REG_SECONDS, REGISTER_COUNT};
use crate::error::ClockError;

/// Fixed 7-bit bus address.
pub const DS1307_ADDRESS: u8 = 0x68;

pub struct Ds1307<I> {
    i2c: I,
}

impl<I: I2c> Ds1307<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Give the bus back.
    pub fn release(self) -> I {
        self.i2c
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), ClockError> {
        self.i2c.write(DS1307_ADDRESS, bytes).map_err(bus_error)
    }
}

impl<I: I2c> TimeSource for Ds1307<I> {
    fn read_all(&mut self) -> Result<[u8; REGISTER_COUNT], ClockError> {
        let mut regs = [0u8; REGISTER_COUNT];
        self.i2c
            .write_read(DS1307_ADDRESS, &[REG_SECONDS as u8], &mut regs)
            .map_err(bus_error)?;
        Ok(regs)
    }

    /// Halt, write minutes..control, then seconds (which also releases the halt).
    fn write_all(&mut self, regs: &[u8; REGISTER_COUNT]) -> Result<(), ClockError> {
        self.write(&[REG_SECONDS as u8, regs[REG_SECONDS] | HALT_BIT])?;

        let mut frame = [0u8; REGISTER_COUNT];
        frame[0] = 1;
        frame[1..].copy_from_slice(&regs[1..]);
        self.write(&frame)?;

        self.write(&[REG_SECONDS as u8, regs[REG_SECONDS]])
    }

    fn read_register(&mut self, addr: u8) -> Result<u8, ClockError> {
        let mut value = [0u8; 1];
        self.i2c
            .write_read(DS1307_ADDRESS, &[addr], &mut value)
            .map_err(bus_error)?;
        Ok(value[0])
    }

    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), ClockError> {
        self.write(&[addr, value])
    }
}

fn bus_error<E: embedded_hal::i2c::Error>(e: E) -> ClockError {
    warn!("DS1307: I2C error {:?}", e.kind());
    ClockError::Bus
}
