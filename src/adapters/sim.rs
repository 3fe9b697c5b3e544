//! Host simulation of the monitor's peripherals.
//!
//! Stand-ins for the DS1307, the pH stamp UART, the ADC, the operator
//! console and the blocking delay, so the whole control loop runs on the
//! host. Each device records what the firmware did to it for assertions.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;

use crate::app::ports::{AnalogInput, ByteSink, ByteSource, TimeSource};
use crate::clock::bcd::{bcd_to_dec, dec_to_bcd};
use crate::clock::registers::{HALT_BIT, REG_MINUTES, REG_SECONDS, REGISTER_COUNT};
use crate::error::ClockError;

const RTC_RAM_SIZE: usize = 64;

// ── DS1307 ────────────────────────────────────────────────────

/// 64-byte register file with a seconds counter that advances on demand.
#[derive(Debug, Clone)]
pub struct SimRtc {
    ram: [u8; RTC_RAM_SIZE],
    write_log: Vec<(u8, u8)>,
    reads: u32,
    tick_every: Option<u32>,
    fail_next: bool,
}

impl SimRtc {
    pub fn with_registers(regs: [u8; REGISTER_COUNT]) -> Self {
        let mut ram = [0u8; RTC_RAM_SIZE];
        ram[..REGISTER_COUNT].copy_from_slice(&regs);
        Self {
            ram,
            write_log: Vec::new(),
            reads: 0,
            tick_every: None,
            fail_next: false,
        }
    }

    /// Advance one second every `reads` calls to `read_all`.
    #[must_use]
    pub fn ticking_every(mut self, reads: u32) -> Self {
        self.tick_every = Some(reads.max(1));
        self
    }

    /// Advance the seconds register by one, carrying into minutes.
    /// Does nothing while the oscillator is halted.
    pub fn tick(&mut self) {
        let sec = self.ram[REG_SECONDS];
        if sec & HALT_BIT != 0 {
            return;
        }
        let next = bcd_to_dec(sec) + 1;
        if next >= 60 {
            self.ram[REG_SECONDS] = 0;
            let min = (bcd_to_dec(self.ram[REG_MINUTES]) + 1) % 60;
            self.ram[REG_MINUTES] = dec_to_bcd(min);
        } else {
            self.ram[REG_SECONDS] = dec_to_bcd(next);
        }
    }

    /// Make the next bus operation fail.
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }

    pub fn register(&self, addr: usize) -> u8 {
        self.ram[addr]
    }

    /// Every single-register write, in bus order.
    pub fn write_log(&self) -> &[(u8, u8)] {
        &self.write_log
    }

    pub fn writes(&self) -> usize {
        self.write_log.len()
    }

    pub fn reads(&self) -> u32 {
        self.reads
    }

    fn check_bus(&mut self) -> Result<(), ClockError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(ClockError::Bus);
        }
        Ok(())
    }

    fn store(&mut self, addr: u8, value: u8) {
        self.ram[usize::from(addr)] = value;
        self.write_log.push((addr, value));
    }
}

impl TimeSource for SimRtc {
    fn read_all(&mut self) -> Result<[u8; REGISTER_COUNT], ClockError> {
        self.check_bus()?;
        self.reads += 1;
        if let Some(every) = self.tick_every {
            if self.reads % every == 0 {
                self.tick();
            }
        }
        let mut out = [0u8; REGISTER_COUNT];
        out.copy_from_slice(&self.ram[..REGISTER_COUNT]);
        Ok(out)
    }

    fn write_all(&mut self, regs: &[u8; REGISTER_COUNT]) -> Result<(), ClockError> {
        self.check_bus()?;
        self.store(0, regs[0] | HALT_BIT);
        for (addr, value) in regs.iter().enumerate().skip(1) {
            self.store(addr as u8, *value);
        }
        self.store(0, regs[0]);
        Ok(())
    }

    fn read_register(&mut self, addr: u8) -> Result<u8, ClockError> {
        self.check_bus()?;
        Ok(self.ram[usize::from(addr)])
    }

    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), ClockError> {
        self.check_bus()?;
        self.store(addr, value);
        Ok(())
    }
}

// ── pH stamp ──────────────────────────────────────────────────

/// pH stamp that answers each single-sample request with the next queued reply.
#[derive(Debug, Default)]
pub struct SimPhStamp {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    replies: VecDeque<Vec<u8>>,
}

impl SimPhStamp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the raw bytes sent back after the next `r\r`.
    pub fn queue_reply(&mut self, reply: &[u8]) {
        self.replies.push_back(reply.to_vec());
    }

    /// Everything the firmware transmitted so far.
    pub fn sent(&self) -> &[u8] {
        &self.tx
    }
}

impl ByteSource for SimPhStamp {
    fn bytes_available(&self) -> usize {
        self.rx.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }
}

impl ByteSink for SimPhStamp {
    fn write(&mut self, bytes: &[u8]) {
        self.tx.extend_from_slice(bytes);
        if bytes == b"r\r" {
            if let Some(reply) = self.replies.pop_front() {
                self.rx.extend(reply);
            }
        }
    }
}

// ── ADC ───────────────────────────────────────────────────────

/// Returns queued counts first, then a constant.
#[derive(Debug)]
pub struct SimAnalog {
    queued: VecDeque<u16>,
    steady: u16,
    reads: Vec<u8>,
}

impl SimAnalog {
    pub fn constant(raw: u16) -> Self {
        Self {
            queued: VecDeque::new(),
            steady: raw,
            reads: Vec::new(),
        }
    }

    pub fn queue(&mut self, raw: u16) {
        self.queued.push_back(raw);
    }

    /// Pins read so far, in order.
    pub fn reads(&self) -> &[u8] {
        &self.reads
    }
}

impl AnalogInput for SimAnalog {
    fn read(&mut self, pin: u8) -> u16 {
        self.reads.push(pin);
        self.queued.pop_front().unwrap_or(self.steady)
    }
}

// ── Console ───────────────────────────────────────────────────

/// Console whose receive buffer is filled by the test.
#[derive(Debug, Default)]
pub struct SimConsole {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl SimConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `bytes` available to the firmware as if they had just arrived.
    pub fn push_input(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    /// Everything written back, lossily decoded.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.tx).into_owned()
    }

    pub fn clear_output(&mut self) {
        self.tx.clear();
    }
}

impl ByteSource for SimConsole {
    fn bytes_available(&self) -> usize {
        self.rx.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }
}

impl ByteSink for SimConsole {
    fn write(&mut self, bytes: &[u8]) {
        self.tx.extend_from_slice(bytes);
    }
}

// ── Delay ─────────────────────────────────────────────────────

/// Delay that returns immediately and keeps a log of requested waits.
#[derive(Debug, Default)]
pub struct SimDelay {
    waits_ns: Vec<u64>,
}

impl SimDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested waits in milliseconds, in order.
    pub fn waits_ms(&self) -> Vec<u64> {
        self.waits_ns.iter().map(|ns| ns / 1_000_000).collect()
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ns.push(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.waits_ns.push(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ns.push(u64::from(ms) * 1_000_000);
    }
}
