//! In-memory image of the DS1307 time-keeping registers.
//!
//! ```text
//!  addr  bit7  bit6  bit5  bit4  bit3..0
//!  0x00  CH    10 seconds        seconds
//!  0x01  0     10 minutes        minutes
//!  0x02  0     12/24 PM/10h 10h  hours
//!  0x03  0     0     0     0     day (1-7)
//!  0x04  0     0     10 date     date
//!  0x05  0     0     0     10m   month
//!  0x06  10 year                 year
//!  0x07  OUT   0     0     SQWE  0 0 RS1 RS0
//! ```
//!
//! Everything outside this module sees decimal values only. Setters take
//! the 16-bit operand width of the serial console and silently ignore
//! anything outside the field's range; there is no error path.

use heapless::String;

use super::bcd::{bcd_to_dec, dec_to_bcd, high_nibble_ascii, low_nibble_ascii};

pub const REGISTER_COUNT: usize = 8;

pub const REG_SECONDS: usize = 0;
pub const REG_MINUTES: usize = 1;
pub const REG_HOURS: usize = 2;
pub const REG_DAY_OF_WEEK: usize = 3;
pub const REG_DATE: usize = 4;
pub const REG_MONTH: usize = 5;
pub const REG_YEAR: usize = 6;
pub const REG_CONTROL: usize = 7;

/// Clock-halt flag in the seconds register.
pub const HALT_BIT: u8 = 0x80;
const MODE_12H_BIT: u8 = 0x40;
const PM_BIT: u8 = 0x20;
const HOURS_12H_MASK: u8 = 0x1F;
const HOURS_24H_MASK: u8 = 0x3F;

const SQW_OUT_BIT: u8 = 0x80;
const SQW_ENABLE_BIT: u8 = 0x10;
const SQW_RATE_MASK: u8 = 0x03;

/// Length of `MM-DD-YY HH:MM:SS` plus the optional meridiem letter.
pub const FORMATTED_LEN: usize = 18;

/// Square-wave output rate (RS1:RS0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SqwRate {
    Hz1 = 0,
    Hz4096 = 1,
    Hz8192 = 2,
    Hz32768 = 3,
}

impl SqwRate {
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for SqwRate {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            0 => Ok(Self::Hz1),
            1 => Ok(Self::Hz4096),
            2 => Ok(Self::Hz8192),
            3 => Ok(Self::Hz32768),
            other => Err(other),
        }
    }
}

/// The eight clock registers, kept exactly as the chip stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockRegisters {
    raw: [u8; REGISTER_COUNT],
}

impl ClockRegisters {
    pub const fn from_raw(raw: [u8; REGISTER_COUNT]) -> Self {
        Self { raw }
    }

    pub const fn raw(&self) -> [u8; REGISTER_COUNT] {
        self.raw
    }

    // ── Getters ───────────────────────────────────────────────

    pub fn seconds(&self) -> u8 {
        bcd_to_dec(self.raw[REG_SECONDS] & !HALT_BIT)
    }

    pub fn minutes(&self) -> u8 {
        bcd_to_dec(self.raw[REG_MINUTES])
    }

    /// Hour in the current mode: `1..=12` in 12h mode, `0..=23` in 24h mode.
    pub fn hours(&self) -> u8 {
        bcd_to_dec(self.raw[REG_HOURS] & self.hours_mask())
    }

    pub fn day_of_week(&self) -> u8 {
        bcd_to_dec(self.raw[REG_DAY_OF_WEEK])
    }

    pub fn date(&self) -> u8 {
        bcd_to_dec(self.raw[REG_DATE])
    }

    pub fn month(&self) -> u8 {
        bcd_to_dec(self.raw[REG_MONTH])
    }

    pub fn year(&self) -> u8 {
        bcd_to_dec(self.raw[REG_YEAR])
    }

    pub fn control(&self) -> u8 {
        self.raw[REG_CONTROL]
    }

    pub fn is_12_hour(&self) -> bool {
        self.raw[REG_HOURS] & MODE_12H_BIT != 0
    }

    /// Stored PM flag in 12h mode; derived from the hour (> 11) in 24h mode.
    pub fn is_pm(&self) -> bool {
        if self.is_12_hour() {
            self.raw[REG_HOURS] & PM_BIT != 0
        } else {
            self.hours() > 11
        }
    }

    pub fn is_halted(&self) -> bool {
        self.raw[REG_SECONDS] & HALT_BIT != 0
    }

    // ── Setters ───────────────────────────────────────────────

    pub fn set_seconds(&mut self, value: u16) {
        if value < 60 {
            let halt = self.raw[REG_SECONDS] & HALT_BIT;
            self.raw[REG_SECONDS] = dec_to_bcd(value as u8) | halt;
        }
    }

    pub fn set_minutes(&mut self, value: u16) {
        if value < 60 {
            self.raw[REG_MINUTES] = dec_to_bcd(value as u8);
        }
    }

    /// Accepts `1..=12` in 12h mode (keeping the meridiem) or `0..=23` in 24h mode.
    pub fn set_hours(&mut self, value: u16) {
        let current = self.raw[REG_HOURS];
        if self.is_12_hour() {
            if (1..=12).contains(&value) {
                self.raw[REG_HOURS] = dec_to_bcd(value as u8) | (current & (MODE_12H_BIT | PM_BIT));
            }
        } else if value <= 23 {
            self.raw[REG_HOURS] = dec_to_bcd(value as u8) | (current & MODE_12H_BIT);
        }
    }

    pub fn set_day_of_week(&mut self, value: u16) {
        if (1..=7).contains(&value) {
            self.raw[REG_DAY_OF_WEEK] = dec_to_bcd(value as u8);
        }
    }

    pub fn set_date(&mut self, value: u16) {
        if (1..=31).contains(&value) {
            self.raw[REG_DATE] = dec_to_bcd(value as u8);
        }
    }

    pub fn set_month(&mut self, value: u16) {
        if (1..=12).contains(&value) {
            self.raw[REG_MONTH] = dec_to_bcd(value as u8);
        }
    }

    pub fn set_year(&mut self, value: u16) {
        if value < 100 {
            self.raw[REG_YEAR] = dec_to_bcd(value as u8);
        }
    }

    /// Clear the PM flag. Only meaningful in 12h mode; ignored otherwise.
    pub fn set_am(&mut self) {
        if self.is_12_hour() {
            self.raw[REG_HOURS] &= !PM_BIT;
        }
    }

    /// Set the PM flag. Only meaningful in 12h mode; ignored otherwise.
    pub fn set_pm(&mut self) {
        if self.is_12_hour() {
            self.raw[REG_HOURS] |= PM_BIT;
        }
    }

    // ── Mode conversion ───────────────────────────────────────

    /// Re-encode the hour in 12h mode, keeping the wall-clock time.
    pub fn switch_to_12h(&mut self) {
        if self.is_12_hour() {
            return;
        }
        let (hour, pm) = match self.hours() {
            0 => (12, false),
            h @ 1..=11 => (h, false),
            12 => (12, true),
            h => (h - 12, true),
        };
        let meridiem = if pm { PM_BIT } else { 0 };
        self.raw[REG_HOURS] = (self.raw[REG_HOURS] & !PM_BIT) | MODE_12H_BIT | meridiem;
        self.set_hours(u16::from(hour));
    }

    /// Re-encode the hour in 24h mode, keeping the wall-clock time.
    pub fn switch_to_24h(&mut self) {
        if !self.is_12_hour() {
            return;
        }
        let mut hour = self.hours();
        if hour == 12 {
            hour = 0;
        }
        if self.is_pm() {
            hour += 12;
        }
        self.raw[REG_HOURS] &= !(MODE_12H_BIT | PM_BIT);
        self.set_hours(u16::from(hour));
    }

    // ── Oscillator / square wave ──────────────────────────────

    /// Set or clear the oscillator-halt bit; the seconds value is untouched.
    pub fn set_halted(&mut self, halted: bool) {
        if halted {
            self.raw[REG_SECONDS] |= HALT_BIT;
        } else {
            self.raw[REG_SECONDS] &= !HALT_BIT;
        }
    }

    pub fn sqw_enable(&mut self, rate: SqwRate) {
        let keep = self.raw[REG_CONTROL] & !(SQW_ENABLE_BIT | SQW_RATE_MASK);
        self.raw[REG_CONTROL] = keep | SQW_ENABLE_BIT | rate.bits();
    }

    /// Disable the square wave; the pin idles at `idle_high`.
    pub fn sqw_disable(&mut self, idle_high: bool) {
        let keep = self.raw[REG_CONTROL] & !(SQW_OUT_BIT | SQW_ENABLE_BIT | SQW_RATE_MASK);
        let out = if idle_high { SQW_OUT_BIT } else { 0 };
        self.raw[REG_CONTROL] = keep | out;
    }

    pub fn is_sqw_enabled(&self) -> bool {
        self.raw[REG_CONTROL] & SQW_ENABLE_BIT != 0
    }

    // ── Rendering ─────────────────────────────────────────────

    /// `MM-DD-YY HH:MM:SS`, plus `A`/`P` in 12h mode.
    ///
    /// Built nibble by nibble from the raw registers, so a corrupt register
    /// shows up as a hex letter instead of a wrong-but-plausible digit.
    pub fn render(&self) -> String<FORMATTED_LEN> {
        let r = &self.raw;
        let hours = r[REG_HOURS] & self.hours_mask();
        let fields = [
            (r[REG_MONTH] & 0x1F, r[REG_MONTH], b'-'),
            (r[REG_DATE] & 0x3F, r[REG_DATE], b'-'),
            (r[REG_YEAR], r[REG_YEAR], b' '),
            (hours, r[REG_HOURS], b':'),
            (r[REG_MINUTES] & 0x7F, r[REG_MINUTES], b':'),
        ];

        let mut out = String::new();
        for (high, low, sep) in fields {
            push_ascii(&mut out, high_nibble_ascii(high));
            push_ascii(&mut out, low_nibble_ascii(low));
            push_ascii(&mut out, sep);
        }
        push_ascii(&mut out, high_nibble_ascii(r[REG_SECONDS] & !HALT_BIT));
        push_ascii(&mut out, low_nibble_ascii(r[REG_SECONDS]));
        if self.is_12_hour() {
            push_ascii(&mut out, if self.is_pm() { b'P' } else { b'A' });
        }
        out
    }

    fn hours_mask(&self) -> u8 {
        if self.is_12_hour() {
            HOURS_12H_MASK
        } else {
            HOURS_24H_MASK
        }
    }
}

fn push_ascii<const N: usize>(out: &mut String<N>, byte: u8) {
    // Capacity is sized for the longest rendering; the push cannot fail.
    let _ = out.push(char::from(byte));
}
