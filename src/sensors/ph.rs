//! Atlas Scientific pH stamp on a dedicated UART.
//!
//! One request/response round trip per tick: send the compensation
//! temperature, ask for a single reading, wait for the stamp to answer,
//! then parse whatever arrived. A short answer is counted and dropped; the
//! window keeps its previous contents. Anything long enough is recorded as
//! its leading number, which is 0.0 when the answer holds none.

use core::fmt::Write as _;

use embedded_hal::delay::DelayNs;
use heapless::{String, Vec};
use log::{debug, info, warn};

use super::sampler::WindowedSampler;
use crate::app::ports::SensorLink;
use crate::config::MonitorConfig;
use crate::error::SensorError;

pub const PH_WINDOW: usize = 5;

const CMD_SINGLE_SAMPLE: &[u8] = b"r\r";
const CMD_LED_ON: &[u8] = b"l1\r";
/// Shortest plausible answer, e.g. `7.0\r`.
const MIN_RESPONSE_BYTES: usize = 4;
const RESPONSE_CAP: usize = 15;
const CR: u8 = 0x0D;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhReading {
    pub ph: f64,
    pub avg_ph: f64,
}

pub struct PhProbe<L> {
    link: L,
    sampler: WindowedSampler<PH_WINDOW>,
    warmup_ms: u32,
    settle_ms: u32,
    requests: u32,
    errors: u32,
    last_response: Vec<u8, RESPONSE_CAP>,
}

impl<L: SensorLink> PhProbe<L> {
    pub fn new(link: L, config: &MonitorConfig) -> Self {
        Self {
            link,
            sampler: WindowedSampler::new(),
            warmup_ms: config.ph_warmup_ms,
            settle_ms: config.ph_settle_ms,
            requests: 0,
            errors: 0,
            last_response: Vec::new(),
        }
    }

    /// Switch the stamp's LED on and give it time to settle.
    pub fn initialize(&mut self, delay: &mut impl DelayNs) {
        info!("pH probe: initializing");
        self.link.write(CMD_LED_ON);
        delay.delay_ms(self.warmup_ms);
        info!("pH probe: ready");
    }

    /// One temperature-compensated reading.
    ///
    /// Blocks for the settle period regardless of when (or whether) the
    /// stamp answers.
    pub fn sample(
        &mut self,
        temperature: f64,
        delay: &mut impl DelayNs,
    ) -> Result<PhReading, SensorError> {
        // Leftovers from a rejected answer would otherwise prefix this one.
        let stale = self.link.bytes_available();
        for _ in 0..stale {
            if self.link.read_byte().is_none() {
                break;
            }
        }
        if stale > 0 {
            debug!("pH: discarded {} stale bytes", stale);
        }

        let mut compensation: String<16> = String::new();
        let _ = write!(compensation, "{:.2}\r", temperature);
        self.link.write(compensation.as_bytes());
        self.link.write(CMD_SINGLE_SAMPLE);
        self.requests = self.requests.wrapping_add(1);

        delay.delay_ms(self.settle_ms);

        let available = self.link.bytes_available();
        if available < MIN_RESPONSE_BYTES {
            return Err(self.reject(SensorError::ShortResponse { available }));
        }

        self.last_response.clear();
        for _ in 0..available {
            let Some(byte) = self.link.read_byte() else {
                break;
            };
            // Anything past the buffer is line noise; drain it anyway.
            let _ = self.last_response.push(byte);
        }

        let ph = parse_reading(&self.last_response);
        self.sampler.record(ph);
        debug!("pH: sample {} = {:.2}", self.requests, ph);

        Ok(PhReading {
            ph,
            avg_ph: self.sampler.average_value(),
        })
    }

    pub fn last_value(&self) -> f64 {
        self.sampler.last_value()
    }

    pub fn average_value(&self) -> f64 {
        self.sampler.average_value()
    }

    /// Sample requests sent since startup.
    pub fn requests(&self) -> u32 {
        self.requests
    }

    /// Failed samples since startup.
    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// Raw bytes of the last answer that passed the length check.
    pub fn last_response(&self) -> &[u8] {
        &self.last_response
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    fn reject(&mut self, err: SensorError) -> SensorError {
        self.errors = self.errors.wrapping_add(1);
        warn!(
            "pH: error in sample {}, error {}: {}",
            self.requests, self.errors, err
        );
        err
    }
}

/// Leading decimal number of a CR-terminated ASCII answer.
///
/// Skips leading blanks, takes an optional sign, digits and at most one
/// decimal point, and stops at the first other byte. No number reads as 0.0.
fn parse_reading(bytes: &[u8]) -> f64 {
    let line = bytes.split(|b| *b == CR).next().unwrap_or_default();
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let text = &line[start..];

    let mut end = usize::from(matches!(text.first(), Some(b'+' | b'-')));
    let mut seen_point = false;
    while let Some(&b) = text.get(end) {
        match b {
            b'0'..=b'9' => {}
            b'.' if !seen_point => seen_point = true,
            _ => break,
        }
        end += 1;
    }

    core::str::from_utf8(&text[..end])
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0)
}
