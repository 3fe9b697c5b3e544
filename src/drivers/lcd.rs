//! 20x4 serial character LCD (0xFE-prefixed command set).
//!
//! Four labelled rows; values start six columns in:
//!
//! ```text
//!   Date: 12/09/2024
//!   Time: 09:42:05 PM
//!   Temp: 77.81
//!   pH  : 7.02
//! ```
//!
//! The panel is write-only, so the driver keeps no state and every update
//! repositions the cursor first.

use core::fmt::Write as _;

use heapless::String;
use log::info;

use crate::app::ports::{ByteSink, DisplaySink};

const CONTROL: u8 = 0xFE;

const DISPLAY_ON: u8 = 0x41;
const DISPLAY_OFF: u8 = 0x42;
const SET_CURSOR: u8 = 0x45;
const UNDERLINE_ON: u8 = 0x47;
const UNDERLINE_OFF: u8 = 0x48;
const BLINK_ON: u8 = 0x4B;
const BLINK_OFF: u8 = 0x4C;
const CLEAR: u8 = 0x51;
const SET_CONTRAST: u8 = 0x52;
const SET_BRIGHTNESS: u8 = 0x53;

/// DDRAM address of the first column of each row.
pub const LINE_START: [u8; 4] = [0x00, 0x40, 0x14, 0x54];
const VALUE_COLUMN: u8 = 6;

const ROW_DATE: usize = 0;
const ROW_TIME: usize = 1;
const ROW_TEMP: usize = 2;
const ROW_PH: usize = 3;

const LABELS: [&str; 4] = ["Date:", "Time:", "Temp:", "pH  :"];

/// `HH:MM:SS` plus a three-character meridiem slot.
pub const TIME_LEN: usize = 11;
/// `MM/DD/20YY`.
pub const DATE_LEN: usize = 10;
/// Columns from the value column to the end of a row.
pub const READING_LEN: usize = 14;

pub struct SerialLcd<W> {
    port: W,
}

impl<W: ByteSink> SerialLcd<W> {
    pub fn new(port: W) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &W {
        &self.port
    }

    pub fn enable_display(&mut self, on: bool) {
        self.command(if on { DISPLAY_ON } else { DISPLAY_OFF });
    }

    pub fn enable_underline(&mut self, on: bool) {
        self.command(if on { UNDERLINE_ON } else { UNDERLINE_OFF });
    }

    pub fn enable_blink(&mut self, on: bool) {
        self.command(if on { BLINK_ON } else { BLINK_OFF });
    }

    pub fn clear(&mut self) {
        self.command(CLEAR);
    }

    pub fn set_brightness(&mut self, level: u8) {
        self.command(SET_BRIGHTNESS);
        self.port.write(&[level]);
    }

    pub fn set_contrast(&mut self, level: u8) {
        self.command(SET_CONTRAST);
        self.port.write(&[level]);
    }

    pub fn set_cursor(&mut self, position: u8) {
        self.command(SET_CURSOR);
        self.port.write(&[position]);
    }

    fn put_value(&mut self, row: usize, text: &str) {
        self.set_cursor(LINE_START[row] + VALUE_COLUMN);
        self.port.write(text.as_bytes());
    }

    fn command(&mut self, cmd: u8) {
        self.port.write(&[CONTROL, cmd]);
    }
}

impl<W: ByteSink> DisplaySink for SerialLcd<W> {
    /// Blank the panel, draw the labels, then switch it back on.
    fn initialize(&mut self) {
        info!("LCD: initializing");
        self.enable_display(false);
        self.clear();
        self.enable_underline(false);
        self.enable_blink(false);
        for (start, label) in LINE_START.iter().zip(LABELS) {
            self.set_cursor(*start);
            self.port.write(label.as_bytes());
        }
        self.enable_display(true);
        info!("LCD: ready");
    }

    fn update_time(&mut self, hours: u8, minutes: u8, seconds: u8, is_12_hour: bool, is_pm: bool) {
        let text = format_time(hours, minutes, seconds, is_12_hour, is_pm);
        self.put_value(ROW_TIME, &text);
    }

    fn update_date(&mut self, month: u8, date: u8, year: u8) {
        let text = format_date(month, date, year);
        self.put_value(ROW_DATE, &text);
    }

    fn update_temperature(&mut self, value: f64) {
        let text = format_reading(value);
        self.put_value(ROW_TEMP, &text);
    }

    fn update_ph(&mut self, value: f64) {
        let text = format_reading(value);
        self.put_value(ROW_PH, &text);
    }
}

// ── Formatting ────────────────────────────────────────────────

/// `HH:MM:SS AM`, `HH:MM:SS PM`, or `HH:MM:SS` and three blanks in 24h mode
/// so a stale meridiem is overwritten.
pub fn format_time(hours: u8, minutes: u8, seconds: u8, is_12_hour: bool, is_pm: bool) -> String<TIME_LEN> {
    let suffix = match (is_12_hour, is_pm) {
        (true, true) => " PM",
        (true, false) => " AM",
        (false, _) => "   ",
    };
    let mut s = String::new();
    let _ = write!(s, "{hours:02}:{minutes:02}:{seconds:02}{suffix}");
    s
}

pub fn format_date(month: u8, date: u8, year: u8) -> String<DATE_LEN> {
    let mut s = String::new();
    let _ = write!(s, "{month:02}/{date:02}/20{year:02}");
    s
}

/// Two decimal places, blank-padded to the end of the row so a shorter
/// value overwrites a longer one.
pub fn format_reading(value: f64) -> String<READING_LEN> {
    let mut s = String::new();
    let _ = write!(s, "{value:<width$.2}", width = READING_LEN);
    s
}
