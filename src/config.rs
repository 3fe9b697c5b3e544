//! System configuration parameters
//!
//! All tunable parameters for the AqMonitor. There is no persistent store
//! on this board, so the defaults are what ships; the struct stays
//! serialisable so a bench harness can dump or inject it.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Serial links ---
    /// Operator console baud rate
    pub console_baud: u32,
    /// pH stamp UART baud rate
    pub ph_baud: u32,
    /// Serial LCD baud rate
    pub lcd_baud: u32,

    // --- pH probe timing ---
    /// Wait after switching the probe LED on at startup (milliseconds)
    pub ph_warmup_ms: u32,
    /// Wait between the sample request and reading the response (milliseconds)
    pub ph_settle_ms: u32,

    // --- Temperature probe ---
    /// ADC channel of the LM34
    pub temperature_pin: u8,
    /// Wait after each of the two analog reads (milliseconds)
    pub analog_settle_ms: u32,
    /// External ADC reference voltage (volts)
    pub reference_voltage: f64,

    // --- Control loop ---
    /// Clock reads before giving up on a seconds change for one iteration
    pub max_second_polls: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            // Serial links
            console_baud: 115_200,
            ph_baud: 38_400,
            lcd_baud: 9_600,

            // pH probe (410 ms with LED per datasheet, rounded up)
            ph_warmup_ms: 1_000,
            ph_settle_ms: 500,

            // Temperature probe
            temperature_pin: crate::pins::TEMP_ADC_CHANNEL,
            analog_settle_ms: 20,
            reference_voltage: 3.32,

            // Control loop
            max_second_polls: 50_000,
        }
    }
}

impl MonitorConfig {
    /// Reject values that would make the loop or the conversions meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.console_baud == 0 || self.ph_baud == 0 || self.lcd_baud == 0 {
            return Err(Error::Config("baud rate must be non-zero"));
        }
        if !(self.reference_voltage > 0.0 && self.reference_voltage <= 5.5) {
            return Err(Error::Config("reference voltage out of range"));
        }
        if self.max_second_polls == 0 {
            return Err(Error::Config("max_second_polls must be non-zero"));
        }
        Ok(())
    }
}
