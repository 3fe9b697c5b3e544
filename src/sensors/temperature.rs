//! LM34 analog temperature sensor (10 mV per degree Fahrenheit).
//!
//! Read through the 10-bit ADC against an external reference. The first
//! conversion after switching the multiplexer is unreliable, so each sample
//! throws one away and settles before and after the kept read.

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use super::sampler::WindowedSampler;
use crate::app::ports::AnalogInput;
use crate::config::MonitorConfig;

pub const TEMPERATURE_WINDOW: usize = 10;

/// Full-scale divisor of the 10-bit converter.
const ADC_SCALE: f64 = 1024.0;
/// LM34 output: 10 mV per degree.
const DEGREES_PER_VOLT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReading {
    pub raw: u16,
    pub fahrenheit: f64,
    pub avg_fahrenheit: f64,
}

pub struct TemperatureProbe<A> {
    adc: A,
    pin: u8,
    reference_voltage: f64,
    settle_ms: u32,
    sampler: WindowedSampler<TEMPERATURE_WINDOW>,
}

impl<A: AnalogInput> TemperatureProbe<A> {
    pub fn new(adc: A, config: &MonitorConfig) -> Self {
        Self {
            adc,
            pin: config.temperature_pin,
            reference_voltage: config.reference_voltage,
            settle_ms: config.analog_settle_ms,
            sampler: WindowedSampler::new(),
        }
    }

    pub fn initialize(&mut self) {
        info!(
            "Temperature probe: LM34 on channel {}, vref={:.2}V",
            self.pin, self.reference_voltage
        );
    }

    /// Discard one conversion, settle, take the real one, settle again.
    pub fn sample(&mut self, delay: &mut impl DelayNs) -> TemperatureReading {
        let _ = self.adc.read(self.pin);
        delay.delay_ms(self.settle_ms);
        let raw = self.adc.read(self.pin);
        delay.delay_ms(self.settle_ms);

        let fahrenheit = counts_to_degrees(raw, self.reference_voltage);
        self.sampler.record(fahrenheit);
        debug!("Temperature: raw={} -> {:.2}F", raw, fahrenheit);

        TemperatureReading {
            raw,
            fahrenheit,
            avg_fahrenheit: self.sampler.average_value(),
        }
    }

    pub fn last_value(&self) -> f64 {
        self.sampler.last_value()
    }

    pub fn average_value(&self) -> f64 {
        self.sampler.average_value()
    }

    pub fn adc(&self) -> &A {
        &self.adc
    }

    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }
}

/// Raw ADC counts to LM34 degrees for the given reference voltage.
pub fn counts_to_degrees(raw: u16, reference_voltage: f64) -> f64 {
    f64::from(raw) * reference_voltage / ADC_SCALE * DEGREES_PER_VOLT
}
