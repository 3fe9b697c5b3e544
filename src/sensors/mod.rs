//! Sensor subsystem: individual probes and the aggregating [`SensorHub`].
//!
//! The hub owns both probes and produces a [`SensorSnapshot`] each tick.
//! Temperature is read first so the pH stamp gets compensated with the
//! current temperature average.

pub mod ph;
pub mod sampler;
pub mod temperature;

use embedded_hal::delay::DelayNs;

use crate::app::ports::{AnalogInput, SensorLink};
use crate::config::MonitorConfig;
use crate::error::SensorError;
use ph::PhProbe;
use temperature::TemperatureProbe;

/// One tick's worth of readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSnapshot {
    pub temperature: f64,
    pub avg_temperature: f64,
    pub ph: f64,
    pub avg_ph: f64,
    /// Failure of this tick's pH sample, if any. The pH fields then hold
    /// the previous window.
    pub ph_error: Option<SensorError>,
    pub ph_errors: u32,
}

pub struct SensorHub<L, A> {
    pub ph: PhProbe<L>,
    pub temperature: TemperatureProbe<A>,
}

impl<L: SensorLink, A: AnalogInput> SensorHub<L, A> {
    pub fn new(ph_link: L, adc: A, config: &MonitorConfig) -> Self {
        Self {
            ph: PhProbe::new(ph_link, config),
            temperature: TemperatureProbe::new(adc, config),
        }
    }

    pub fn initialize(&mut self, delay: &mut impl DelayNs) {
        self.temperature.initialize();
        self.ph.initialize(delay);
    }

    /// Temperature, then pH compensated with the temperature average.
    ///
    /// A failed pH sample does not fail the tick; it is reported in the
    /// snapshot.
    pub fn sample_all(&mut self, delay: &mut impl DelayNs) -> SensorSnapshot {
        let temp = self.temperature.sample(delay);
        let ph_error = self.ph.sample(temp.avg_fahrenheit, delay).err();

        SensorSnapshot {
            temperature: temp.fahrenheit,
            avg_temperature: temp.avg_fahrenheit,
            ph: self.ph.last_value(),
            avg_ph: self.ph.average_value(),
            ph_error,
            ph_errors: self.ph.errors(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sim::{SimAnalog, SimDelay, SimPhStamp};

    fn hub() -> SensorHub<SimPhStamp, SimAnalog> {
        SensorHub::new(
            SimPhStamp::new(),
            SimAnalog::constant(241),
            &MonitorConfig::default(),
        )
    }

    #[test]
    fn ph_is_compensated_with_temperature_average() {
        let mut hub = hub();
        hub.ph.link_mut().queue_reply(b"7.00\r");
        let snap = hub.sample_all(&mut SimDelay::new());
        // 241 counts -> 78.137 F, sent with two decimals.
        assert_eq!(hub.ph.link().sent(), b"78.14\rr\r");
        assert!((snap.avg_temperature - 78.136_718_75).abs() < 1e-9);
        assert!((snap.avg_ph - 7.0).abs() < 1e-9);
        assert_eq!(snap.ph_error, None);
    }

    #[test]
    fn ph_failure_keeps_temperature() {
        let mut hub = hub();
        let snap = hub.sample_all(&mut SimDelay::new());
        assert!((snap.temperature - 78.136_718_75).abs() < 1e-9);
        assert_eq!(snap.ph_error, Some(SensorError::ShortResponse { available: 0 }));
        assert_eq!(snap.ph_errors, 1);
        assert_eq!(snap.avg_ph, 0.0);
    }

    #[test]
    fn initialize_warms_up_ph_probe() {
        let mut hub = hub();
        let mut delay = SimDelay::new();
        hub.initialize(&mut delay);
        assert_eq!(hub.ph.link().sent(), b"l1\r");
        assert_eq!(delay.waits_ms(), vec![1_000]);
    }
}
