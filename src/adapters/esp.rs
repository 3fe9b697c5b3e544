//! ESP-IDF adapters: UART byte links and the oneshot ADC.
//!
//! The pH stamp, the LCD and the operator console all sit on a
//! [`UartLink`]; the LM34 is read through [`OneshotAnalog`]. The DS1307
//! needs no adapter here: `esp_idf_hal::i2c::I2cDriver` already implements
//! `embedded_hal::i2c::I2c` and goes straight into
//! [`Ds1307`](crate::drivers::ds1307::Ds1307).

use esp_idf_hal::delay::NON_BLOCK;
use esp_idf_hal::gpio::AnyIOPin;
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::uart::{self, UartDriver};
use esp_idf_hal::units::Hertz;
use esp_idf_svc::sys::{
    ESP_OK, adc_atten_t_ADC_ATTEN_DB_12, adc_bitwidth_t_ADC_BITWIDTH_12, adc_oneshot_chan_cfg_t,
    adc_oneshot_config_channel, adc_oneshot_new_unit, adc_oneshot_read, adc_oneshot_unit_handle_t,
    adc_oneshot_unit_init_cfg_t, adc_ulp_mode_t_ADC_ULP_MODE_DISABLE, adc_unit_t_ADC_UNIT_1,
};
use log::{info, warn};

use crate::app::ports::{ANALOG_MAX_COUNT, AnalogInput, ByteSink, ByteSource};
use crate::error::{Error, Result};

// ── UART ──────────────────────────────────────────────────────

/// Non-blocking byte link over an installed UART driver.
pub struct UartLink<'d> {
    name: &'static str,
    uart: UartDriver<'d>,
}

impl<'d> UartLink<'d> {
    /// Install the driver on `uart` with the given GPIO numbers.
    pub fn new<U: uart::Uart>(
        name: &'static str,
        uart: impl Peripheral<P = U> + 'd,
        tx_gpio: i32,
        rx_gpio: i32,
        baud: u32,
    ) -> Result<Self> {
        let config = uart::config::Config::default().baudrate(Hertz(baud));
        // SAFETY: pin numbers come from `pins` and each is claimed exactly once.
        let (tx, rx) = unsafe { (AnyIOPin::new(tx_gpio), AnyIOPin::new(rx_gpio)) };
        let uart = UartDriver::new(
            uart,
            tx,
            rx,
            Option::<AnyIOPin>::None,
            Option::<AnyIOPin>::None,
            &config,
        )
        .map_err(|e| {
            warn!("{}: UART install failed: {}", name, e);
            Error::Init("UART driver install failed")
        })?;
        info!("{}: UART up at {} baud (tx={}, rx={})", name, baud, tx_gpio, rx_gpio);
        Ok(Self { name, uart })
    }
}

impl ByteSource for UartLink<'_> {
    fn bytes_available(&self) -> usize {
        self.uart.remaining_read().unwrap_or(0)
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.uart.read(&mut byte, NON_BLOCK) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }
}

impl ByteSink for UartLink<'_> {
    fn write(&mut self, bytes: &[u8]) {
        if let Err(e) = self.uart.write(bytes) {
            warn!("{}: UART write failed: {}", self.name, e);
        }
    }
}

// ── ADC ───────────────────────────────────────────────────────

/// ADC1 in oneshot mode, scaled down to the 10-bit range the probes expect.
pub struct OneshotAnalog {
    handle: adc_oneshot_unit_handle_t,
}

impl OneshotAnalog {
    /// Bring up ADC1 and configure `channels` at 12 dB attenuation.
    pub fn new(channels: &[u8]) -> Result<Self> {
        let init_cfg = adc_oneshot_unit_init_cfg_t {
            unit_id: adc_unit_t_ADC_UNIT_1,
            ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
            ..Default::default()
        };
        let mut handle: adc_oneshot_unit_handle_t = core::ptr::null_mut();
        // SAFETY: called once from main before the loop starts; `handle` outlives the call.
        let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &mut handle) };
        if ret != ESP_OK as i32 {
            warn!("ADC1: init failed (rc={})", ret);
            return Err(Error::Init("ADC1 init failed"));
        }

        let chan_cfg = adc_oneshot_chan_cfg_t {
            atten: adc_atten_t_ADC_ATTEN_DB_12,
            bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
        };
        for &channel in channels {
            // SAFETY: `handle` was just created by adc_oneshot_new_unit.
            let ret = unsafe { adc_oneshot_config_channel(handle, u32::from(channel), &chan_cfg) };
            if ret != ESP_OK as i32 {
                warn!("ADC1: channel {} config failed (rc={})", channel, ret);
                return Err(Error::Init("ADC1 channel config failed"));
            }
        }

        info!("ADC1: configured channels {:?}", channels);
        Ok(Self { handle })
    }
}

impl AnalogInput for OneshotAnalog {
    fn read(&mut self, pin: u8) -> u16 {
        let mut raw: i32 = 0;
        // SAFETY: single-threaded main-loop access to a handle owned by self.
        let ret = unsafe { adc_oneshot_read(self.handle, u32::from(pin), &mut raw) };
        if ret != ESP_OK as i32 {
            return 0;
        }
        // 12-bit conversion down to 10 bits.
        ((raw.max(0) as u16) >> 2).min(ANALOG_MAX_COUNT)
    }
}
