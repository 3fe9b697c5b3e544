//! AqMonitor Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  Ds1307 (I2C)     UartLink x3         OneshotAnalog  FreeRtos  │
//! │  (TimeSource)     (pH / LCD / console) (AnalogInput) (DelayNs) │
//! │  SerialLcd        LogEventSink                                 │
//! │  (DisplaySink)    (EventSink)                                  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Monitor (pure logic)                      │    │
//! │  │  Clock · SensorHub · command dispatch                  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::AnyIOPin;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::info;

use aqmonitor::adapters::esp::{OneshotAnalog, UartLink};
use aqmonitor::adapters::log_sink::LogEventSink;
use aqmonitor::app::service::Monitor;
use aqmonitor::clock::Clock;
use aqmonitor::config::MonitorConfig;
use aqmonitor::drivers::ds1307::Ds1307;
use aqmonitor::drivers::lcd::SerialLcd;
use aqmonitor::pins;
use aqmonitor::sensors::SensorHub;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  AqMonitor v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (compiled-in defaults) ───────────────
    let config = MonitorConfig::default();
    config.validate().context("invalid configuration")?;

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take().context("peripherals already taken")?;

    let i2c_config = I2cConfig::new().baudrate(Hertz(pins::RTC_I2C_BAUD_HZ));
    // SAFETY: pin numbers come from `pins` and each is claimed exactly once.
    let (sda, scl) = unsafe {
        (
            AnyIOPin::new(pins::RTC_SDA_GPIO),
            AnyIOPin::new(pins::RTC_SCL_GPIO),
        )
    };
    let i2c = I2cDriver::new(peripherals.i2c0, sda, scl, &i2c_config)
        .context("I2C0 init failed")?;

    let mut console = UartLink::new(
        "console",
        peripherals.uart0,
        pins::CONSOLE_UART_TX_GPIO,
        pins::CONSOLE_UART_RX_GPIO,
        config.console_baud,
    )?;
    let ph_link = UartLink::new(
        "ph",
        peripherals.uart1,
        pins::PH_UART_TX_GPIO,
        pins::PH_UART_RX_GPIO,
        config.ph_baud,
    )?;
    let lcd_link = UartLink::new(
        "lcd",
        peripherals.uart2,
        pins::LCD_UART_TX_GPIO,
        pins::LCD_UART_RX_GPIO,
        config.lcd_baud,
    )?;
    let adc = OneshotAnalog::new(&[config.temperature_pin])?;

    // ── 4. Domain objects ─────────────────────────────────────
    let clock = Clock::new(Ds1307::new(i2c));
    let sensors = SensorHub::new(ph_link, adc, &config);
    let mut monitor = Monitor::new(clock, sensors, &config);
    let mut display = SerialLcd::new(lcd_link);
    let mut sink = LogEventSink::new();
    let mut delay = FreeRtos;

    monitor.initialize(&mut delay, &mut display, &mut sink)?;

    // ── 5. Control loop (never returns) ───────────────────────
    loop {
        monitor.run_cycle(&mut console, &mut delay, &mut display, &mut sink);
    }
}
