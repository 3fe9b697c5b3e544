//! GPIO / peripheral pin assignments for the AqMonitor board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Real-time clock (DS1307 on I2C0)
// ---------------------------------------------------------------------------

pub const RTC_SDA_GPIO: i32 = 8;
pub const RTC_SCL_GPIO: i32 = 9;
/// DS1307 is a standard-mode part.
pub const RTC_I2C_BAUD_HZ: u32 = 100_000;

// ---------------------------------------------------------------------------
// pH probe (Atlas pH stamp, UART1)
// ---------------------------------------------------------------------------

pub const PH_UART_TX_GPIO: i32 = 17;
pub const PH_UART_RX_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Serial LCD (UART2, TX only; RX pin is claimed but unconnected)
// ---------------------------------------------------------------------------

pub const LCD_UART_TX_GPIO: i32 = 15;
pub const LCD_UART_RX_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// Operator console (UART0, shared with the log output)
// ---------------------------------------------------------------------------

pub const CONSOLE_UART_TX_GPIO: i32 = 43;
pub const CONSOLE_UART_RX_GPIO: i32 = 44;

// ---------------------------------------------------------------------------
// Temperature probe (LM34, ADC1)
// ---------------------------------------------------------------------------

/// ADC1 channel carrying the LM34 output.
pub const TEMP_ADC_CHANNEL: u8 = 0;
