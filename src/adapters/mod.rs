//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                  | Connects to              |
//! |------------|-----------------------------|--------------------------|
//! | `esp`      | ByteSource + ByteSink       | ESP-IDF UART drivers     |
//! |            | AnalogInput                 | ESP32 ADC1 (oneshot)     |
//! | `log_sink` | EventSink                   | Serial log output        |
//! | `sim`      | TimeSource, AnalogInput,    | In-memory host devices   |
//! |            | ByteSource + ByteSink       |                          |

#[cfg(feature = "espidf")]
pub mod esp;
pub mod log_sink;
#[cfg(not(target_os = "espidf"))]
pub mod sim;
