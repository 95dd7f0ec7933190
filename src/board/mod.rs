//! RuuviTracker (ESP32-C3 port) Board Support Package
//!
//! Maps the tracker's physical hardware to named subsystems so that the
//! rest of the firmware never needs GPIO numbers. The tables (pins, UART
//! numbering, LED bank) are hardware independent; the esp-hal wiring is
//! only built with the `firmware` feature.

pub mod led;
pub mod pins;
pub mod uart;

#[cfg(feature = "firmware")]
mod esp32c3;

pub use led::{DeviceNotFound, LedBank};
pub use uart::{GPS_UART, GSM_DEBUG_UART, GSM_UART, UartChannel, UartRole};

#[cfg(feature = "firmware")]
pub use esp32c3::{Board, BoardLed, BoardLeds, BoardPower};
