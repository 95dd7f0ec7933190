//! GPIO |     Function       |      Notes
//! -----+--------------------+----------------------------------
//!  0   | LDO2 enable        | High = rail on
//!  1   | LDO3 enable        | High = rail on
//!  2   | LDO4 enable        | High = rail on
//!  3   | GSM VBAT FET       | High = modem supplied
//!  4   | GSM UART TX        | Logical UART3 (board::uart::GSM_UART)
//!  5   | GSM UART RX        |
//!  6   | LED1 (red)         | Active high, heartbeat
//!  7   | LED2 (green)       | Active high
//! 20   | GPS UART RX        | Logical UART2 (board::uart::GPS_UART)
//! 21   | GPS UART TX        |
//!
//! The modem's flow-control lines and debug port are not routed on this
//! board; see board::uart.

// ----- Power domains -----
pub const EN_LDO2: u8 = 0;
pub const EN_LDO3: u8 = 1;
pub const EN_LDO4: u8 = 2;
pub const EN_GSM_VBAT: u8 = 3;

// ----- GSM modem UART -----
pub const GSM_TX: u8 = 4;
pub const GSM_RX: u8 = 5;

// ----- Status LEDs -----
pub const LED1: u8 = 6;
pub const LED2: u8 = 7;

// ----- GPS UART -----
pub const GPS_RX: u8 = 20;
pub const GPS_TX: u8 = 21;

/// Number of status LEDs (board::led ids 1..=LED_COUNT).
pub const LED_COUNT: usize = 2;

/// LED driven by the boot heartbeat.
pub const HEARTBEAT_LED: u8 = 1;
