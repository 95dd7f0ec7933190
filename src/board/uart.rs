//! Peripheral UART numbering
//!
//! Logical UART channel per peripheral role, as consumed by the modem and
//! GPS drivers. Pure data; nothing here configures a UART.
//!
//! The modem debug port has no channel assigned yet: it needs an
//! alternate-function remap that the board does not do, so it stays `None`
//! rather than a guessed number.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UartChannel(pub u8);

impl fmt::Display for UartChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UART{}", self.0)
    }
}

/// Cellular modem, with hardware flow control.
pub const GSM_UART: UartChannel = UartChannel(3);
/// GPS receiver.
pub const GPS_UART: UartChannel = UartChannel(2);
/// Modem diagnostics port. Unassigned.
pub const GSM_DEBUG_UART: Option<UartChannel> = None;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartRole {
    Gsm,
    Gps,
    GsmDebug,
}

impl UartRole {
    pub const ALL: [UartRole; 3] = [UartRole::Gsm, UartRole::Gps, UartRole::GsmDebug];

    pub const fn name(self) -> &'static str {
        match self {
            UartRole::Gsm => "gsm",
            UartRole::Gps => "gps",
            UartRole::GsmDebug => "gsm-debug",
        }
    }
}

impl fmt::Display for UartRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub const fn channel_for(role: UartRole) -> Option<UartChannel> {
    match role {
        UartRole::Gsm => Some(GSM_UART),
        UartRole::Gps => Some(GPS_UART),
        UartRole::GsmDebug => GSM_DEBUG_UART,
    }
}

/// Reverse lookup, for drivers that are handed a bare channel number.
pub fn role_for(channel: UartChannel) -> Option<UartRole> {
    UartRole::ALL
        .into_iter()
        .find(|&role| channel_for(role) == Some(channel))
}
