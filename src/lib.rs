// Board bring-up for the RuuviTracker (ESP32-C3 port): cooperative kernel,
// power domains, UART numbering and the heartbeat LED

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod drivers;
pub mod kernel;
pub mod tasks;

#[cfg(test)]
mod testutil;
