// The board's status LEDs, handed out by number
//
// LEDs are numbered 1..=N. Each one can be taken once; the taker owns it
// for the rest of the program.

use core::fmt;

use embedded_hal::digital::OutputPin;

use crate::drivers::led::{LedId, PinLed};

/// No LED with that number, or it already has an owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceNotFound(pub LedId);

impl fmt::Display for DeviceNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no free led {}", self.0)
    }
}

pub struct LedBank<P, const N: usize> {
    leds: [Option<PinLed<P>>; N],
}

impl<P: OutputPin, const N: usize> LedBank<P, N> {
    /// Wrap pins in board order: `pins[0]` becomes LED 1.
    pub fn new(pins: [P; N]) -> Self {
        let mut id: LedId = 0;
        Self {
            leds: pins.map(|pin| {
                id += 1;
                Some(PinLed::new(id, pin))
            }),
        }
    }

    /// Same as new() for LEDs that light when the pin is driven low.
    pub fn active_low(pins: [P; N]) -> Self {
        let mut id: LedId = 0;
        Self {
            leds: pins.map(|pin| {
                id += 1;
                Some(PinLed::active_low(id, pin))
            }),
        }
    }

    pub fn take(&mut self, id: LedId) -> Result<PinLed<P>, DeviceNotFound> {
        (id as usize)
            .checked_sub(1)
            .and_then(|index| self.leds.get_mut(index))
            .and_then(Option::take)
            .ok_or(DeviceNotFound(id))
    }

    pub fn is_available(&self, id: LedId) -> bool {
        (id as usize)
            .checked_sub(1)
            .and_then(|index| self.leds.get(index))
            .is_some_and(Option::is_some)
    }

    pub const fn len(&self) -> usize {
        N
    }
}
