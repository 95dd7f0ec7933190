// Status LED driver
//
// Any embedded-hal OutputPin becomes a numbered status LED. Writes are
// idempotent: turning on a lit LED drives the pin again and changes nothing.

use core::fmt;

use embedded_hal::digital::{Error as _, ErrorKind, OutputPin};

/// Board LED number, 1-based like the silkscreen.
pub type LedId = u8;

/// A single LED write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIoError {
    pub led: LedId,
    pub kind: ErrorKind,
}

impl fmt::Display for DeviceIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "led {} write failed: {}", self.led, self.kind)
    }
}

/// A binary output device that can be switched on and off.
pub trait StatusLed {
    fn id(&self) -> LedId;
    fn turn_on(&mut self) -> Result<(), DeviceIoError>;
    fn turn_off(&mut self) -> Result<(), DeviceIoError>;
}

pub struct PinLed<P> {
    id: LedId,
    pin: P,
    active_low: bool,
    lit: bool,
}

impl<P: OutputPin> PinLed<P> {
    pub const fn new(id: LedId, pin: P) -> Self {
        Self {
            id,
            pin,
            active_low: false,
            lit: false,
        }
    }

    /// LED wired between VCC and the pin: drive low to light it.
    pub const fn active_low(id: LedId, pin: P) -> Self {
        Self {
            id,
            pin,
            active_low: true,
            lit: false,
        }
    }

    /// Last state successfully written.
    pub fn is_on(&self) -> bool {
        self.lit
    }

    fn drive(&mut self, on: bool) -> Result<(), DeviceIoError> {
        let high = on != self.active_low;
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|e| DeviceIoError {
            led: self.id,
            kind: e.kind(),
        })?;
        self.lit = on;
        Ok(())
    }
}

impl<P: OutputPin> StatusLed for PinLed<P> {
    fn id(&self) -> LedId {
        self.id
    }

    fn turn_on(&mut self) -> Result<(), DeviceIoError> {
        self.drive(true)
    }

    fn turn_off(&mut self) -> Result<(), DeviceIoError> {
        self.drive(false)
    }
}
