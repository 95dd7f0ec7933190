// esp-hal wiring for the tracker board. GPIO numbers match board::pins.

use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::peripherals::Peripherals;

use super::led::LedBank;
use super::pins;
use crate::drivers::led::PinLed;
use crate::drivers::power::PowerManager;

pub type BoardLed = PinLed<Output<'static>>;
pub type BoardLeds = LedBank<Output<'static>, { pins::LED_COUNT }>;
pub type BoardPower = PowerManager<Output<'static>>;

/// Complete board hardware, ready for the kernel.
pub struct Board {
    pub leds: BoardLeds,
    pub power: BoardPower,
}

impl Board {
    pub fn init(p: Peripherals) -> Self {
        // every rail and LED starts low (off)
        let leds = LedBank::new([
            Output::new(p.GPIO6, Level::Low, OutputConfig::default()),
            Output::new(p.GPIO7, Level::Low, OutputConfig::default()),
        ]);

        let power = PowerManager::new([
            Output::new(p.GPIO0, Level::Low, OutputConfig::default()),
            Output::new(p.GPIO1, Level::Low, OutputConfig::default()),
            Output::new(p.GPIO2, Level::Low, OutputConfig::default()),
            Output::new(p.GPIO3, Level::Low, OutputConfig::default()),
        ]);

        Board { leds, power }
    }
}
