//! Eight-channel LED bank driver (LEDC PWM).
//!
//! Each LED is addressed by its GPIO number and maps to the LEDC channel
//! at the same position in [`pins::LED_PINS`].  The driver keeps no
//! state: the registry above owns what each LED should show.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the LEDC duty registers via hw_init helpers.
//! On host/test: the register write is a no-op.

use core::fmt;

use crate::drivers::hw_init;
use crate::pins;

/// The GPIO is not one of the bank's LED pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownPin(pub i32);

impl fmt::Display for UnknownPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO {} is not an LED pin", self.0)
    }
}

impl std::error::Error for UnknownPin {}

#[derive(Debug, Default)]
pub struct LedBank;

impl LedBank {
    pub fn new() -> Self {
        Self
    }

    /// Write `duty` to the LED on `gpio`.  Returns the LEDC channel used.
    pub fn set(&mut self, gpio: i32, duty: u8) -> Result<u32, UnknownPin> {
        let channel = pins::ledc_channel_for(gpio).ok_or(UnknownPin(gpio))?;
        hw_init::ledc_set(channel, duty);
        Ok(channel)
    }
}
