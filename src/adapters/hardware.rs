//! Hardware adapter: bridges the LED bank to the domain port traits.
//!
//! Owns the [`LedBank`] driver and exposes it through [`LedOutputPort`].
//! This is the only module in the controller image that touches actual
//! hardware.  On non-espidf targets the driver uses cfg-gated
//! simulation stubs.

use log::warn;

use crate::app::ports::LedOutputPort;
use crate::drivers::led_bank::LedBank;

pub struct HardwareAdapter {
    leds: LedBank,
}

impl HardwareAdapter {
    pub fn new(leds: LedBank) -> Self {
        Self { leds }
    }
}

// ── LedOutputPort implementation ──────────────────────────────

impl LedOutputPort for HardwareAdapter {
    fn write_duty(&mut self, pin: i32, duty: u8) {
        if let Err(e) = self.leds.set(pin, duty) {
            warn!("HardwareAdapter: write skipped: {}", e);
        }
    }
}
