//! LED channel registry.
//!
//! A fixed-length table of channels, one per entry in
//! [`LED_PINS`](crate::pins::LED_PINS).  Every mutation writes the new
//! duty through the [`LedOutputPort`] passed in by the caller, so the
//! table and the hardware never disagree:
//!
//! - `is_on == true`  ⇔ the last write for the channel was `brightness`
//! - `is_on == false` ⇔ the last write was `0`
//!
//! Single-threaded access contract: the registry is owned by the
//! [`LedService`](super::service::LedService) and mutated only through
//! `&mut self`.  Sharing across tasks is the owner's job.

use crate::error::RegistryError;
use crate::pins::LED_COUNT;

use super::ports::LedOutputPort;

/// One controllable LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Channel {
    pin: i32,
    is_on: bool,
    brightness: u8,
    /// Pending blink period.  Nothing schedules blinking yet; every
    /// control operation clears it.
    blink_interval_ms: u32,
}

impl Channel {
    const fn new(pin: i32, brightness: u8) -> Self {
        Self {
            pin,
            is_on: false,
            brightness,
            blink_interval_ms: 0,
        }
    }

    /// Duty the hardware must show for the current state.
    fn duty(&self) -> u8 {
        if self.is_on { self.brightness } else { 0 }
    }
}

/// Read-only view of one channel, as reported by `GET /api/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelStatus {
    pub is_on: bool,
    pub brightness: u8,
    pub blink_interval_ms: u32,
}

pub struct LedRegistry {
    channels: [Channel; LED_COUNT],
}

impl LedRegistry {
    /// Build the table with every channel off at `brightness`.
    ///
    /// Does **not** touch hardware; call [`init`](Self::init) once the
    /// output port is ready.
    pub fn new(pins: [i32; LED_COUNT], brightness: u8) -> Result<Self, RegistryError> {
        for (i, pin) in pins.iter().enumerate() {
            if pins[i + 1..].contains(pin) {
                return Err(RegistryError::DuplicatePin(*pin));
            }
        }
        Ok(Self {
            channels: pins.map(|pin| Channel::new(pin, brightness)),
        })
    }

    /// Drive every output to match the table (all off after `new`).
    pub fn init(&self, hw: &mut impl LedOutputPort) {
        for ch in &self.channels {
            hw.write_duty(ch.pin, ch.duty());
        }
    }

    /// Map a wire-level index onto a channel slot.
    pub fn resolve_index(raw: i64) -> Result<usize, RegistryError> {
        usize::try_from(raw)
            .ok()
            .filter(|&i| i < LED_COUNT)
            .ok_or(RegistryError::OutOfRange(raw))
    }

    /// Snapshot of every channel in index order.
    pub fn get_all(&self) -> [ChannelStatus; LED_COUNT] {
        self.channels.map(|ch| ChannelStatus {
            is_on: ch.is_on,
            brightness: ch.brightness,
            blink_interval_ms: ch.blink_interval_ms,
        })
    }

    /// Switch one channel and write its new duty.
    ///
    /// Out-of-range indices fail without touching any channel or output.
    pub fn set_one(
        &mut self,
        index: usize,
        on: bool,
        hw: &mut impl LedOutputPort,
    ) -> Result<(), RegistryError> {
        let ch = self
            .channels
            .get_mut(index)
            .ok_or(RegistryError::OutOfRange(index as i64))?;
        ch.is_on = on;
        ch.blink_interval_ms = 0;
        hw.write_duty(ch.pin, ch.duty());
        Ok(())
    }

    /// [`set_one`](Self::set_one) for every channel, in index order.
    pub fn set_all(&mut self, on: bool, hw: &mut impl LedOutputPort) {
        for ch in &mut self.channels {
            ch.is_on = on;
            ch.blink_interval_ms = 0;
            hw.write_duty(ch.pin, ch.duty());
        }
    }
}
