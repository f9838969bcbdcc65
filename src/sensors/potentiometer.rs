//! Potentiometer (analog divider) driver and periodic sampler.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC2_CH0 (GPIO 4) via the oneshot API initialised
//! by `hw_init::init_potentiometer_adc`.
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use crate::app::ports::AnalogInputPort;

#[cfg(not(target_os = "espidf"))]
static SIM_POT_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_pot_adc(raw: u16) {
    SIM_POT_ADC.store(raw, Ordering::Relaxed);
}

/// Full-scale count at 12-bit resolution.
pub const ADC_MAX: u16 = 4095;

#[derive(Debug, Default)]
pub struct Potentiometer;

impl Potentiometer {
    pub fn new() -> Self {
        Self
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        crate::drivers::hw_init::pot_adc_read()
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_POT_ADC.load(Ordering::Relaxed)
    }
}

impl AnalogInputPort for Potentiometer {
    fn read_raw(&mut self) -> u16 {
        self.read_adc().min(ADC_MAX)
    }
}

/// Fires at most once per `interval_ms`.
///
/// The first poll samples immediately; each sample schedules the next one
/// a full interval after the poll that took it.
#[derive(Debug, Clone, Copy)]
pub struct PotentiometerSampler {
    interval_ms: u32,
    next_due_ms: Option<u64>,
}

impl PotentiometerSampler {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            next_due_ms: None,
        }
    }

    /// Read `input` if a sample is due at `now_ms`.
    pub fn poll(&mut self, now_ms: u64, input: &mut impl AnalogInputPort) -> Option<u16> {
        if self.next_due_ms.is_some_and(|due| now_ms < due) {
            return None;
        }
        self.next_due_ms = Some(now_ms + u64::from(self.interval_ms));
        Some(input.read_raw())
    }

    /// Milliseconds until the next sample is due (0 if overdue).
    pub fn ms_until_due(&self, now_ms: u64) -> u64 {
        self.next_due_ms.map_or(0, |due| due.saturating_sub(now_ms))
    }
}
