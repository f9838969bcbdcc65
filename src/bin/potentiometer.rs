//! Potentiometer sampler: a standalone image that reads the analog
//! input on GPIO 4 and logs every sample.
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use log::{error, info};

use ledweb::adapters::time::MonotonicClock;
use ledweb::config::SystemConfig;
use ledweb::drivers::hw_init;
use ledweb::drivers::watchdog::Watchdog;
use ledweb::pins;
use ledweb::sensors::potentiometer::{Potentiometer, PotentiometerSampler};

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    let config = SystemConfig::default();
    config.validate()?;

    if let Err(e) = hw_init::init_potentiometer_adc() {
        error!("ADC init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let watchdog = Watchdog::new(config.watchdog_timeout_ms);

    info!(
        "Potentiometer on GPIO {}, sampling every {} ms",
        pins::POT_ADC_GPIO,
        config.pot_sample_interval_ms
    );

    let clock = MonotonicClock::new();
    let mut pot = Potentiometer::new();
    let mut sampler = PotentiometerSampler::new(config.pot_sample_interval_ms);

    loop {
        let now = clock.uptime_ms();
        if let Some(value) = sampler.poll(now, &mut pot) {
            info!("Potentiometer Value: {}", value);
        }
        watchdog.feed();
        std::thread::sleep(Duration::from_millis(sampler.ms_until_due(clock.uptime_ms()).max(1)));
    }
}
