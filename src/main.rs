//! LED web controller: main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter   LogEventSink   WifiAdapter  http_server│
//! │  (LedOutputPort)   (EventSink)    (Connectivity)         │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ───────────────    │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │   LedService (registry) ◀── ApiRouter (http)       │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The httpd task owns all request handling; this task only feeds the
//! watchdog and keeps Wi-Fi alive.
#![deny(unused_must_use)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::prelude::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::{error, info, warn};

use ledweb::adapters::hardware::HardwareAdapter;
use ledweb::adapters::http_server;
use ledweb::adapters::log_sink::LogEventSink;
use ledweb::adapters::time::MonotonicClock;
use ledweb::adapters::wifi::{ConnectivityPort, WifiAdapter};
use ledweb::app::service::LedService;
use ledweb::config::SystemConfig;
use ledweb::drivers::hw_init;
use ledweb::drivers::led_bank::LedBank;
use ledweb::drivers::watchdog::Watchdog;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("LED web controller v{}", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();
    config.validate()?;

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_led_pwm() {
        // Without PWM nothing works.
        error!("LEDC init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // ── 3. Wi-Fi ──────────────────────────────────────────────
    let mut wifi = WifiAdapter::new(config.wifi_connect_timeout_ms);
    wifi.attach(BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs))?,
        sysloop,
    )?);
    wifi.set_credentials(&config.wifi_ssid, &config.wifi_password)?;
    wifi.connect_with_retry(config.wifi_connect_attempts, config.wifi_retry_delay_ms)?;
    match wifi.ip_addr() {
        Some(ip) => info!("WiFi connected, open http://{}/", ip),
        None => warn!("WiFi connected but no IPv4 address yet"),
    }

    // ── 4. LED service + HTTP server ──────────────────────────
    let mut service = LedService::new(
        &config,
        HardwareAdapter::new(LedBank::new()),
        LogEventSink::new(),
    )?;
    service.start();
    let service = Arc::new(Mutex::new(service));

    let _server = http_server::start(&config, service)?;

    // ── 5. Housekeeping loop ──────────────────────────────────
    // Armed only now: the boot connect above blocks for as long as the
    // AP takes, and poll() below never blocks.
    let watchdog = Watchdog::new(config.watchdog_timeout_ms);
    let clock = MonotonicClock::new();
    let delay = Duration::from_millis(u64::from(config.loop_delay_ms));
    info!("System ready");

    loop {
        watchdog.feed();
        wifi.poll(clock.uptime_ms());
        std::thread::sleep(delay);
    }
}
