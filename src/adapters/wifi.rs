//! WiFi station-mode adapter.
//!
//! Implements [`ConnectivityPort`], the boundary for network connectivity.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: owns a `BlockingWifi<EspWifi>` handed in
//!   by `main` via [`WifiAdapter::attach`].
//! - **all other targets**: deterministic simulation for host-side tests.
//!
//! ## Reconnection policy
//!
//! At boot `main` calls [`WifiAdapter::connect_with_retry`], which blocks
//! until associated (or the configured attempts run out).  This happens
//! before the task watchdog is armed.
//!
//! Afterwards the housekeeping loop calls [`ConnectivityPort::poll`],
//! which never blocks: on link loss it starts an association, checks on
//! it in later polls, and gives up after `connect_timeout_ms`.  Failed
//! attempts wait an exponential backoff (2 s → 4 s → 8 s … capped at
//! 60 s) before the next one.

use core::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

use log::{error, info, warn};

#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};

use super::utils;

// ───────────────────────────────────────────────────────────────
// Port trait
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityError {
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    ConnectionFailed,
    /// No radio driver has been attached yet.
    NoDriver,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
            Self::NoDriver => write!(f, "WiFi driver not attached"),
        }
    }
}

impl std::error::Error for ConnectivityError {}

pub trait ConnectivityPort {
    /// Blocking connect.  Succeeds immediately when already connected.
    fn connect(&mut self) -> Result<(), ConnectivityError>;
    fn is_connected(&self) -> bool;
    /// Non-blocking health check; `now_ms` drives the reconnect timers.
    fn poll(&mut self, now_ms: u64);
    fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError>;
}

// ───────────────────────────────────────────────────────────────
// Connection state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    Disconnected,
    Connected,
    /// Waiting for the backoff to elapse before the next attempt.
    Reconnecting { attempt: u32 },
    /// An attempt is in flight; gives up at `deadline_ms`.
    Associating { attempt: u32, deadline_ms: u64 },
}

const INITIAL_BACKOFF_MS: u64 = 2_000;
const MAX_BACKOFF_MS: u64 = 60_000;

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if utils::is_valid_ssid(ssid) {
        Ok(())
    } else {
        Err(ConnectivityError::InvalidSsid)
    }
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if utils::is_valid_password(password) {
        Ok(())
    } else {
        Err(ConnectivityError::InvalidPassword)
    }
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    state: WifiState,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    connect_timeout_ms: u64,
    backoff_ms: u64,
    next_retry_ms: u64,
    #[cfg(target_os = "espidf")]
    driver: Option<BlockingWifi<EspWifi<'static>>>,
    /// Simulation: number of association attempts so far.
    #[cfg(not(target_os = "espidf"))]
    sim_connect_counter: u32,
    /// Simulation: attempts up to this count fail.
    #[cfg(not(target_os = "espidf"))]
    sim_fail_first: u32,
    /// Simulation: associations start but never complete.
    #[cfg(not(target_os = "espidf"))]
    sim_stalled: bool,
    #[cfg(not(target_os = "espidf"))]
    sim_link_up: bool,
}

impl WifiAdapter {
    pub fn new(connect_timeout_ms: u32) -> Self {
        Self {
            state: WifiState::Disconnected,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            connect_timeout_ms: u64::from(connect_timeout_ms),
            backoff_ms: INITIAL_BACKOFF_MS,
            next_retry_ms: 0,
            #[cfg(target_os = "espidf")]
            driver: None,
            #[cfg(not(target_os = "espidf"))]
            sim_connect_counter: 0,
            #[cfg(not(target_os = "espidf"))]
            sim_fail_first: 0,
            #[cfg(not(target_os = "espidf"))]
            sim_stalled: false,
            #[cfg(not(target_os = "espidf"))]
            sim_link_up: false,
        }
    }

    pub fn state(&self) -> WifiState {
        self.state
    }

    /// Hand over the radio driver created from the modem peripheral.
    #[cfg(target_os = "espidf")]
    pub fn attach(&mut self, driver: BlockingWifi<EspWifi<'static>>) {
        self.driver = Some(driver);
    }

    /// Connect, retrying up to `attempts` times (`0` = forever) with
    /// `retry_delay_ms` between attempts.  Blocks the calling task, so
    /// call it before subscribing that task to the watchdog.
    pub fn connect_with_retry(
        &mut self,
        attempts: u32,
        retry_delay_ms: u32,
    ) -> Result<(), ConnectivityError> {
        let mut attempt: u32 = 0;
        loop {
            attempt = attempt.saturating_add(1);
            match self.connect() {
                Ok(()) => return Ok(()),
                Err(e @ (ConnectivityError::NoCredentials | ConnectivityError::NoDriver)) => {
                    return Err(e);
                }
                Err(e) => {
                    if attempts != 0 && attempt >= attempts {
                        error!("WiFi: giving up after {} attempts", attempt);
                        return Err(e);
                    }
                    warn!("WiFi: attempt {} failed, retrying in {} ms", attempt, retry_delay_ms);
                    std::thread::sleep(Duration::from_millis(u64::from(retry_delay_ms)));
                }
            }
        }
    }

    /// Station IPv4 address once DHCP has completed.
    pub fn ip_addr(&self) -> Option<Ipv4Addr> {
        if self.state != WifiState::Connected {
            return None;
        }
        self.platform_ip_addr()
    }

    fn on_connected(&mut self) {
        self.state = WifiState::Connected;
        self.backoff_ms = INITIAL_BACKOFF_MS;
    }

    fn schedule_retry(&mut self, now_ms: u64, attempt: u32) {
        self.backoff_ms = (self.backoff_ms * 2).min(MAX_BACKOFF_MS);
        self.next_retry_ms = now_ms + self.backoff_ms;
        self.state = WifiState::Reconnecting {
            attempt: attempt + 1,
        };
    }

    // ── Simulation controls ───────────────────────────────────

    /// Make the next `n` connect attempts fail.
    #[cfg(not(target_os = "espidf"))]
    pub fn simulate_failures(&mut self, n: u32) {
        self.sim_fail_first = self.sim_connect_counter + n;
    }

    /// Drop the link as if the AP went away.
    #[cfg(not(target_os = "espidf"))]
    pub fn simulate_link_loss(&mut self) {
        self.sim_link_up = false;
    }

    /// Let associations start but never come up (AP out of range).
    #[cfg(not(target_os = "espidf"))]
    pub fn simulate_stalled_association(&mut self, stalled: bool) {
        self.sim_stalled = stalled;
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn connect_attempts(&self) -> u32 {
        self.sim_connect_counter
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn backoff_ms(&self) -> u64 {
        self.backoff_ms
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        let Some(wifi) = self.driver.as_mut() else {
            return Err(ConnectivityError::NoDriver);
        };

        let auth_method = if self.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let config = Configuration::Client(ClientConfiguration {
            ssid: self
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidSsid)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidPassword)?,
            auth_method,
            ..Default::default()
        });

        let step = |what: &str, r: Result<(), esp_idf_svc::sys::EspError>| {
            r.map_err(|e| {
                warn!("WiFi(espidf): {} failed: {}", what, e);
                ConnectivityError::ConnectionFailed
            })
        };

        step("set_configuration", wifi.set_configuration(&config))?;
        if !wifi.is_started().unwrap_or(false) {
            step("start", wifi.start())?;
        }
        step("connect", wifi.connect())?;
        step("wait_netif_up", wifi.wait_netif_up())?;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        self.platform_start_connect()?;
        if self.sim_link_up {
            Ok(())
        } else {
            Err(ConnectivityError::ConnectionFailed)
        }
    }

    /// Kick off an association without waiting for it.
    #[cfg(target_os = "espidf")]
    fn platform_start_connect(&mut self) -> Result<(), ConnectivityError> {
        let Some(wifi) = self.driver.as_mut() else {
            return Err(ConnectivityError::NoDriver);
        };
        // EspWifi::connect only issues esp_wifi_connect(); the blocking
        // wait lives in the BlockingWifi wrapper, which we bypass here.
        wifi.wifi_mut().connect().map_err(|e| {
            warn!("WiFi(espidf): connect start failed: {}", e);
            ConnectivityError::ConnectionFailed
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_start_connect(&mut self) -> Result<(), ConnectivityError> {
        self.sim_connect_counter = self.sim_connect_counter.wrapping_add(1);
        if self.sim_connect_counter <= self.sim_fail_first {
            warn!("WiFi(sim): simulated failure (attempt {})", self.sim_connect_counter);
            return Err(ConnectivityError::ConnectionFailed);
        }
        self.sim_link_up = !self.sim_stalled;
        Ok(())
    }

    /// Associated and the station netif has an address.
    #[cfg(target_os = "espidf")]
    fn platform_is_up(&self) -> bool {
        self.driver
            .as_ref()
            .is_some_and(|w| w.is_up().unwrap_or(false))
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_up(&self) -> bool {
        self.sim_link_up
    }

    #[cfg(target_os = "espidf")]
    fn platform_ip_addr(&self) -> Option<Ipv4Addr> {
        let wifi = self.driver.as_ref()?;
        wifi.wifi().sta_netif().get_ip_info().ok().map(|info| info.ip)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_ip_addr(&self) -> Option<Ipv4Addr> {
        self.sim_link_up.then_some(Ipv4Addr::new(192, 168, 1, 50))
    }
}

// ───────────────────────────────────────────────────────────────
// ConnectivityPort
// ───────────────────────────────────────────────────────────────

impl ConnectivityPort for WifiAdapter {
    fn connect(&mut self) -> Result<(), ConnectivityError> {
        if self.ssid.is_empty() {
            return Err(ConnectivityError::NoCredentials);
        }
        if self.state == WifiState::Connected {
            return Ok(());
        }

        info!("WiFi: connecting to '{}'", self.ssid);
        match self.platform_connect() {
            Ok(()) => {
                self.on_connected();
                info!("WiFi: connected");
                Ok(())
            }
            Err(e) => {
                error!("WiFi: connection failed: {}", e);
                self.state = WifiState::Reconnecting { attempt: 0 };
                Err(e)
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.state == WifiState::Connected && self.platform_is_up()
    }

    fn poll(&mut self, now_ms: u64) {
        match self.state {
            WifiState::Reconnecting { attempt } => {
                if now_ms < self.next_retry_ms {
                    return;
                }
                info!("WiFi: reconnect attempt {} (backoff {} ms)", attempt, self.backoff_ms);
                match self.platform_start_connect() {
                    Ok(()) => {
                        self.state = WifiState::Associating {
                            attempt,
                            deadline_ms: now_ms + self.connect_timeout_ms,
                        };
                    }
                    Err(_) => self.schedule_retry(now_ms, attempt),
                }
            }
            WifiState::Associating {
                attempt,
                deadline_ms,
            } => {
                if self.platform_is_up() {
                    self.on_connected();
                    info!("WiFi: reconnected after {} attempts", attempt + 1);
                } else if now_ms >= deadline_ms {
                    warn!("WiFi: association timed out");
                    self.schedule_retry(now_ms, attempt);
                }
            }
            WifiState::Connected => {
                if !self.platform_is_up() {
                    warn!("WiFi: connection lost, entering reconnect");
                    self.state = WifiState::Reconnecting { attempt: 0 };
                    self.next_retry_ms = now_ms + self.backoff_ms;
                }
            }
            WifiState::Disconnected => {}
        }
    }

    fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        self.ssid.clear();
        self.ssid
            .push_str(ssid)
            .map_err(|_| ConnectivityError::InvalidSsid)?;
        self.password.clear();
        self.password
            .push_str(password)
            .map_err(|_| ConnectivityError::InvalidPassword)?;
        info!("WiFi: credentials set (SSID='{}')", self.ssid);
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
