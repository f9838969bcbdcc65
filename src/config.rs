//! System configuration parameters
//!
//! All tunable parameters for the LED controller and the potentiometer
//! image.  Nothing is persisted: every boot starts from [`SystemConfig::default`],
//! with Wi-Fi credentials baked in at compile time from the `WIFI_SSID` and
//! `WIFI_PASS` environment variables.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::adapters::utils;

/// What the API does with an `action` that is neither `"on"` nor `"off"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownActionPolicy {
    /// Answer 400 `{"error":"Unknown action"}`.
    #[default]
    Reject,
    /// Answer 200 `{"success":true}` and change nothing.
    Ignore,
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Wi-Fi ---
    pub wifi_ssid: String,
    pub wifi_password: String,
    /// Connect attempts at boot before giving up (0 = retry forever).
    pub wifi_connect_attempts: u32,
    /// Pause between boot-time connect attempts (milliseconds)
    pub wifi_retry_delay_ms: u32,
    /// How long a background reconnect may stay unassociated before it
    /// counts as failed (milliseconds)
    pub wifi_connect_timeout_ms: u32,

    // --- HTTP ---
    pub http_port: u16,
    /// Stack size of the httpd task (bytes)
    pub http_stack_size: usize,
    /// Largest request body accepted (bytes)
    pub max_body_bytes: usize,
    pub unknown_action: UnknownActionPolicy,

    // --- LEDs ---
    /// Duty written when an LED is switched on (1-255)
    pub default_brightness: u8,

    // --- Timing ---
    /// Housekeeping loop pause (milliseconds)
    pub loop_delay_ms: u32,
    /// Potentiometer sample period (milliseconds)
    pub pot_sample_interval_ms: u32,
    /// Task watchdog timeout for the housekeeping loop (milliseconds)
    pub watchdog_timeout_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Wi-Fi
            wifi_ssid: option_env!("WIFI_SSID").unwrap_or("YOUR_WIFI_SSID").to_string(),
            wifi_password: option_env!("WIFI_PASS").unwrap_or("YOUR_WIFI_PASSWORD").to_string(),
            wifi_connect_attempts: 0,
            wifi_retry_delay_ms: 1_000,
            wifi_connect_timeout_ms: 15_000,

            // HTTP
            http_port: 80,
            http_stack_size: 10 * 1024,
            max_body_bytes: 512,
            unknown_action: UnknownActionPolicy::Reject,

            // LEDs
            default_brightness: 255,

            // Timing
            loop_delay_ms: 10,           // 100 Hz housekeeping
            pot_sample_interval_ms: 200, // 5 Hz
            watchdog_timeout_ms: 10_000,
        }
    }
}

impl SystemConfig {
    /// Reject values that would leave the firmware unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !utils::is_valid_ssid(&self.wifi_ssid) {
            return Err(ConfigError::ValidationFailed(
                "wifi_ssid must be 1-32 printable ASCII bytes",
            ));
        }
        if !utils::is_valid_password(&self.wifi_password) {
            return Err(ConfigError::ValidationFailed(
                "wifi_password must be empty or 8-64 bytes",
            ));
        }
        if self.wifi_connect_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "wifi_connect_timeout_ms must be non-zero",
            ));
        }
        if self.http_port == 0 {
            return Err(ConfigError::ValidationFailed("http_port must be non-zero"));
        }
        if !(16..=4096).contains(&self.max_body_bytes) {
            return Err(ConfigError::ValidationFailed("max_body_bytes must be 16-4096"));
        }
        if self.default_brightness == 0 {
            return Err(ConfigError::ValidationFailed(
                "default_brightness 0 makes 'on' indistinguishable from 'off'",
            ));
        }
        if self.pot_sample_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("pot_sample_interval_ms must be non-zero"));
        }
        if self.watchdog_timeout_ms <= self.loop_delay_ms.max(self.pot_sample_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "watchdog_timeout_ms must exceed the loop and sample periods",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The `&'static str` names the field and the accepted range.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
