//! JSON wire types for the LED API.
//!
//! Requests are decoded strictly: a missing or mistyped field is an
//! [`ApiError::MalformedJson`], never a silent default.  Unknown extra
//! fields (the browser page sends a `value` alongside `action`) are
//! ignored.
//!
//! ```text
//! POST /api/led   {"led": 3, "action": "on"}
//! POST /api/all   {"action": "off"}
//! GET  /api/status → {"leds":[{"isOn":true,"brightness":255,"blinkInterval":0}, ...]}
//! ```

use core::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::app::registry::ChannelStatus;
use crate::error::ApiError;

// ── Requests ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LedRequest {
    /// Signed so that `-1` reports as out of range rather than malformed.
    pub led: i64,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AllRequest {
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    On,
    Off,
}

impl Action {
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl FromStr for Action {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            _ => Err(ApiError::UnknownAction),
        }
    }
}

/// Decode a request body into `T`.
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    if body.is_empty() {
        return Err(ApiError::MissingBody);
    }
    serde_json::from_slice(body).map_err(|_| ApiError::MalformedJson)
}

// ── Responses ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LedStatus {
    is_on: bool,
    brightness: u8,
    blink_interval: u32,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    leds: Vec<LedStatus>,
}

#[derive(Debug, Serialize)]
struct SuccessResponse {
    success: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
}

pub fn encode_status(channels: &[ChannelStatus]) -> String {
    let leds = channels
        .iter()
        .map(|s| LedStatus {
            is_on: s.is_on,
            brightness: s.brightness,
            blink_interval: s.blink_interval_ms,
        })
        .collect();
    encode(&StatusResponse { leds })
}

pub fn encode_success() -> String {
    encode(&SuccessResponse { success: true })
}

pub fn encode_error(error: ApiError) -> String {
    encode(&ErrorResponse {
        error: error.message(),
    })
}

fn encode<T: Serialize>(value: &T) -> String {
    // Only plain structs of bools, integers and strings pass through here.
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("response encoding failed: {}", e);
        String::from("{}")
    })
}
