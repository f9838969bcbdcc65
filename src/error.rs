//! Error types shared by the LED registry and the HTTP API.
//!
//! All variants are `Copy` so they can be passed through the service and
//! into event payloads without allocation.  Each API error knows its own
//! HTTP status and wire message; handlers never build status codes by hand.

use core::fmt;

// ---------------------------------------------------------------------------
// Registry errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// Channel index outside `[0, LED_COUNT)`.  Carries the raw index.
    OutOfRange(i64),
    /// Two channels were configured with the same GPIO.
    DuplicatePin(i32),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(i) => write!(f, "LED index {i} out of range"),
            Self::DuplicatePin(pin) => write!(f, "GPIO {pin} assigned to more than one LED"),
        }
    }
}

impl std::error::Error for RegistryError {}

// ---------------------------------------------------------------------------
// HTTP API errors
// ---------------------------------------------------------------------------

/// Request-level failures.  Recovered locally in the handler and surfaced
/// to the client as a status code plus `{"error": "<message>"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// POST with an empty body.
    MissingBody,
    /// Body is not JSON, or a required field is missing or mistyped.
    MalformedJson,
    /// `led` outside the channel range.
    OutOfRange,
    /// `action` is neither `"on"` nor `"off"`.
    UnknownAction,
    /// Body exceeds the configured maximum.
    BodyTooLarge,
    NotFound,
    MethodNotAllowed,
    /// A server-side invariant broke while handling the request.
    Internal,
}

impl ApiError {
    pub const fn status(self) -> u16 {
        match self {
            Self::MissingBody | Self::MalformedJson | Self::OutOfRange | Self::UnknownAction => 400,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::BodyTooLarge => 413,
            Self::Internal => 500,
        }
    }

    /// Message placed in the `error` field of the response body.
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingBody => "No body",
            Self::MalformedJson => "Invalid JSON",
            Self::OutOfRange => "Invalid LED index",
            Self::UnknownAction => "Unknown action",
            Self::BodyTooLarge => "Body too large",
            Self::NotFound => "Not found",
            Self::MethodNotAllowed => "Method not allowed",
            Self::Internal => "Internal error",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.status())
    }
}

impl std::error::Error for ApiError {}

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::OutOfRange(_) => Self::OutOfRange,
            // A pin table fault is the server's, not the client's.
            RegistryError::DuplicatePin(_) => Self::Internal,
        }
    }
}
