//! Outbound application events.
//!
//! The [`LedService`](super::service::LedService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (serial log, test recorder).

use crate::error::ApiError;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The registry is initialised and every output written low.
    Started { channels: usize },

    /// One channel was switched.  `index` is zero-based.
    LedChanged { index: usize, on: bool },

    /// Every channel was switched.
    AllChanged { on: bool },

    /// A request was refused before reaching the registry.
    RequestRejected { route: &'static str, error: ApiError },
}
