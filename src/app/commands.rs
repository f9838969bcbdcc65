//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (today only the
//! HTTP API) that the [`LedService`](super::service::LedService) applies
//! to the registry.

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Switch one channel on or off.
    SetLed { index: usize, on: bool },

    /// Switch every channel on or off, in index order.
    SetAll { on: bool },
}
