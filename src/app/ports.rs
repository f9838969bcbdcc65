//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ LedService (domain)
//! ```
//!
//! Driven adapters (PWM outputs, ADC inputs, event sinks) implement these
//! traits.  The [`LedService`](super::service::LedService) consumes them via
//! generics, so the domain core never touches hardware directly.

// ───────────────────────────────────────────────────────────────
// LED output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the registry calls this once per channel change.
pub trait LedOutputPort {
    /// Set the PWM duty (0–255) of the LED wired to `pin`.
    fn write_duty(&mut self, pin: i32, duty: u8);
}

// ───────────────────────────────────────────────────────────────
// Analog input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for a single analog channel.
pub trait AnalogInputPort {
    /// Raw ADC count (0–4095 at 12-bit resolution).
    fn read_raw(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, test
/// recorder, ...).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
