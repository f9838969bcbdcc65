//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the
//! ESP-IDF logger (UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { channels } => {
                info!("START | {} LED channels ready, all OFF", channels);
            }
            AppEvent::LedChanged { index, on } => {
                info!("LED   | LED {} turned {}", index + 1, on_off(*on));
            }
            AppEvent::AllChanged { on } => {
                info!("LED   | All LEDs turned {}", on_off(*on));
            }
            AppEvent::RequestRejected { route, error } => {
                warn!("HTTP  | {} rejected: {}", route, error);
            }
        }
    }
}
