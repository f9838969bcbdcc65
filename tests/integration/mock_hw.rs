//! Mock adapters for integration tests.
//!
//! Records every PWM write and every emitted event so tests can assert
//! on the full history without touching real LEDC registers.

use ledweb::app::events::AppEvent;
use ledweb::app::ports::{EventSink, LedOutputPort};
use ledweb::app::service::LedService;
use ledweb::config::SystemConfig;
use ledweb::pins::{LED_COUNT, LED_PINS};

// ── MockLeds ──────────────────────────────────────────────────

/// One `write_duty` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutyWrite {
    pub pin: i32,
    pub duty: u8,
}

#[derive(Debug, Default)]
pub struct MockLeds {
    pub writes: Vec<DutyWrite>,
}

#[allow(dead_code)]
impl MockLeds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last duty written to `pin`, if any.
    pub fn last_duty(&self, pin: i32) -> Option<u8> {
        self.writes.iter().rev().find(|w| w.pin == pin).map(|w| w.duty)
    }

    /// Last duty per channel, in index order.
    pub fn levels(&self) -> [Option<u8>; LED_COUNT] {
        LED_PINS.map(|pin| self.last_duty(pin))
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl LedOutputPort for MockLeds {
    fn write_duty(&mut self, pin: i32, duty: u8) {
        self.writes.push(DutyWrite { pin, duty });
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── Helpers ───────────────────────────────────────────────────

pub type TestService = LedService<MockLeds, RecordingSink>;

/// A started service with the default config.
pub fn started_service() -> TestService {
    started_service_with(&SystemConfig::default())
}

pub fn started_service_with(config: &SystemConfig) -> TestService {
    let mut svc = LedService::new(config, MockLeds::new(), RecordingSink::default())
        .expect("default pins are unique");
    svc.start();
    svc
}
