//! Application service: the hexagonal core.
//!
//! [`LedService`] owns the registry together with the output port and the
//! event sink it reports to.  Commands go in, hardware writes and
//! [`AppEvent`]s come out.
//!
//! ```text
//!  AppCommand ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       LedService        │
//!                 │   LedRegistry (8 ch)    │ ──▶ LedOutputPort
//!                 └────────────────────────┘
//! ```
//!
//! The HTTP server shares one instance between its route handlers; all
//! calls arrive on the single httpd task, one request at a time.

use log::info;

use crate::config::SystemConfig;
use crate::error::RegistryError;
use crate::pins::{LED_COUNT, LED_PINS};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{EventSink, LedOutputPort};
use super::registry::{ChannelStatus, LedRegistry};

pub struct LedService<H: LedOutputPort, S: EventSink> {
    registry: LedRegistry,
    hw: H,
    sink: S,
}

impl<H: LedOutputPort, S: EventSink> LedService<H, S> {
    /// Construct the service from configuration.
    ///
    /// Does **not** write any output; call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig, hw: H, sink: S) -> Result<Self, RegistryError> {
        let registry = LedRegistry::new(LED_PINS, config.default_brightness)?;
        Ok(Self { registry, hw, sink })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every LED low and announce the service.
    pub fn start(&mut self) {
        self.registry.init(&mut self.hw);
        self.sink.emit(&AppEvent::Started { channels: LED_COUNT });
        info!("LedService started with {} channels", LED_COUNT);
    }

    // ── Command handling ──────────────────────────────────────

    pub fn handle_command(&mut self, cmd: AppCommand) -> Result<(), RegistryError> {
        match cmd {
            AppCommand::SetLed { index, on } => {
                self.registry.set_one(index, on, &mut self.hw)?;
                self.sink.emit(&AppEvent::LedChanged { index, on });
            }
            AppCommand::SetAll { on } => {
                self.registry.set_all(on, &mut self.hw);
                self.sink.emit(&AppEvent::AllChanged { on });
            }
        }
        Ok(())
    }

    /// Forward an event raised outside the registry (e.g. a rejected request).
    pub fn report(&mut self, event: AppEvent) {
        self.sink.emit(&event);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn status(&self) -> [ChannelStatus; LED_COUNT] {
        self.registry.get_all()
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullHw;
    impl LedOutputPort for NullHw {
        fn write_duty(&mut self, _pin: i32, _duty: u8) {}
    }

    #[derive(Default)]
    struct Events(Vec<AppEvent>);
    impl EventSink for Events {
        fn emit(&mut self, event: &AppEvent) {
            self.0.push(*event);
        }
    }

    fn service() -> LedService<NullHw, Events> {
        LedService::new(&SystemConfig::default(), NullHw, Events::default()).unwrap()
    }

    #[test]
    fn start_emits_started() {
        let mut svc = service();
        svc.start();
        assert_eq!(svc.sink().0, vec![AppEvent::Started { channels: LED_COUNT }]);
    }

    #[test]
    fn rejected_command_emits_nothing() {
        let mut svc = service();
        let r = svc.handle_command(AppCommand::SetLed { index: 99, on: true });
        assert_eq!(r, Err(RegistryError::OutOfRange(99)));
        assert!(svc.sink().0.is_empty());
    }

    #[test]
    fn set_all_emits_single_event() {
        let mut svc = service();
        svc.handle_command(AppCommand::SetAll { on: true }).unwrap();
        assert_eq!(svc.sink().0, vec![AppEvent::AllChanged { on: true }]);
        assert!(svc.status().iter().all(|s| s.is_on));
    }

    #[test]
    fn brightness_comes_from_config() {
        let config = SystemConfig {
            default_brightness: 40,
            ..SystemConfig::default()
        };
        let svc = LedService::new(&config, NullHw, Events::default()).unwrap();
        assert!(svc.status().iter().all(|s| s.brightness == 40));
    }
}
