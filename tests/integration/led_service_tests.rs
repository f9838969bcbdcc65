//! Integration tests for the LedService → registry → output port chain.

use ledweb::app::commands::AppCommand;
use ledweb::app::events::AppEvent;
use ledweb::app::registry::LedRegistry;
use ledweb::error::RegistryError;
use ledweb::pins::{LED_COUNT, LED_PINS};

use super::mock_hw::{started_service, DutyWrite};

#[test]
fn start_writes_every_channel_low() {
    let svc = started_service();
    assert_eq!(svc.hardware().writes.len(), LED_COUNT);
    assert!(svc.hardware().levels().iter().all(|d| *d == Some(0)));
    assert_eq!(svc.sink().events, vec![AppEvent::Started { channels: LED_COUNT }]);
    assert!(svc.status().iter().all(|s| !s.is_on && s.brightness == 255));
}

#[test]
fn set_one_on_then_off_for_every_index() {
    let mut svc = started_service();
    for i in 0..LED_COUNT {
        svc.handle_command(AppCommand::SetLed { index: i, on: true }).unwrap();
        let status = svc.status();
        assert!(status[i].is_on);
        assert_eq!(svc.hardware().last_duty(LED_PINS[i]), Some(255));

        svc.handle_command(AppCommand::SetLed { index: i, on: false }).unwrap();
        assert!(!svc.status()[i].is_on);
        assert_eq!(svc.hardware().last_duty(LED_PINS[i]), Some(0));
    }
}

#[test]
fn set_one_writes_exactly_one_duty() {
    let mut svc = started_service();
    let before = svc.hardware().writes.len();
    svc.handle_command(AppCommand::SetLed { index: 3, on: true }).unwrap();
    assert_eq!(
        &svc.hardware().writes[before..],
        &[DutyWrite { pin: LED_PINS[3], duty: 255 }]
    );
}

#[test]
fn set_one_is_idempotent() {
    let mut svc = started_service();
    svc.handle_command(AppCommand::SetLed { index: 5, on: true }).unwrap();
    let once = svc.status();
    svc.handle_command(AppCommand::SetLed { index: 5, on: true }).unwrap();
    assert_eq!(svc.status(), once);
}

#[test]
fn set_all_writes_each_channel_once_in_order() {
    let mut svc = started_service();
    let before = svc.hardware().writes.len();
    svc.handle_command(AppCommand::SetAll { on: true }).unwrap();

    let writes = &svc.hardware().writes[before..];
    assert_eq!(writes.len(), LED_COUNT);
    for (w, pin) in writes.iter().zip(LED_PINS) {
        assert_eq!(*w, DutyWrite { pin, duty: 255 });
    }
    assert!(svc.status().iter().all(|s| s.is_on));

    svc.handle_command(AppCommand::SetAll { on: false }).unwrap();
    assert!(svc.status().iter().all(|s| !s.is_on));
    assert!(svc.hardware().levels().iter().all(|d| *d == Some(0)));
}

#[test]
fn out_of_range_leaves_state_and_hardware_untouched() {
    let mut svc = started_service();
    svc.handle_command(AppCommand::SetLed { index: 1, on: true }).unwrap();
    let status = svc.status();
    let writes = svc.hardware().writes.len();
    let events = svc.sink().events.len();

    assert_eq!(
        svc.handle_command(AppCommand::SetLed { index: LED_COUNT, on: true }),
        Err(RegistryError::OutOfRange(LED_COUNT as i64))
    );
    assert_eq!(svc.status(), status);
    assert_eq!(svc.hardware().writes.len(), writes);
    assert_eq!(svc.sink().events.len(), events);
}

#[test]
fn negative_wire_index_is_out_of_range() {
    assert_eq!(LedRegistry::resolve_index(-1), Err(RegistryError::OutOfRange(-1)));
    assert_eq!(LedRegistry::resolve_index(8), Err(RegistryError::OutOfRange(8)));
    assert_eq!(LedRegistry::resolve_index(7), Ok(7));
}

#[test]
fn blink_interval_reads_zero_after_any_operation() {
    let mut svc = started_service();
    svc.handle_command(AppCommand::SetLed { index: 0, on: true }).unwrap();
    svc.handle_command(AppCommand::SetAll { on: false }).unwrap();
    assert!(svc.status().iter().all(|s| s.blink_interval_ms == 0));
}

#[test]
fn events_follow_commands() {
    let mut svc = started_service();
    svc.handle_command(AppCommand::SetLed { index: 2, on: true }).unwrap();
    svc.handle_command(AppCommand::SetAll { on: false }).unwrap();
    assert_eq!(
        &svc.sink().events[1..],
        &[
            AppEvent::LedChanged { index: 2, on: true },
            AppEvent::AllChanged { on: false },
        ]
    );
}

#[test]
fn duplicate_pins_are_rejected() {
    let mut pins = LED_PINS;
    pins[7] = pins[0];
    assert_eq!(
        LedRegistry::new(pins, 255).err(),
        Some(RegistryError::DuplicatePin(LED_PINS[0]))
    );
}
