//! Integration tests for the HTTP API: router → service → mock hardware.
//!
//! Requests go through [`ApiRouter::dispatch`] exactly as the ESP-IDF
//! server adapter calls it, minus the socket.

use ledweb::app::events::AppEvent;
use ledweb::config::{SystemConfig, UnknownActionPolicy};
use ledweb::error::ApiError;
use ledweb::http::router::ApiRouter;
use ledweb::http::{ApiResponse, Method};
use ledweb::pins::{LED_COUNT, LED_PINS};

use super::mock_hw::{started_service, started_service_with, TestService};

fn post(router: &ApiRouter, svc: &mut TestService, path: &str, body: &str) -> ApiResponse {
    router.dispatch(svc, Method::Post, path, body.as_bytes())
}

fn status_json(router: &ApiRouter, svc: &mut TestService) -> serde_json::Value {
    let resp = router.dispatch(svc, Method::Get, "/api/status", b"");
    assert_eq!(resp.status, 200);
    serde_json::from_str(&resp.body).unwrap()
}

fn setup() -> (ApiRouter, TestService) {
    (ApiRouter::new(&SystemConfig::default()), started_service())
}

// ── Status ────────────────────────────────────────────────────

#[test]
fn status_lists_every_channel_off() {
    let (router, mut svc) = setup();
    let json = status_json(&router, &mut svc);
    let leds = json["leds"].as_array().unwrap();
    assert_eq!(leds.len(), LED_COUNT);
    for led in leds {
        assert_eq!(led["isOn"], false);
        assert_eq!(led["brightness"], 255);
        assert_eq!(led["blinkInterval"], 0);
    }
}

#[test]
fn status_has_no_side_effects() {
    let (router, mut svc) = setup();
    let writes = svc.hardware().writes.len();
    let events = svc.sink().events.len();
    status_json(&router, &mut svc);
    assert_eq!(svc.hardware().writes.len(), writes);
    assert_eq!(svc.sink().events.len(), events);
}

// ── POST /api/led ─────────────────────────────────────────────

#[test]
fn led_on_succeeds_and_shows_in_status() {
    let (router, mut svc) = setup();
    let resp = post(&router, &mut svc, "/api/led", r#"{"led":0,"action":"on"}"#);
    assert_eq!(resp, ApiResponse { status: 200, body: r#"{"success":true}"#.into() });

    let json = status_json(&router, &mut svc);
    assert_eq!(json["leds"][0]["isOn"], true);
    assert_eq!(json["leds"][1]["isOn"], false);
    assert_eq!(svc.hardware().last_duty(LED_PINS[0]), Some(255));
}

#[test]
fn led_without_body_is_no_body() {
    let (router, mut svc) = setup();
    let resp = post(&router, &mut svc, "/api/led", "");
    assert_eq!(resp.status, 400);
    assert_eq!(resp.body, r#"{"error":"No body"}"#);
}

#[test]
fn led_with_garbage_is_invalid_json() {
    let (router, mut svc) = setup();
    let resp = post(&router, &mut svc, "/api/led", "led=1&action=on");
    assert_eq!(resp.status, 400);
    assert_eq!(resp.body, r#"{"error":"Invalid JSON"}"#);
}

#[test]
fn led_missing_index_is_invalid_json_not_led_zero() {
    let (router, mut svc) = setup();
    let resp = post(&router, &mut svc, "/api/led", r#"{"action":"on"}"#);
    assert_eq!(resp.body, r#"{"error":"Invalid JSON"}"#);
    assert!(svc.status().iter().all(|s| !s.is_on));
}

#[test]
fn led_index_bounds() {
    let (router, mut svc) = setup();
    for bad in ["-1", "8", "1000"] {
        let body = format!(r#"{{"led":{},"action":"on"}}"#, bad);
        let resp = post(&router, &mut svc, "/api/led", &body);
        assert_eq!(resp.status, 400, "index {bad}");
        assert_eq!(resp.body, r#"{"error":"Invalid LED index"}"#);
    }
    assert!(svc.status().iter().all(|s| !s.is_on));

    let resp = post(&router, &mut svc, "/api/led", r#"{"led":7,"action":"on"}"#);
    assert!(resp.is_success());
}

#[test]
fn led_unknown_action_rejected_by_default() {
    let (router, mut svc) = setup();
    let writes = svc.hardware().writes.len();
    let resp = post(&router, &mut svc, "/api/led", r#"{"led":1,"action":"toggle"}"#);
    assert_eq!(resp.status, 400);
    assert_eq!(resp.body, r#"{"error":"Unknown action"}"#);
    assert_eq!(svc.hardware().writes.len(), writes);
}

#[test]
fn led_unknown_action_ignored_under_ignore_policy() {
    let config = SystemConfig {
        unknown_action: UnknownActionPolicy::Ignore,
        ..SystemConfig::default()
    };
    let router = ApiRouter::new(&config);
    let mut svc = started_service_with(&config);
    let writes = svc.hardware().writes.len();

    let resp = post(&router, &mut svc, "/api/led", r#"{"led":1,"action":"toggle"}"#);
    assert_eq!(resp.body, r#"{"success":true}"#);
    assert_eq!(svc.hardware().writes.len(), writes);
    assert!(svc.status().iter().all(|s| !s.is_on));
}

#[test]
fn index_is_checked_before_action() {
    let (router, mut svc) = setup();
    let resp = post(&router, &mut svc, "/api/led", r#"{"led":9,"action":"toggle"}"#);
    assert_eq!(resp.body, r#"{"error":"Invalid LED index"}"#);
}

#[test]
fn front_end_value_field_is_ignored() {
    let (router, mut svc) = setup();
    let resp = post(&router, &mut svc, "/api/led", r#"{"led":4,"action":"on","value":1}"#);
    assert!(resp.is_success());
    assert!(svc.status()[4].is_on);
}

// ── POST /api/all ─────────────────────────────────────────────

#[test]
fn all_off_after_all_on() {
    let (router, mut svc) = setup();
    assert!(post(&router, &mut svc, "/api/all", r#"{"action":"on"}"#).is_success());
    assert!(svc.status().iter().all(|s| s.is_on));

    assert!(post(&router, &mut svc, "/api/all", r#"{"action":"off"}"#).is_success());
    let json = status_json(&router, &mut svc);
    assert!(json["leds"].as_array().unwrap().iter().all(|l| l["isOn"] == false));
    assert!(svc.hardware().levels().iter().all(|d| *d == Some(0)));
}

#[test]
fn all_without_body_is_no_body() {
    let (router, mut svc) = setup();
    let resp = post(&router, &mut svc, "/api/all", "");
    assert_eq!(resp.body, r#"{"error":"No body"}"#);
}

#[test]
fn all_with_wrong_type_is_invalid_json() {
    let (router, mut svc) = setup();
    let resp = post(&router, &mut svc, "/api/all", r#"{"action":1}"#);
    assert_eq!(resp.body, r#"{"error":"Invalid JSON"}"#);
}

#[test]
fn all_unknown_action_rejected_by_default() {
    let (router, mut svc) = setup();
    post(&router, &mut svc, "/api/all", r#"{"action":"on"}"#);
    let writes = svc.hardware().writes.len();

    let resp = post(&router, &mut svc, "/api/all", r#"{"action":"blink"}"#);
    assert_eq!(resp.status, 400);
    assert_eq!(resp.body, r#"{"error":"Unknown action"}"#);
    assert_eq!(svc.hardware().writes.len(), writes);
    assert!(svc.status().iter().all(|s| s.is_on));
}

#[test]
fn all_unknown_action_ignored_under_ignore_policy() {
    let config = SystemConfig {
        unknown_action: UnknownActionPolicy::Ignore,
        ..SystemConfig::default()
    };
    let router = ApiRouter::new(&config);
    let mut svc = started_service_with(&config);
    let writes = svc.hardware().writes.len();
    let events = svc.sink().events.len();

    let resp = post(&router, &mut svc, "/api/all", r#"{"action":"blink"}"#);
    assert_eq!(resp, ApiResponse { status: 200, body: r#"{"success":true}"#.into() });
    assert_eq!(svc.hardware().writes.len(), writes);
    assert_eq!(svc.sink().events.len(), events);
    assert!(svc.status().iter().all(|s| !s.is_on));
}

// ── Transport-level errors ────────────────────────────────────

#[test]
fn unknown_path_is_not_found() {
    let (router, mut svc) = setup();
    let resp = router.dispatch(&mut svc, Method::Get, "/api/nope", b"");
    assert_eq!(resp.status, 404);
}

#[test]
fn wrong_method_is_not_allowed() {
    let (router, mut svc) = setup();
    assert_eq!(router.dispatch(&mut svc, Method::Get, "/api/led", b"").status, 405);
    assert_eq!(router.dispatch(&mut svc, Method::Post, "/api/status", b"{}").status, 405);
}

#[test]
fn preflight_answers_no_content() {
    let (router, mut svc) = setup();
    let resp = router.dispatch(&mut svc, Method::Options, "/api/led", b"");
    assert_eq!(resp.status, 204);
    assert!(resp.body.is_empty());
}

#[test]
fn oversized_body_is_rejected_and_reported() {
    let config = SystemConfig {
        max_body_bytes: 32,
        ..SystemConfig::default()
    };
    let router = ApiRouter::new(&config);
    let mut svc = started_service_with(&config);
    let body = format!(r#"{{"action":"on","pad":"{}"}}"#, "x".repeat(64));

    let resp = post(&router, &mut svc, "/api/all", &body);
    assert_eq!(resp.status, 413);
    assert_eq!(resp.body, r#"{"error":"Body too large"}"#);
    assert_eq!(
        svc.sink().events.last(),
        Some(&AppEvent::RequestRejected { route: "/api/all", error: ApiError::BodyTooLarge })
    );
}

#[test]
fn rejected_requests_are_reported_to_the_sink() {
    let (router, mut svc) = setup();
    post(&router, &mut svc, "/api/led", "");
    assert_eq!(
        svc.sink().events.last(),
        Some(&AppEvent::RequestRejected { route: "/api/led", error: ApiError::MissingBody })
    );
}
