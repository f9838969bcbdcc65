//! Fuzz target: request body → `ApiRouter::dispatch`
//!
//! Drives arbitrary bytes through both POST handlers and asserts that
//! they never panic, always answer with a documented status, and only
//! touch the LED state on success.
//!
//! cargo fuzz run fuzz_request_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use ledweb::app::events::AppEvent;
use ledweb::app::ports::{EventSink, LedOutputPort};
use ledweb::app::service::LedService;
use ledweb::config::SystemConfig;
use ledweb::http::router::ApiRouter;
use ledweb::http::Method;

struct CountingLeds(usize);
impl LedOutputPort for CountingLeds {
    fn write_duty(&mut self, _pin: i32, _duty: u8) {
        self.0 += 1;
    }
}

struct NullSink;
impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let config = SystemConfig::default();
    let router = ApiRouter::new(&config);
    let Ok(mut svc) = LedService::new(&config, CountingLeds(0), NullSink) else {
        return;
    };

    for path in ["/api/led", "/api/all"] {
        let before = svc.hardware().0;
        let resp = router.dispatch(&mut svc, Method::Post, path, data);
        assert!(matches!(resp.status, 200 | 400 | 413), "unexpected status {}", resp.status);
        if !resp.is_success() {
            assert_eq!(svc.hardware().0, before, "rejected request wrote hardware");
        }
    }
});
