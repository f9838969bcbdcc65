//! Route table and request handlers.
//!
//! | Method | Path          | Body                              |
//! |--------|---------------|-----------------------------------|
//! | GET    | `/api/status` | none                              |
//! | POST   | `/api/led`    | `{"led": int, "action": "on"/"off"}` |
//! | POST   | `/api/all`    | `{"action": "on"/"off"}`          |
//!
//! Handlers validate in a fixed order (body present → JSON shape → index
//! → action) and touch the registry only once everything has passed.

use log::warn;

use crate::app::commands::AppCommand;
use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, LedOutputPort};
use crate::app::registry::LedRegistry;
use crate::app::service::LedService;
use crate::config::{SystemConfig, UnknownActionPolicy};
use crate::error::ApiError;

use super::codec::{self, Action, AllRequest, LedRequest};
use super::{ApiResponse, Method};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Status,
    Led,
    All,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Status, Route::Led, Route::All];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Status => "/api/status",
            Self::Led => "/api/led",
            Self::All => "/api/all",
        }
    }

    pub const fn method(self) -> Method {
        match self {
            Self::Status => Method::Get,
            Self::Led | Self::All => Method::Post,
        }
    }

    /// Match a request path, ignoring any query string.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split_once('?').map_or(path, |(p, _)| p);
        Self::ALL.into_iter().find(|r| r.path() == path)
    }
}

/// Stateless dispatcher; the service it drives is passed per call.
#[derive(Debug, Clone, Copy)]
pub struct ApiRouter {
    unknown_action: UnknownActionPolicy,
    max_body_bytes: usize,
}

impl ApiRouter {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            unknown_action: config.unknown_action,
            max_body_bytes: config.max_body_bytes,
        }
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    pub fn dispatch<H: LedOutputPort, S: EventSink>(
        &self,
        service: &mut LedService<H, S>,
        method: Method,
        path: &str,
        body: &[u8],
    ) -> ApiResponse {
        let route = match Self::route_for(method, path) {
            Ok(route) => route,
            Err(response) => return response,
        };
        if body.len() > self.max_body_bytes {
            return self.reject(service, route, ApiError::BodyTooLarge);
        }

        match route {
            Route::Status => self.status(service),
            Route::Led => self.set_led(service, body),
            Route::All => self.set_all(service, body),
        }
    }

    /// [`dispatch`](Self::dispatch) for a request whose body the transport
    /// stopped reading after `max_body_bytes`.
    pub fn dispatch_oversized<H: LedOutputPort, S: EventSink>(
        &self,
        service: &mut LedService<H, S>,
        method: Method,
        path: &str,
    ) -> ApiResponse {
        match Self::route_for(method, path) {
            Ok(route) => self.reject(service, route, ApiError::BodyTooLarge),
            Err(response) => response,
        }
    }

    /// Path and method checks shared by every request.  `Err` carries the
    /// finished answer: 404, 405 or the 204 preflight.
    fn route_for(method: Method, path: &str) -> Result<Route, ApiResponse> {
        let route = Route::from_path(path).ok_or_else(|| ApiResponse::error(ApiError::NotFound))?;
        match method {
            Method::Options => Err(ApiResponse::no_content()),
            m if m == route.method() => Ok(route),
            _ => Err(ApiResponse::error(ApiError::MethodNotAllowed)),
        }
    }

    /// `GET /api/status`
    pub fn status<H: LedOutputPort, S: EventSink>(&self, service: &LedService<H, S>) -> ApiResponse {
        ApiResponse::ok(codec::encode_status(&service.status()))
    }

    /// `POST /api/led`
    pub fn set_led<H: LedOutputPort, S: EventSink>(
        &self,
        service: &mut LedService<H, S>,
        body: &[u8],
    ) -> ApiResponse {
        let result = codec::decode_body::<LedRequest>(body).and_then(|req| {
            let index = LedRegistry::resolve_index(req.led)?;
            Ok((index, self.action(&req.action)?))
        });

        match result {
            Ok((index, Some(action))) => {
                let cmd = AppCommand::SetLed { index, on: action.is_on() };
                match service.handle_command(cmd) {
                    Ok(()) => ApiResponse::success(),
                    Err(e) => self.reject(service, Route::Led, e.into()),
                }
            }
            Ok((_, None)) => ApiResponse::success(),
            Err(e) => self.reject(service, Route::Led, e),
        }
    }

    /// `POST /api/all`
    pub fn set_all<H: LedOutputPort, S: EventSink>(
        &self,
        service: &mut LedService<H, S>,
        body: &[u8],
    ) -> ApiResponse {
        let result =
            codec::decode_body::<AllRequest>(body).and_then(|req| self.action(&req.action));

        match result {
            Ok(Some(action)) => {
                let cmd = AppCommand::SetAll { on: action.is_on() };
                match service.handle_command(cmd) {
                    Ok(()) => ApiResponse::success(),
                    Err(e) => self.reject(service, Route::All, e.into()),
                }
            }
            Ok(None) => ApiResponse::success(),
            Err(e) => self.reject(service, Route::All, e),
        }
    }

    /// Parse an action under the configured policy.  `Ok(None)` means
    /// "ignore this request".
    fn action(&self, raw: &str) -> Result<Option<Action>, ApiError> {
        match raw.parse::<Action>() {
            Ok(action) => Ok(Some(action)),
            Err(e) => match self.unknown_action {
                UnknownActionPolicy::Reject => Err(e),
                UnknownActionPolicy::Ignore => {
                    warn!("ignoring unknown action '{}'", raw);
                    Ok(None)
                }
            },
        }
    }

    fn reject<H: LedOutputPort, S: EventSink>(
        &self,
        service: &mut LedService<H, S>,
        route: Route,
        error: ApiError,
    ) -> ApiResponse {
        service.report(AppEvent::RequestRejected {
            route: route.path(),
            error,
        });
        ApiResponse::error(error)
    }
}
