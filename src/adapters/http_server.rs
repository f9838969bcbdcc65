//! ESP-IDF HTTP server adapter.
//!
//! Binds the transport-independent [`ApiRouter`] to `EspHttpServer`:
//! `/` serves the bundled control page and a wildcard handler passes
//! every other request to the router, so unknown paths and methods get
//! the same JSON errors and CORS headers as the API routes.  The httpd
//! task runs every handler to completion, so the service mutex is never
//! contended.

use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use esp_idf_svc::http::server::{Configuration, EspHttpConnection, EspHttpServer, Request};
use esp_idf_svc::http::{Headers, Method as HttpMethod};
use esp_idf_svc::io::{Read, Write};
use log::info;

use crate::adapters::hardware::HardwareAdapter;
use crate::adapters::log_sink::LogEventSink;
use crate::app::service::LedService;
use crate::config::SystemConfig;
use crate::http::router::ApiRouter;
use crate::http::{self, ApiResponse, Method, CONTENT_TYPE_JSON, CORS_HEADERS};

const INDEX_HTML: &str = include_str!("../../resources/index.html");

/// Methods the catch-all handler is registered for.
const DISPATCHED_METHODS: [HttpMethod; 6] = [
    HttpMethod::Get,
    HttpMethod::Post,
    HttpMethod::Options,
    HttpMethod::Put,
    HttpMethod::Delete,
    HttpMethod::Patch,
];

pub type SharedLedService = Arc<Mutex<LedService<HardwareAdapter, LogEventSink>>>;

type HttpRequest<'r, 'c> = Request<&'r mut EspHttpConnection<'c>>;

fn api_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::Get,
        HttpMethod::Post => Method::Post,
        HttpMethod::Options => Method::Options,
        _ => Method::Other,
    }
}

/// Start the server.  The returned handle must be kept alive.
pub fn start(config: &SystemConfig, service: SharedLedService) -> anyhow::Result<EspHttpServer<'static>> {
    let conf = Configuration {
        http_port: config.http_port,
        stack_size: config.http_stack_size,
        uri_match_wildcard: true,
        ..Default::default()
    };
    let mut server = EspHttpServer::new(&conf)?;
    let router = ApiRouter::new(config);

    // Registered first so it wins over the wildcard below.
    server.fn_handler::<anyhow::Error, _>("/", HttpMethod::Get, |req| {
        req.into_response(200, Some("OK"), &[("Content-Type", "text/html; charset=utf-8")])?
            .write_all(INDEX_HTML.as_bytes())?;
        Ok(())
    })?;

    for http_method in DISPATCHED_METHODS {
        let service = service.clone();
        server.fn_handler::<anyhow::Error, _>("/*", http_method, move |mut req| {
            let method = api_method(req.method());
            let path = req.uri().to_owned();
            let body = read_body(&mut req, router.max_body_bytes())?;
            let response = {
                let mut svc = service
                    .lock()
                    .map_err(|_| anyhow!("LED service mutex poisoned"))?;
                match body {
                    Some(body) => router.dispatch(&mut *svc, method, &path, &body),
                    None => router.dispatch_oversized(&mut *svc, method, &path),
                }
            };
            write_response(req, &response)
        })?;
    }

    info!("HTTP server listening on port {}", config.http_port);
    Ok(server)
}

/// `None` when the body exceeds `max_body_bytes`.
fn read_body(req: &mut HttpRequest<'_, '_>, max_body_bytes: usize) -> anyhow::Result<Option<Vec<u8>>> {
    let declared = req.content_len();
    Ok(http::read_bounded(declared, max_body_bytes, |buf| req.read(buf))?)
}

fn write_response(req: HttpRequest<'_, '_>, response: &ApiResponse) -> anyhow::Result<()> {
    let headers = [
        ("Content-Type", CONTENT_TYPE_JSON),
        CORS_HEADERS[0],
        CORS_HEADERS[1],
        CORS_HEADERS[2],
    ];
    let mut resp = req.into_response(response.status, None, &headers)?;
    if !response.body.is_empty() {
        resp.write_all(response.body.as_bytes())?;
    }
    Ok(())
}
