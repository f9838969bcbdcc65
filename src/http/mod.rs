//! HTTP/JSON API: transport-independent request handling.
//!
//! The [`router`] turns `(method, path, body)` into an [`ApiResponse`] by
//! decoding the body ([`codec`]), issuing an
//! [`AppCommand`](crate::app::commands::AppCommand) and encoding the
//! result.  Nothing here knows about sockets: the ESP-IDF server adapter
//! (`adapters::http_server`) and the host tests both drive the same
//! [`ApiRouter`](router::ApiRouter).

pub mod codec;
pub mod router;

use crate::error::ApiError;

/// Every API route lives under this prefix; the control page calls
/// `/api/status`, `/api/led` and `/api/all`.
pub const API_PREFIX: &str = "/api";

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Headers attached to every API response so the page can also be
/// served from another origin.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Options,
    /// Any method no route serves (PUT, DELETE, ...).
    Other,
}

/// A fully-formed response, ready for the transport to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(body: String) -> Self {
        Self { status: 200, body }
    }

    pub fn success() -> Self {
        Self::ok(codec::encode_success())
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            status: error.status(),
            body: codec::encode_error(error),
        }
    }

    /// CORS preflight answer.
    pub fn no_content() -> Self {
        Self {
            status: 204,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Pull a request body through `read`, giving up once it passes
/// `max_body_bytes`.
///
/// `declared` is the Content-Length, if any.  A declared length over the
/// limit returns `Ok(None)` without reading.  Without one (or with zero,
/// which the server also reports for chunked bodies) the body is read
/// until `read` returns 0.
pub fn read_bounded<E>(
    declared: Option<u64>,
    max_body_bytes: usize,
    mut read: impl FnMut(&mut [u8]) -> Result<usize, E>,
) -> Result<Option<Vec<u8>>, E> {
    let expected = declared.filter(|&n| n > 0);
    if expected.is_some_and(|n| n > max_body_bytes as u64) {
        return Ok(None);
    }

    let mut body = Vec::new();
    let mut chunk = [0_u8; 64];
    loop {
        let want = match expected {
            Some(n) => (n as usize - body.len()).min(chunk.len()),
            None => chunk.len(),
        };
        if want == 0 {
            break;
        }
        let n = read(&mut chunk[..want])?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
        if body.len() > max_body_bytes {
            return Ok(None);
        }
    }
    Ok(Some(body))
}
