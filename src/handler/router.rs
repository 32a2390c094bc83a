//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: body collection, method
//! validation, route lookup and access logging.

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::math::{Operation, ResultBody};
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, SERVER, USER_AGENT};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

pub const HEALTH_CHECK_PATH: &str = "/health-check";

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let path = parts.uri.path();

    let body = read_body(body).await;
    let mut response = dispatch(&parts.method, path, &body);

    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }

    if state.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            parts.method.to_string(),
            path.to_string(),
        );
        entry.http_version = version_label(parts.version).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().map_or(0, |n| {
            usize::try_from(n).unwrap_or(usize::MAX)
        });
        entry.user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        entry.operation = Operation::from_path(path).map(Operation::name);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route a request to its handler
///
/// Arithmetic routes accept POST only, the health check accepts GET only.
pub fn dispatch(method: &Method, path: &str, body: &[u8]) -> Response<Full<Bytes>> {
    if path == HEALTH_CHECK_PATH {
        return if *method == Method::GET {
            http::build_empty_response(StatusCode::OK)
        } else {
            http::build_405_response("GET")
        };
    }

    let Some(op) = Operation::from_path(path) else {
        return http::build_404_response();
    };

    if *method != Method::POST {
        return http::build_405_response("POST");
    }

    let numbers = parse_numbers(body);
    http::build_json_response(
        StatusCode::OK,
        &ResultBody {
            result: op.apply(&numbers),
        },
    )
}

/// Parse a JSON array of integers; anything else is the empty sequence
fn parse_numbers(body: &[u8]) -> Vec<i64> {
    serde_json::from_slice(body).unwrap_or_default()
}

/// Collect the whole body; a failed read counts as an empty body
async fn read_body<B: Body>(body: B) -> Bytes {
    body.collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default()
}

const fn version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
}
