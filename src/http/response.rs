//! Response builders for the gateway.
//!
//! # Design Decisions
//! - Successful passthroughs carry `Access-Control-Allow-Origin: *` and an
//!   `s-maxage` hint for shared caches; the gateway itself caches nothing
//! - Bodies are relayed as the exact upstream bytes
//! - Errors are small JSON objects with a single `error` field

use axum::{
    body::Bytes,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// `Cache-Control` value for a shared-cache lifetime in seconds.
pub fn cache_hint(secs: u64) -> String {
    format!("s-maxage={}", secs)
}

/// Relay an upstream JSON body unchanged.
pub fn json_passthrough(body: Bytes, cache_secs: u64) -> Response {
    passthrough(body, HeaderValue::from_static("application/json; charset=utf-8"), cache_secs)
}

/// Relay upstream image bytes unchanged as JPEG.
pub fn image_passthrough(body: Bytes, cache_secs: u64) -> Response {
    passthrough(body, HeaderValue::from_static("image/jpeg"), cache_secs)
}

fn passthrough(body: Bytes, content_type: HeaderValue, cache_secs: u64) -> Response {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
            (header::CONTENT_TYPE, content_type),
        ],
        [(header::CACHE_CONTROL, cache_hint(cache_secs))],
        body,
    )
        .into_response()
}

/// `{"error": message}` with the given status.
pub fn error_json(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
