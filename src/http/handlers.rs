//! Gateway endpoint handlers.
//!
//! Each `soop-*` handler checks one required query parameter for presence,
//! performs exactly one upstream call, and relays the result. Upstream failures
//! of any kind collapse into a single generic 500.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::request::request_id;
use crate::http::response::{error_json, image_passthrough, json_passthrough};
use crate::http::server::AppState;
use crate::roster::{fetch_live, page, render, CREWS};
use crate::upstream::FetchError;

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

/// Raw query pairs. A repeated key is not a rejection; the first non-empty
/// value wins.
type Params = Query<Vec<(String, String)>>;

/// Presence-only check; an empty value counts as missing.
fn required(params: Vec<(String, String)>, key: &str) -> Option<String> {
    params
        .into_iter()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v)
}

fn upstream_failed(headers: &HeaderMap, endpoint: &str, key: &str, e: &FetchError) -> Response {
    tracing::warn!(
        request_id = %request_id(headers),
        endpoint,
        key,
        kind = e.kind(),
        error = %e,
        "Upstream fetch failed"
    );
    error_json(StatusCode::INTERNAL_SERVER_ERROR, "fetch failed")
}

fn relay_json(
    result: Result<Bytes, FetchError>,
    cache_secs: u64,
    headers: &HeaderMap,
    endpoint: &str,
    id: &str,
) -> Response {
    match result {
        Ok(body) => json_passthrough(body, cache_secs),
        Err(e) => upstream_failed(headers, endpoint, id, &e),
    }
}

/// `GET /soop-posts?id=`
pub async fn channel_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Params,
) -> Response {
    let Some(id) = required(params, "id") else {
        return error_json(StatusCode::BAD_REQUEST, "id required");
    };
    let result = state.upstream.channel_posts(&id).await;
    relay_json(result, state.cache.posts_secs, &headers, "posts", &id)
}

/// `GET /soop-station?id=`
pub async fn station_info(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Params,
) -> Response {
    let Some(id) = required(params, "id") else {
        return error_json(StatusCode::BAD_REQUEST, "id required");
    };
    let result = state.upstream.station_info(&id).await;
    relay_json(result, state.cache.station_secs, &headers, "station", &id)
}

/// `GET /soop-thumb?bno=`
pub async fn thumbnail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Params,
) -> Response {
    let Some(bno) = required(params, "bno") else {
        return error_json(StatusCode::BAD_REQUEST, "bno required");
    };
    match state.upstream.thumbnail(&bno).await {
        Ok(body) => image_passthrough(body, state.cache.thumb_secs),
        Err(e) => upstream_failed(&headers, "thumb", &bno, &e),
    }
}

/// `GET /board`: the roster rendered with a fresh live pass.
pub async fn board(State(state): State<AppState>) -> Response {
    let snapshot = fetch_live(CREWS, state.upstream.as_ref()).await;
    let markup = render(CREWS, &snapshot.table);
    (
        [(header::CACHE_CONTROL, "no-store")],
        Html(page(&markup)),
    )
        .into_response()
}

/// `GET /status`
pub async fn status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}
