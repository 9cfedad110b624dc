//! Development rewrite proxy.
//!
//! Serves as the router fallback. When enabled, a path under a configured
//! prefix is forwarded to that prefix's target host with the prefix stripped
//! and the host's required headers attached. Only for local development.

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::http::request::request_id;
use crate::http::response::error_json;
use crate::http::server::AppState;

pub async fn rewrite(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if !state.dev_proxy_enabled {
        return error_json(StatusCode::NOT_FOUND, "not found");
    }
    let Some((rule, rest)) = state.rewrites.match_path(uri.path()) else {
        return error_json(StatusCode::NOT_FOUND, "not found");
    };
    if method != Method::GET && method != Method::HEAD {
        return error_json(StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
    }

    let url = rule.upstream_url(rest, uri.query());
    let mut outbound = HeaderMap::new();
    // Browser headers pass through; the route's required headers win.
    for name in [header::USER_AGENT, header::ACCEPT, header::ACCEPT_LANGUAGE] {
        if let Some(value) = headers.get(&name) {
            outbound.insert(name, value.clone());
        }
    }
    outbound.extend(rule.headers.clone());

    tracing::debug!(
        request_id = %request_id(&headers),
        prefix = rule.matcher.prefix(),
        upstream = %url,
        "Rewriting request"
    );

    let result = async {
        let response = state
            .upstream
            .http()
            .request(method.clone(), &url)
            .headers(outbound)
            .send()
            .await?;
        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await?;
        Ok::<_, reqwest::Error>((status, content_type, body))
    }
    .await;

    match result {
        Ok((status, content_type, body)) => {
            let mut response = (status, body).into_response();
            if let Some(ct) = content_type {
                response.headers_mut().insert(header::CONTENT_TYPE, ct);
            }
            response
        }
        Err(e) => {
            tracing::warn!(
                request_id = %request_id(&headers),
                upstream = %url,
                error = %e,
                "Rewrite target unreachable"
            );
            error_json(StatusCode::BAD_GATEWAY, "fetch failed")
        }
    }
}
