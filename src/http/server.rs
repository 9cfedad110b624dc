//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener and stop on shutdown
//! - Share the upstream client and rewrite table with handlers

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{BoardConfig, CacheConfig};
use crate::http::request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
use crate::http::{dev_proxy, handlers, BOARD_PATH, POSTS_PATH, STATION_PATH, STATUS_PATH, THUMB_PATH};
use crate::lifecycle::shutdown::notified;
use crate::routing::RewriteTable;
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub cache: CacheConfig,
    pub rewrites: Arc<RewriteTable>,
    pub dev_proxy_enabled: bool,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: BoardConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: BoardConfig) -> Result<Self, reqwest::Error> {
        let upstream = UpstreamClient::new(
            config.upstream.clone(),
            Duration::from_secs(config.timeouts.upstream_secs),
        )?;

        let state = AppState {
            upstream: Arc::new(upstream),
            cache: config.cache.clone(),
            rewrites: Arc::new(RewriteTable::from_config(&config.dev_proxy.routes)),
            dev_proxy_enabled: config.dev_proxy.enabled,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &BoardConfig, state: AppState) -> Router {
        Router::new()
            .route(POSTS_PATH, get(handlers::channel_posts))
            .route(STATION_PATH, get(handlers::station_info))
            .route(THUMB_PATH, get(handlers::thumbnail))
            .route(BOARD_PATH, get(handlers::board))
            .route(STATUS_PATH, get(handlers::status))
            .fallback(dev_proxy::rewrite)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeRequestUuidV4))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            dev_proxy = self.config.dev_proxy.enabled,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(notified(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
