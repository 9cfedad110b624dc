//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, timeout)
//!     → handlers.rs (validate query, one upstream call)
//!     → response.rs (passthrough body + CORS + cache hint, or JSON error)
//!     → Send to client
//!
//! Unmatched paths:
//!     → dev_proxy.rs (prefix rewrite when enabled, else 404)
//! ```

pub mod dev_proxy;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, X_REQUEST_ID};
pub use server::{AppState, HttpServer};

pub const POSTS_PATH: &str = "/soop-posts";
pub const STATION_PATH: &str = "/soop-station";
pub const THUMB_PATH: &str = "/soop-thumb";
pub const BOARD_PATH: &str = "/board";
pub const STATUS_PATH: &str = "/status";

/// Paths owned by the gateway that dev rewrites must never shadow.
pub const RESERVED_PATHS: &[&str] = &[POSTS_PATH, STATION_PATH, THUMB_PATH, BOARD_PATH, STATUS_PATH];
