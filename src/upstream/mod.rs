//! Outbound calls to the streaming platform.
//!
//! # Data Flow
//! ```text
//! gateway handler / roster lookup
//!     → client.rs (build URL from template, attach headers)
//!     → one GET, no retry
//!     → raw bytes (validated as JSON where JSON is expected)
//! ```
//!
//! # Design Decisions
//! - Upstream status codes are not inspected; only transport and decode failures are errors
//! - JSON bodies are validated but relayed unchanged
//! - The request timeout comes from config; there is no per-call override

pub mod client;

use thiserror::Error;

pub use client::UpstreamClient;

/// Anything that can go wrong talking to an upstream host.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout or a broken body stream.
    #[error("upstream transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered with something that is not JSON.
    #[error("upstream returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl FetchError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(e) if e.is_timeout() => "timeout",
            FetchError::Transport(_) => "transport",
            FetchError::InvalidJson(_) => "invalid_json",
        }
    }
}
