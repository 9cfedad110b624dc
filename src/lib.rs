//! Crew board: a CORS gateway for streaming-platform APIs and a live roster view.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod roster;
pub mod routing;
pub mod upstream;

pub use config::schema::BoardConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
