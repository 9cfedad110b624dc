//! Routing subsystem for the development rewrite proxy.
//!
//! # Data Flow
//! ```text
//! RewriteRouteConfig[] (startup)
//!     → router.rs (compile, sort by prefix length)
//!     → matcher.rs (segment-aware prefix strip)
//!     → matched rule + remaining path, or no match
//! ```

pub mod matcher;
pub mod router;

pub use router::{RewriteRule, RewriteTable};
