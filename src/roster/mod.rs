//! Roster View subsystem.
//!
//! # Data Flow
//! ```text
//! data.rs (static crews)
//!     → live.rs (dedupe identities, concurrent station lookups, merge)
//!     → render.rs (pure: crews + LiveTable → markup)
//!     → mount.rs (replace the whole mounted subtree)
//!
//! view.rs drives it: render offline → fetch_live → render again.
//! ```
//!
//! # Design Decisions
//! - The live table is a value returned by each pass, never shared state
//! - Lookup failures are kept as structured outcomes but render as offline
//! - Rendering is deterministic for identical inputs

pub mod data;
pub mod gateway;
pub mod live;
pub mod mount;
pub mod render;
pub mod view;

pub use data::{role_color, Crew, Member, CREWS};
pub use gateway::GatewayClient;
pub use live::{fetch_live, LiveSnapshot, LiveStatus, LiveTable, LookupOutcome, StationSource};
pub use mount::{FileMount, MemoryMount, Mount};
pub use render::{page, render};
pub use view::RosterView;
