//! Route exclusion subsystem.
//!
//! # Data Flow
//! ```text
//! Settings (global + per-group patterns)
//!     → excluded_routes_for (trim, drop invalid, dedup)
//!     → RouteExclusionMatcher::compile (exact / wildcard matchers)
//!     → is_excluded(path): first match wins
//! ```
//!
//! # Design Decisions
//! - Paths and patterns share one canonical form: `/a/b`, root is `/`
//! - `*` matches any sequence, `/` is literal
//! - No regex: wildcard patterns are split into literal pieces at compile time
//! - Deterministic: same path and patterns always give the same answer

pub mod matcher;

pub use matcher::{
    excluded_routes_for, is_excluded, normalize_path, PathMatcher, RouteExclusionMatcher,
    RoutePattern,
};
