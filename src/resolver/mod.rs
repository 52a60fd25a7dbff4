//! Site resolution subsystem.
//!
//! # Data Flow
//! ```text
//! RequestContext (host info, URL, cookie, Accept-Language, current site)
//!     → site_resolver.rs
//!         sites_matching_host → cookie language → primary site → first match
//!     → Option<Site> override for the current site
//!
//! Language negotiation:
//!     cookie (if supported) → candidates (explicit or group languages)
//!     → primary language first → Accept-Language negotiation
//! ```
//!
//! # Design Decisions
//! - One SiteResolver per request; its caches die with the request
//! - Borrowed, read-only access to Settings and the SiteDirectory
//! - Every lookup is total: missing data means "no opinion", never an error

pub mod context;
pub mod site_resolver;

pub use context::{RequestContext, RequestKind};
pub use site_resolver::{is_translated_route, SiteResolver};
