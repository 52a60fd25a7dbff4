//! Multi-site language redirect engine and gateway.
//!
//! Given a request against a multi-site deployment, the engine decides which
//! localized site variant serves it and whether to redirect the visitor to a
//! different language variant, persisting the choice in a cookie.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod locale;
pub mod observability;
pub mod redirect;
pub mod resolver;
pub mod routing;
pub mod sites;

pub use config::{GatewayConfig, Settings};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use redirect::{evaluate, Decision, RedirectDecider, SkipReason};
pub use resolver::{RequestContext, SiteResolver};
pub use routing::{RouteExclusionMatcher, RoutePattern};
pub use sites::{GroupId, Site, SiteDirectory, SiteId, StaticSiteDirectory};
