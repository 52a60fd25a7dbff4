//! Site directory subsystem.
//!
//! # Data Flow
//! ```text
//! [[sites]] config entries
//!     → directory.rs (StaticSiteDirectory, insertion ordered)
//!     → shared read-only by every request through the config snapshot
//!
//! Per request:
//!     host info + absolute URL
//!     → SiteDirectory::ambient_site (host's own resolution)
//!     → SiteResolver may override it
//! ```
//!
//! # Design Decisions
//! - Sites are never created or mutated by the engine
//! - Directory order is significant: first match is the tie-break anchor
//! - Lookups are linear; deployments carry tens of sites, not thousands

pub mod directory;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use directory::{SiteDirectory, StaticSiteDirectory};

/// Identifier of a single site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SiteId(pub u32);

/// Identifier of a site group (the language variants of one logical site).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct GroupId(pub u32);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A localized variant of content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Site {
    pub id: SiteId,

    /// Group this site belongs to.
    #[serde(rename = "group")]
    pub group_id: GroupId,

    /// BCP-47 language code, compared verbatim.
    pub language: String,

    /// Scheme, host and optional path prefix (e.g. `https://example.com/fr/`).
    pub base_url: String,
}

impl Site {
    pub fn new(
        id: u32,
        group_id: u32,
        language: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            id: SiteId(id),
            group_id: GroupId(group_id),
            language: language.into(),
            base_url: base_url.into(),
        }
    }

    /// Whether this site's base URL starts with the request host info.
    pub fn matches_host(&self, host_info: &str) -> bool {
        self.base_url.starts_with(host_info)
    }
}

/// Trims a single leading and trailing `/`, like the URL comparisons here expect.
pub(crate) fn trim_slashes(value: &str) -> &str {
    let value = value.strip_prefix('/').unwrap_or(value);
    value.strip_suffix('/').unwrap_or(value)
}
