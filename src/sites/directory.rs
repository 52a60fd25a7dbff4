//! Read-only site lookup.
//!
//! # Responsibilities
//! - Enumerate sites in their natural (insertion) order
//! - Look sites up by id and by group
//! - Provide the host's ambient "current site" before the engine runs

use crate::sites::{trim_slashes, GroupId, Site, SiteId};

/// Read access to the deployment's sites.
pub trait SiteDirectory: Send + Sync + std::fmt::Debug {
    /// All sites, in directory order.
    fn all_sites(&self) -> &[Site];

    /// Sites belonging to `group`, in directory order.
    fn sites_by_group(&self, group: GroupId) -> Vec<&Site> {
        self.all_sites()
            .iter()
            .filter(|site| site.group_id == group)
            .collect()
    }

    fn site_by_id(&self, id: SiteId) -> Option<&Site> {
        self.all_sites().iter().find(|site| site.id == id)
    }

    /// The site the host would serve before any language logic runs.
    fn ambient_site(&self, host_info: &str, absolute_url: &str) -> Option<&Site>;
}

/// Directory backed by an immutable list built from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticSiteDirectory {
    sites: Vec<Site>,
    default_site: Option<SiteId>,
}

impl StaticSiteDirectory {
    pub fn new(sites: Vec<Site>) -> Self {
        Self {
            sites,
            default_site: None,
        }
    }

    /// Site served when neither URL nor host identifies one.
    pub fn with_default_site(mut self, id: Option<SiteId>) -> Self {
        self.default_site = id;
        self
    }
}

impl SiteDirectory for StaticSiteDirectory {
    fn all_sites(&self) -> &[Site] {
        &self.sites
    }

    fn ambient_site(&self, host_info: &str, absolute_url: &str) -> Option<&Site> {
        let url = trim_slashes(absolute_url);

        // Longest base URL that prefixes the request URL on a path boundary
        let by_url = self
            .sites
            .iter()
            .filter(|site| {
                let base = trim_slashes(&site.base_url);
                match url.strip_prefix(base) {
                    Some(rest) => rest.is_empty() || rest.starts_with(['/', '?', '#']),
                    None => false,
                }
            })
            .max_by_key(|site| trim_slashes(&site.base_url).len());

        by_url
            .or_else(|| self.sites.iter().find(|site| site.matches_host(host_info)))
            .or_else(|| self.default_site.and_then(|id| self.site_by_id(id)))
            .or_else(|| self.sites.first())
    }
}
