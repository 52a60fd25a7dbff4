//! Engine-facing view of the redirect settings.
//!
//! The TOML layout favours readability (`[[redirect.groups]]` tables); the
//! engine wants keyed lookups. [`Settings`] is built once per config load.

use std::collections::{HashMap, HashSet};

use crate::config::schema::RedirectConfig;
use crate::routing::RoutePattern;
use crate::sites::{GroupId, SiteId};

/// Validated redirect settings, read-only to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub enabled: bool,

    /// Upper-cased method names.
    pub http_methods_ignored: HashSet<String>,

    pub cookie_name: String,

    pub primary_sites: HashMap<GroupId, SiteId>,

    /// `None` when no group disables anything.
    pub disabled_sites_by_group_id: Option<HashMap<GroupId, HashSet<SiteId>>>,

    pub global_excluded_routes: Vec<RoutePattern>,

    pub excluded_routes_by_group_id: HashMap<GroupId, Vec<RoutePattern>>,
}

impl Settings {
    pub fn is_method_ignored(&self, method: &str) -> bool {
        self.http_methods_ignored
            .contains(&method.to_ascii_uppercase())
    }

    pub fn disabled_sites(&self, group: GroupId) -> Option<&HashSet<SiteId>> {
        self.disabled_sites_by_group_id
            .as_ref()
            .and_then(|by_group| by_group.get(&group))
    }

    pub fn is_site_disabled(&self, group: GroupId, site: SiteId) -> bool {
        self.disabled_sites(group)
            .is_some_and(|disabled| disabled.contains(&site))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(&RedirectConfig::default())
    }
}

impl From<&RedirectConfig> for Settings {
    fn from(config: &RedirectConfig) -> Self {
        let mut disabled: HashMap<GroupId, HashSet<SiteId>> = HashMap::new();
        let mut excluded: HashMap<GroupId, Vec<RoutePattern>> = HashMap::new();

        for rules in &config.groups {
            if let Some(sites) = &rules.disabled_sites {
                disabled
                    .entry(rules.group)
                    .or_default()
                    .extend(sites.iter().copied());
            }
            if !rules.excluded_routes.is_empty() {
                excluded
                    .entry(rules.group)
                    .or_default()
                    .extend(rules.excluded_routes.iter().cloned());
            }
        }

        Self {
            enabled: config.enabled,
            http_methods_ignored: config
                .http_methods_ignored
                .iter()
                .map(|m| m.trim().to_ascii_uppercase())
                .collect(),
            cookie_name: config.cookie_name.clone(),
            primary_sites: config
                .primary_sites
                .iter()
                .map(|p| (p.group, p.site))
                .collect(),
            disabled_sites_by_group_id: (!disabled.is_empty()).then_some(disabled),
            global_excluded_routes: config.global_excluded_routes.clone(),
            excluded_routes_by_group_id: excluded,
        }
    }
}
