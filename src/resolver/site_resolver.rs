//! Site selection and language negotiation for one request.
//!
//! # Responsibilities
//! - Find candidate sites for the request host
//! - Compute the enabled sites and supported languages of a group
//! - Pick the current site from cookie, primary site, or first match
//! - Negotiate the preferred language

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::Settings;
use crate::locale::{negotiate, reorder_primary_first, AcceptLanguage};
use crate::resolver::context::RequestContext;
use crate::sites::{trim_slashes, GroupId, Site, SiteDirectory};

/// True when the request URL already lives under `current_site`'s base URL.
pub fn is_translated_route(absolute_url: &str, current_site: &Site) -> bool {
    trim_slashes(absolute_url).starts_with(trim_slashes(&current_site.base_url))
}

/// Request-scoped resolver over an immutable settings/directory snapshot.
#[derive(Debug)]
pub struct SiteResolver<'a> {
    settings: &'a Settings,
    directory: &'a dyn SiteDirectory,
    enabled_sites: RefCell<HashMap<GroupId, Rc<[&'a Site]>>>,
}

impl<'a> SiteResolver<'a> {
    pub fn new(settings: &'a Settings, directory: &'a dyn SiteDirectory) -> Self {
        Self {
            settings,
            directory,
            enabled_sites: RefCell::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    /// Non-disabled sites whose base URL starts with `host_info`, in directory order.
    pub fn sites_matching_host(&self, host_info: &str) -> Vec<&'a Site> {
        self.directory
            .all_sites()
            .iter()
            .filter(|site| !self.settings.is_site_disabled(site.group_id, site.id))
            .filter(|site| site.matches_host(host_info))
            .collect()
    }

    /// Sites of `group` minus the group's disabled sites. Computed once per group.
    pub fn enabled_sites_for_group(&self, group: GroupId) -> Rc<[&'a Site]> {
        if let Some(sites) = self.enabled_sites.borrow().get(&group) {
            return Rc::clone(sites);
        }

        let sites: Rc<[&'a Site]> = self
            .directory
            .sites_by_group(group)
            .into_iter()
            .filter(|site| !self.settings.is_site_disabled(group, site.id))
            .collect();
        self.enabled_sites
            .borrow_mut()
            .insert(group, Rc::clone(&sites));
        sites
    }

    /// Distinct languages of the group's enabled sites, in site order.
    pub fn supported_languages(&self, group: GroupId) -> Vec<String> {
        let mut languages: Vec<String> = Vec::new();
        for site in self.enabled_sites_for_group(group).iter() {
            if !languages.contains(&site.language) {
                languages.push(site.language.clone());
            }
        }
        languages
    }

    pub fn is_supported_language(&self, group: GroupId, language: &str) -> bool {
        self.enabled_sites_for_group(group)
            .iter()
            .any(|site| site.language == language)
    }

    /// First site in `candidates` with exactly this language.
    pub fn find_site_by_language(
        &self,
        language: &str,
        candidates: &[&'a Site],
    ) -> Option<&'a Site> {
        candidates
            .iter()
            .copied()
            .find(|site| site.language == language)
    }

    /// The configured primary site of `group`, if it exists.
    pub fn primary_site_for_group(&self, group: GroupId) -> Option<&'a Site> {
        let id = self.settings.primary_sites.get(&group)?;
        self.directory.site_by_id(*id)
    }

    /// The site this request should be served from, or `None` to keep the current one.
    pub fn resolve_current_site(
        &self,
        request: &RequestContext,
        check_cookie: bool,
    ) -> Option<&'a Site> {
        if is_translated_route(request.absolute_url(), request.current_site()) {
            return None;
        }

        let host_info = request.host_info();
        let matching = self.sites_matching_host(host_info);
        let anchor = *matching.first()?;

        if check_cookie {
            if let Some(language) = request.language_cookie() {
                if let Some(site) = self.find_site_by_language(language, &matching) {
                    tracing::trace!(site = %site.id, %language, "Site chosen from language cookie");
                    return Some(site);
                }
            }
        }

        if let Some(primary) = self.primary_site_for_group(anchor.group_id) {
            if primary.matches_host(host_info) {
                tracing::trace!(site = %primary.id, "Site chosen as group primary");
                return Some(primary);
            }
        }

        tracing::trace!(site = %anchor.id, "Site chosen as first host match");
        Some(anchor)
    }

    /// Resolve and write the result into `request`. True when the site changed.
    pub fn resolve_and_apply(&self, request: &mut RequestContext, check_cookie: bool) -> bool {
        let Some(site) = self.resolve_current_site(request, check_cookie) else {
            return false;
        };
        if site.id == request.current_site().id {
            return false;
        }

        tracing::debug!(
            from = %request.current_site().id,
            to = %site.id,
            "Current site overridden"
        );
        request.set_current_site(site.clone());
        true
    }

    /// Best language for this visitor among the group's languages (or `explicit`).
    pub fn preferred_language(
        &self,
        request: &RequestContext,
        group: GroupId,
        explicit: Option<&str>,
    ) -> String {
        if let Some(cookie) = request.language_cookie() {
            if self.is_supported_language(group, cookie) {
                return cookie.to_string();
            }
        }

        let candidates = match explicit {
            Some(language) => vec![language.to_string()],
            None => self.supported_languages(group),
        };

        // Without a configured primary site, the current site leads
        let primary_language = self
            .primary_site_for_group(group)
            .map(|site| site.language.as_str())
            .unwrap_or(request.current_site().language.as_str());
        let candidates = reorder_primary_first(candidates, primary_language);

        let accept = AcceptLanguage::parse(request.accept_language().unwrap_or_default());
        negotiate(&accept, &candidates)
            .or_else(|| candidates.first().map(String::as_str))
            .unwrap_or(request.current_site().language.as_str())
            .to_string()
    }
}
