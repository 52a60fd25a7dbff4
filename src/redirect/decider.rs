//! Redirect decision state machine.
//!
//! # Responsibilities
//! - Apply the skip rules (disabled, non-site, excluded, ignored method)
//! - Respect URLs that already carry a supported language
//! - Compute the redirect target for the negotiated language
//!
//! # Design Decisions
//! - Rules are evaluated top to bottom; the first applicable one wins
//! - Total function: anomalies degrade to `Skip`, never to an error
//! - Excluded-route matchers are compiled at most once per group per request

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::Settings;
use crate::locale::is_valid_language_code;
use crate::redirect::decision::{Decision, SkipReason};
use crate::resolver::{is_translated_route, RequestContext, SiteResolver};
use crate::routing::{excluded_routes_for, RouteExclusionMatcher};
use crate::sites::GroupId;

/// Decides skip / accept / redirect for one request.
#[derive(Debug)]
pub struct RedirectDecider<'r, 'a> {
    settings: &'a Settings,
    resolver: &'r SiteResolver<'a>,
    exclusions: RefCell<HashMap<GroupId, Rc<RouteExclusionMatcher>>>,
}

impl<'r, 'a> RedirectDecider<'r, 'a> {
    pub fn new(resolver: &'r SiteResolver<'a>) -> Self {
        Self {
            settings: resolver.settings(),
            resolver,
            exclusions: RefCell::new(HashMap::new()),
        }
    }

    /// Compiled global + group exclusions for `group`.
    pub fn exclusions_for(&self, group: GroupId) -> Rc<RouteExclusionMatcher> {
        if let Some(matcher) = self.exclusions.borrow().get(&group) {
            return Rc::clone(matcher);
        }

        let patterns = excluded_routes_for(
            group,
            &self.settings.global_excluded_routes,
            &self.settings.excluded_routes_by_group_id,
        );
        let matcher = Rc::new(RouteExclusionMatcher::compile(&patterns));
        self.exclusions
            .borrow_mut()
            .insert(group, Rc::clone(&matcher));
        matcher
    }

    /// Whether the request path is excluded for its current site's group.
    pub fn is_route_excluded(&self, request: &RequestContext) -> bool {
        self.exclusions_for(request.current_site().group_id)
            .is_excluded(request.path())
    }

    pub fn decide(&self, request: &RequestContext) -> Decision {
        if !self.settings.enabled {
            return Decision::skip(SkipReason::Disabled);
        }

        let kind = request.kind();
        if !kind.is_site_request {
            return Decision::skip(SkipReason::NotSiteRequest);
        }
        if kind.is_action_request {
            return Decision::skip(SkipReason::ActionRequest);
        }
        if self.is_route_excluded(request) {
            return Decision::skip(SkipReason::ExcludedRoute);
        }
        if self.settings.is_method_ignored(request.http_method()) {
            return Decision::skip(SkipReason::IgnoredMethod);
        }

        let current = request.current_site();
        if is_translated_route(request.absolute_url(), current) {
            return Decision::AcceptAndTagCookie {
                language: current.language.clone(),
            };
        }

        let group = current.group_id;
        if let Some(segment) = request.first_segment() {
            let supported = self.resolver.is_supported_language(group, segment);
            if supported {
                return Decision::AcceptAndTagCookie {
                    language: segment.to_string(),
                };
            }
            if is_valid_language_code(segment) {
                return Decision::skip(SkipReason::UnsupportedLanguageSegment);
            }
        }

        let language = self.resolver.preferred_language(request, group, None);
        let enabled = self.resolver.enabled_sites_for_group(group);
        match self.resolver.find_site_by_language(&language, &enabled) {
            Some(target) => Decision::Redirect {
                target_url: redirect_target(&target.base_url, request.path_info()),
                language,
            },
            None => Decision::skip(SkipReason::NoTargetSite),
        }
    }
}

/// `base_url` joined with `path_info`, without a trailing slash.
///
/// Never returns an empty string: a target that trims down to nothing is `/`.
pub fn redirect_target(base_url: &str, path_info: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path_info.trim_matches('/');

    let target = if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    };

    if target.is_empty() {
        "/".to_string()
    } else {
        target
    }
}
