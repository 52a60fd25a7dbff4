//! Language redirect subsystem.
//!
//! # Data Flow
//! ```text
//! RequestContext + Settings + SiteDirectory snapshot
//!     → evaluate()
//!         site request? → resolve current site (cookie unless route excluded)
//!     → decider.rs (skip rules → accept rules → negotiated redirect)
//!     → Decision
//!     → host executes it (cookie.rs renders Set-Cookie)
//! ```
//!
//! # Design Decisions
//! - Exactly one evaluation per request, before routing/rendering
//! - Decisions are plain data; executing them is the host's job
//! - Disabled settings short-circuit before any resolution work

pub mod cookie;
pub mod decider;
pub mod decision;

pub use cookie::{cookie_value, LanguageCookie, COOKIE_MAX_AGE_SECS};
pub use decider::{redirect_target, RedirectDecider};
pub use decision::{Decision, SkipReason};

use crate::config::Settings;
use crate::resolver::{RequestContext, SiteResolver};
use crate::sites::SiteDirectory;

/// Resolve the current site and decide what to do with the request.
///
/// May replace `request`'s current site before deciding.
pub fn evaluate(
    settings: &Settings,
    directory: &dyn SiteDirectory,
    request: &mut RequestContext,
) -> Decision {
    if !settings.enabled {
        return Decision::skip(SkipReason::Disabled);
    }

    let resolver = SiteResolver::new(settings, directory);
    let decider = RedirectDecider::new(&resolver);

    if request.kind().is_site_request {
        let check_cookie = !decider.is_route_excluded(request);
        resolver.resolve_and_apply(request, check_cookie);
    }

    decider.decide(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{PrimarySite, RedirectConfig};
    use crate::routing::RoutePattern;
    use crate::sites::{GroupId, Site, SiteId, StaticSiteDirectory};

    fn setup() -> (Settings, StaticSiteDirectory) {
        let settings = Settings::from(&RedirectConfig {
            enabled: true,
            primary_sites: vec![PrimarySite {
                group: GroupId(1),
                site: SiteId(1),
            }],
            global_excluded_routes: vec![RoutePattern::new("/robots.txt")],
            ..RedirectConfig::default()
        });
        let dir = StaticSiteDirectory::new(vec![
            Site::new(1, 1, "en", "https://brand.test/en/"),
            Site::new(2, 1, "fr", "https://brand.test/fr/"),
        ]);
        (settings, dir)
    }

    fn ambient_request(dir: &StaticSiteDirectory, url: &str) -> RequestContext {
        let parsed = url::Url::parse(url).unwrap();
        let host_info = parsed.origin().ascii_serialization();
        let current = dir.ambient_site(&host_info, url).cloned().unwrap();
        RequestContext::from_url(url, current).unwrap()
    }

    #[test]
    fn test_cookie_drives_site_and_redirect() {
        let (settings, dir) = setup();
        let mut req = ambient_request(&dir, "https://brand.test/")
            .with_language_cookie(Some("fr".into()));

        let decision = evaluate(&settings, &dir, &mut req);
        assert_eq!(req.current_site().id, SiteId(2));
        assert_eq!(
            decision,
            Decision::Redirect {
                target_url: "https://brand.test/fr".into(),
                language: "fr".into(),
            }
        );
    }

    #[test]
    fn test_translated_url_keeps_site() {
        let (settings, dir) = setup();
        let mut req = ambient_request(&dir, "https://brand.test/fr/contact")
            .with_language_cookie(Some("en".into()));

        let decision = evaluate(&settings, &dir, &mut req);
        assert_eq!(req.current_site().id, SiteId(2));
        assert_eq!(decision, Decision::AcceptAndTagCookie { language: "fr".into() });
    }

    #[test]
    fn test_excluded_route_resolves_without_cookie() {
        let (settings, dir) = setup();
        let mut req = ambient_request(&dir, "https://brand.test/robots.txt")
            .with_language_cookie(Some("fr".into()));

        let decision = evaluate(&settings, &dir, &mut req);
        assert_eq!(req.current_site().id, SiteId(1));
        assert_eq!(decision, Decision::skip(SkipReason::ExcludedRoute));
    }

    #[test]
    fn test_disabled_does_nothing() {
        let (mut settings, dir) = setup();
        settings.enabled = false;
        let mut req = ambient_request(&dir, "https://brand.test/")
            .with_language_cookie(Some("fr".into()));
        let before = req.current_site().clone();

        assert_eq!(evaluate(&settings, &dir, &mut req), Decision::skip(SkipReason::Disabled));
        assert_eq!(req.current_site(), &before);
    }
}
