//! Request inspection.
//!
//! # Responsibilities
//! - Read the request ID set by the request-id layer
//! - Reconstruct host info and absolute URL as the visitor sees them
//! - Classify back-office and action requests
//! - Build the engine's RequestContext

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, Request};

use crate::config::{ListenerConfig, RequestConfig};
use crate::http::state::InnerState;
use crate::redirect::cookie_value;
use crate::resolver::{RequestContext, RequestKind};
use crate::routing::normalize_path;
use crate::sites::SiteDirectory;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request ID assigned at the edge, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Scheme the visitor used.
pub fn request_scheme<'a>(headers: &HeaderMap, listener: &'a ListenerConfig) -> &'a str {
    if listener.trust_forwarded_proto {
        let forwarded = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_ascii_lowercase());
        match forwarded.as_deref() {
            Some("https") => return "https",
            Some("http") => return "http",
            _ => {}
        }
    }
    &listener.scheme
}

/// Back-office / action classification.
pub fn classify(path: &str, query: Option<&str>, rules: &RequestConfig) -> RequestKind {
    let normalized = normalize_path(path);
    let first_segment = normalized.trim_start_matches('/').split('/').next().unwrap_or("");

    let is_cp = !rules.cp_trigger.is_empty() && first_segment == rules.cp_trigger;
    let is_internal = rules.internal_prefixes.iter().any(|prefix| {
        let prefix = normalize_path(prefix);
        prefix != "/" && (normalized == prefix || normalized.starts_with(&format!("{prefix}/")))
    });

    let has_action_param = query
        .map(|q| q.split('&').any(|pair| pair.split('=').next() == Some("action")))
        .unwrap_or(false);
    let is_action = has_action_param
        || (!rules.action_trigger.is_empty() && first_segment == rules.action_trigger);

    RequestKind {
        is_site_request: !is_cp && !is_internal,
        is_action_request: is_action,
    }
}

/// Engine input for `req`, or `None` when the directory has no site at all.
pub fn build_context(req: &Request<Body>, state: &InnerState) -> Option<RequestContext> {
    let headers = req.headers();
    let uri = req.uri();

    let scheme = request_scheme(headers, &state.config.listener);
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or("localhost");
    let host_info = format!("{scheme}://{host}");
    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let absolute_url = format!("{host_info}{path_and_query}");

    let current = state.directory.ambient_site(&host_info, &absolute_url)?.clone();

    let cookie_name = &state.settings.cookie_name;
    let language_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| cookie_value(v, cookie_name))
        .map(str::to_string);
    let accept_language = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let kind = classify(uri.path(), uri.query(), &state.config.request);

    Some(
        RequestContext::new(host_info, path_and_query, current)
            .with_method(req.method().as_str())
            .with_language_cookie(language_cookie)
            .with_accept_language(accept_language)
            .with_secure(scheme == "https")
            .with_kind(kind),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use crate::sites::Site;

    fn state() -> InnerState {
        let mut config = GatewayConfig {
            sites: vec![
                Site::new(1, 1, "en", "http://brand.test/en/"),
                Site::new(2, 1, "fr", "http://brand.test/fr/"),
            ],
            ..GatewayConfig::default()
        };
        config.redirect.cookie_name = "lang".into();
        config.request.internal_prefixes = vec!["/api".into()];
        InnerState::from_config(config)
    }

    #[test]
    fn test_classify() {
        let rules = RequestConfig {
            internal_prefixes: vec!["/api/".into()],
            ..RequestConfig::default()
        };
        assert_eq!(classify("/about", None, &rules), RequestKind::default());
        assert!(!classify("/admin/entries", None, &rules).is_site_request);
        assert!(classify("/administrator", None, &rules).is_site_request);
        assert!(!classify("/api", None, &rules).is_site_request);
        assert!(!classify("/api/v1/x", None, &rules).is_site_request);
        assert!(classify("/apiary", None, &rules).is_site_request);
        assert!(classify("/actions/users/login", None, &rules).is_action_request);
        assert!(classify("/", Some("foo=1&action=users/login"), &rules).is_action_request);
        assert!(!classify("/", Some("transaction=1"), &rules).is_action_request);
    }

    #[test]
    fn test_build_context_reads_headers() {
        let req = Request::builder()
            .method("GET")
            .uri("/fr/page?x=1")
            .header("Host", "brand.test")
            .header("Cookie", "session=1; lang=fr")
            .header("Accept-Language", "fr-BE")
            .body(Body::empty())
            .unwrap();

        let ctx = build_context(&req, &state()).unwrap();
        assert_eq!(ctx.host_info(), "http://brand.test");
        assert_eq!(ctx.absolute_url(), "http://brand.test/fr/page?x=1");
        assert_eq!(ctx.current_site().language, "fr");
        assert_eq!(ctx.language_cookie(), Some("fr"));
        assert_eq!(ctx.accept_language(), Some("fr-BE"));
        assert!(!ctx.is_secure());
    }

    #[test]
    fn test_forwarded_proto_only_when_trusted() {
        let mut listener = ListenerConfig::default();
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-proto", "https".parse().unwrap());
        assert_eq!(request_scheme(&headers, &listener), "http");

        listener.trust_forwarded_proto = true;
        assert_eq!(request_scheme(&headers, &listener), "https");
    }

    #[test]
    fn test_no_sites_no_context() {
        let state = InnerState::from_config(GatewayConfig::default());
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert!(build_context(&req, &state).is_none());
    }

    #[test]
    fn test_request_id_fallback() {
        assert_eq!(request_id(&HeaderMap::new()), "unknown");
    }
}
