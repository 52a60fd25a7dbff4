//! Language redirect middleware.
//!
//! Runs the engine once per request, before the upstream sees it, and
//! executes the decision: 302 + cookie, cookie on the way out, or nothing.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderName, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::request::{build_context, request_id};
use crate::http::state::AppState;
use crate::observability::metrics;
use crate::redirect::{evaluate, Decision, LanguageCookie};
use crate::sites::Site;

/// Site id forwarded to the upstream.
pub const X_LOCALE_SITE_ID: HeaderName = HeaderName::from_static("x-locale-site-id");

/// Site language forwarded to the upstream.
pub const X_LOCALE_LANGUAGE: HeaderName = HeaderName::from_static("x-locale-language");

/// The site the request is served from, attached as a request extension.
#[derive(Clone, Debug)]
pub struct CurrentSite(pub Site);

pub async fn locale_redirect_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let snapshot = state.inner.load_full();

    let Some(mut ctx) = build_context(&req, &snapshot) else {
        tracing::warn!("No sites configured, passing request through");
        return next.run(req).await;
    };

    let decision = evaluate(&snapshot.settings, &snapshot.directory, &mut ctx);
    metrics::record_decision(&decision, start);

    let request_id = request_id(req.headers()).to_string();
    tracing::debug!(
        request_id = %request_id,
        method = %ctx.http_method(),
        url = %ctx.absolute_url(),
        site = %ctx.current_site().id,
        outcome = decision.outcome(),
        "Locale decision"
    );

    let site = ctx.current_site().clone();
    if let Ok(value) = HeaderValue::from_str(&site.id.to_string()) {
        req.headers_mut().insert(X_LOCALE_SITE_ID, value);
    }
    if let Ok(value) = HeaderValue::from_str(&site.language) {
        req.headers_mut().insert(X_LOCALE_LANGUAGE, value);
    }
    req.extensions_mut().insert(CurrentSite(site));

    let cookie = decision.cookie_language().map(|language| {
        LanguageCookie::new(&snapshot.settings.cookie_name, language, ctx.is_secure())
    });

    match (decision, cookie) {
        (Decision::Redirect { target_url, language }, Some(cookie)) => {
            match redirect_response(&target_url, &cookie) {
                Some(response) => {
                    tracing::info!(
                        request_id = %request_id,
                        target = %target_url,
                        %language,
                        "Redirecting to preferred language"
                    );
                    response
                }
                None => {
                    tracing::warn!(
                        request_id = %request_id,
                        target = %target_url,
                        "Unusable redirect target"
                    );
                    next.run(req).await
                }
            }
        }
        (Decision::AcceptAndTagCookie { .. }, Some(cookie)) => {
            let mut response = next.run(req).await;
            append_cookie(&mut response, &cookie);
            response
        }
        (Decision::Skip { reason }, _) => {
            tracing::trace!(request_id = %request_id, reason = reason.as_str(), "Redirect skipped");
            next.run(req).await
        }
        _ => next.run(req).await,
    }
}

/// 302 to `target` with the cookie set; `None` if either header is invalid.
fn redirect_response(target: &str, cookie: &LanguageCookie) -> Option<Response> {
    let location = HeaderValue::from_str(target).ok()?;
    let set_cookie = HeaderValue::from_str(&cookie.header_value()).ok()?;

    let mut response = StatusCode::FOUND.into_response();
    let headers = response.headers_mut();
    headers.insert(header::SET_COOKIE, set_cookie);
    headers.insert(header::LOCATION, location);
    Some(response)
}

fn append_cookie(response: &mut Response, cookie: &LanguageCookie) {
    match HeaderValue::from_str(&cookie.header_value()) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::warn!(error = %e, cookie = %cookie.name, "Invalid cookie value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_response_headers() {
        let cookie = LanguageCookie::new("language", "fr", true);
        let response = redirect_response("https://site.fr/about", &cookie).unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "https://site.fr/about");
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with("language=fr; "));
        assert!(set_cookie.contains("; Secure; HttpOnly; SameSite=Lax"));
    }

    #[test]
    fn test_redirect_response_rejects_bad_target() {
        let cookie = LanguageCookie::new("language", "fr", false);
        assert!(redirect_response("https://site.fr/\nx", &cookie).is_none());
    }

    #[test]
    fn test_append_cookie_keeps_existing() {
        let mut response = StatusCode::OK.into_response();
        response
            .headers_mut()
            .insert(header::SET_COOKIE, HeaderValue::from_static("session=1"));
        append_cookie(&mut response, &LanguageCookie::new("language", "en", false));
        assert_eq!(response.headers().get_all(header::SET_COOKIE).iter().count(), 2);
    }
}
