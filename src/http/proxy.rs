//! Upstream forwarding.
//!
//! # Responsibilities
//! - Forward accepted requests to the configured upstream
//! - Without an upstream, describe the resolved site as JSON
//!
//! # Design Decisions
//! - Host header preserved; the upstream renders for the visitor's host
//! - Upstream failures become 502, never a panic
//! - No retries: the request body is streamed once

use std::str::FromStr;

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, PathAndQuery, Scheme},
        Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::middleware::CurrentSite;
use crate::http::request::request_id;
use crate::http::state::AppState;
use crate::observability::metrics;

/// Body of the built-in response when no upstream is configured.
#[derive(Debug, Serialize)]
pub struct SiteEcho {
    pub site_id: u32,
    pub group_id: u32,
    pub language: String,
    pub base_url: String,
    pub path: String,
}

/// Fallback handler: forward or echo.
pub async fn upstream_handler(State(state): State<AppState>, req: Request<Body>) -> Response {
    let upstream = state.inner.load().config.upstream.address.clone();
    match upstream {
        Some(address) => forward(&state, &address, req).await,
        None => echo_site(req),
    }
}

async fn forward(state: &AppState, address: &str, req: Request<Body>) -> Response {
    let request_id = request_id(req.headers()).to_string();
    let (mut parts, body) = req.into_parts();

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    match Authority::from_str(address) {
        Ok(authority) => uri_parts.authority = Some(authority),
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                upstream = %address,
                error = %e,
                "Invalid upstream address"
            );
            return (StatusCode::BAD_GATEWAY, "Invalid upstream address").into_response();
        }
    }
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Could not build upstream URI");
            return (StatusCode::BAD_GATEWAY, "Invalid upstream URI").into_response();
        }
    };

    tracing::debug!(request_id = %request_id, uri = %parts.uri, "Forwarding to upstream");

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            metrics::record_upstream_error();
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

fn echo_site(req: Request<Body>) -> Response {
    match req.extensions().get::<CurrentSite>() {
        Some(CurrentSite(site)) => Json(SiteEcho {
            site_id: site.id.0,
            group_id: site.group_id.0,
            language: site.language.clone(),
            base_url: site.base_url.clone(),
            path: req.uri().path().to_string(),
        })
        .into_response(),
        None => (StatusCode::NOT_FOUND, "No site configured").into_response(),
    }
}
