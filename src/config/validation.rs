//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (primary and disabled sites exist, in the right group)
//! - Validate cookie name, route patterns, base URLs and addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;
use crate::routing::RoutePattern;
use crate::sites::{GroupId, SiteId};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("cookie name {0:?} must start with a letter and contain only letters, digits and underscores")]
    InvalidCookieName(String),

    #[error("http_methods_ignored must not be empty")]
    NoIgnoredMethods,

    #[error("excluded route {0:?} must be non-empty and start with '/'")]
    InvalidRoute(String),

    #[error("group {0} has more than one primary site")]
    DuplicatePrimarySite(GroupId),

    #[error("duplicate site id {0}")]
    DuplicateSiteId(SiteId),

    #[error("{context} references unknown site {site}")]
    UnknownSite { context: &'static str, site: SiteId },

    #[error("site {site} is not in group {group}")]
    WrongGroup { group: GroupId, site: SiteId },

    #[error("site {site} has invalid base URL {base_url:?}")]
    InvalidBaseUrl { site: SiteId, base_url: String },

    #[error("site {0} has an empty language")]
    EmptyLanguage(SiteId),

    #[error("{field} is not a valid socket address: {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("listener scheme must be http or https, got {0:?}")]
    InvalidScheme(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_sites(config, &mut errors);
    validate_redirect(config, &mut errors);
    validate_listener(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `^[A-Za-z][A-Za-z0-9_]*$`
pub fn is_valid_cookie_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn is_valid_route(pattern: &RoutePattern) -> bool {
    let route = pattern.route.trim();
    !route.is_empty() && route.starts_with('/')
}

fn validate_sites(config: &GatewayConfig, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for site in &config.sites {
        if !seen.insert(site.id) {
            errors.push(ValidationError::DuplicateSiteId(site.id));
        }
        if site.language.trim().is_empty() {
            errors.push(ValidationError::EmptyLanguage(site.id));
        }
        let valid_url = url::Url::parse(&site.base_url)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
            .unwrap_or(false);
        if !valid_url {
            errors.push(ValidationError::InvalidBaseUrl {
                site: site.id,
                base_url: site.base_url.clone(),
            });
        }
    }

    if let Some(id) = config.default_site {
        if !seen.contains(&id) {
            errors.push(ValidationError::UnknownSite {
                context: "default_site",
                site: id,
            });
        }
    }
}

fn validate_redirect(config: &GatewayConfig, errors: &mut Vec<ValidationError>) {
    let redirect = &config.redirect;

    if !is_valid_cookie_name(&redirect.cookie_name) {
        errors.push(ValidationError::InvalidCookieName(redirect.cookie_name.clone()));
    }
    if redirect.http_methods_ignored.is_empty() {
        errors.push(ValidationError::NoIgnoredMethods);
    }

    let routes = redirect
        .global_excluded_routes
        .iter()
        .chain(redirect.groups.iter().flat_map(|g| &g.excluded_routes));
    for pattern in routes {
        if !is_valid_route(pattern) {
            errors.push(ValidationError::InvalidRoute(pattern.route.clone()));
        }
    }

    let mut primary_groups = HashSet::new();
    for primary in &redirect.primary_sites {
        if !primary_groups.insert(primary.group) {
            errors.push(ValidationError::DuplicatePrimarySite(primary.group));
        }
        check_site_in_group(config, "primary_sites", primary.group, primary.site, errors);
    }

    for rules in &redirect.groups {
        for site in rules.disabled_sites.iter().flatten() {
            check_site_in_group(config, "disabled_sites", rules.group, *site, errors);
        }
    }
}

fn check_site_in_group(
    config: &GatewayConfig,
    context: &'static str,
    group: GroupId,
    site: SiteId,
    errors: &mut Vec<ValidationError>,
) {
    match config.sites.iter().find(|s| s.id == site) {
        None => errors.push(ValidationError::UnknownSite { context, site }),
        Some(s) if s.group_id != group => errors.push(ValidationError::WrongGroup { group, site }),
        Some(_) => {}
    }
}

fn validate_listener(config: &GatewayConfig, errors: &mut Vec<ValidationError>) {
    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if !matches!(config.listener.scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::InvalidScheme(config.listener.scheme.clone()));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }
}
