//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::RoutePattern;
use crate::sites::{GroupId, Site, SiteId};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, public scheme).
    pub listener: ListenerConfig,

    /// Application the gateway forwards accepted requests to.
    pub upstream: UpstreamConfig,

    /// Site directory, in the order sites should be considered.
    pub sites: Vec<Site>,

    /// Site served when the request URL and host match none.
    pub default_site: Option<SiteId>,

    /// Language redirect settings.
    pub redirect: RedirectConfig,

    /// Request classification (back office, actions).
    pub request: RequestConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Scheme visitors use to reach the gateway ("http" or "https").
    pub scheme: String,

    /// Take the scheme from `X-Forwarded-Proto` when a TLS terminator sits in front.
    pub trust_forwarded_proto: bool,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            scheme: "http".to_string(),
            trust_forwarded_proto: false,
        }
    }
}

/// Upstream application.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream address (e.g., "127.0.0.1:3000"). Without one the gateway
    /// answers with a JSON description of the resolved site.
    pub address: Option<String>,
}

/// Language redirect settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// Master switch.
    pub enabled: bool,

    /// Methods that are never redirected.
    pub http_methods_ignored: Vec<String>,

    /// Name of the language preference cookie.
    pub cookie_name: String,

    /// Canonical site per group.
    pub primary_sites: Vec<PrimarySite>,

    /// Routes never redirected, whatever the group.
    pub global_excluded_routes: Vec<RoutePattern>,

    /// Per-group disabled sites and exclusions.
    pub groups: Vec<GroupRules>,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            http_methods_ignored: ["POST", "PUT", "PATCH", "DELETE"]
                .into_iter()
                .map(String::from)
                .collect(),
            cookie_name: "language".to_string(),
            primary_sites: Vec::new(),
            global_excluded_routes: Vec::new(),
            groups: Vec::new(),
        }
    }
}

/// `{ group = 1, site = 3 }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PrimarySite {
    pub group: GroupId,
    pub site: SiteId,
}

/// Rules scoped to one site group.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroupRules {
    pub group: GroupId,

    /// Sites excluded from candidacy. Absent means every site is a candidate.
    #[serde(default)]
    pub disabled_sites: Option<Vec<SiteId>>,

    #[serde(default)]
    pub excluded_routes: Vec<RoutePattern>,
}

/// How to recognise requests that are not public site content.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestConfig {
    /// First path segment of back-office requests.
    pub cp_trigger: String,

    /// First path segment of action requests.
    pub action_trigger: String,

    /// Additional internal path prefixes (APIs, asset pipelines).
    pub internal_prefixes: Vec<String>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            cp_trigger: "admin".to_string(),
            action_trigger: "actions".to_string(),
            internal_prefixes: Vec::new(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
