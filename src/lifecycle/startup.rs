//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging and metrics
//! - Summarize the site directory once, so misconfiguration shows at boot

use std::path::Path;

use crate::config::{load_config, ConfigError, GatewayConfig, Settings};
use crate::observability::{logging, metrics};

/// Config from `path`, or the defaults when no path is given.
pub fn load_initial_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(GatewayConfig::default()),
    }
}

/// Logging first, then metrics, then a summary of what was loaded.
pub fn init_observability(config: &GatewayConfig) {
    logging::init(&config.observability);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    log_summary(config);
}

fn log_summary(config: &GatewayConfig) {
    let settings = Settings::from(&config.redirect);
    tracing::info!(
        bind_address = %config.listener.bind_address,
        sites = config.sites.len(),
        redirect_enabled = settings.enabled,
        cookie_name = %settings.cookie_name,
        upstream = ?config.upstream.address,
        "Configuration loaded"
    );

    if !settings.enabled {
        tracing::warn!("Language redirect is disabled; requests pass through unchanged");
    }
    for site in &config.sites {
        tracing::debug!(
            site = %site.id,
            group = %site.group_id,
            language = %site.language,
            base_url = %site.base_url,
            "Site registered"
        );
    }
}
