//! Shared gateway state.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::body::Body;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::{GatewayConfig, Settings};
use crate::sites::StaticSiteDirectory;

/// Everything derived from one configuration version.
#[derive(Debug)]
pub struct InnerState {
    pub config: GatewayConfig,
    pub settings: Settings,
    pub directory: StaticSiteDirectory,
}

impl InnerState {
    pub fn from_config(config: GatewayConfig) -> Self {
        let settings = Settings::from(&config.redirect);
        let directory =
            StaticSiteDirectory::new(config.sites.clone()).with_default_site(config.default_site);
        Self {
            config,
            settings,
            directory,
        }
    }
}

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    /// Current snapshot; swapped atomically on reload.
    pub inner: Arc<ArcSwap<InnerState>>,
    pub client: Client<HttpConnector, Body>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            inner: Arc::new(ArcSwap::from_pointee(InnerState::from_config(config))),
            client,
        }
    }

    /// Replace the snapshot; requests already running keep the old one.
    pub fn reload(&self, config: GatewayConfig) {
        let sites = config.sites.len();
        let enabled = config.redirect.enabled;
        self.inner.store(Arc::new(InnerState::from_config(config)));
        tracing::info!(sites, enabled, "Configuration swapped");
    }
}
