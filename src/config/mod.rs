//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse, env overrides)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → settings.rs (lookup-friendly Settings for the engine)
//!     → shared via ArcSwap snapshot to all requests
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → atomic swap of the snapshot
//!     → in-flight requests keep the snapshot they started with
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod settings;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, parse_config_with_env, ConfigError, COOKIE_NAME_ENV};
pub use schema::{
    GatewayConfig, GroupRules, ListenerConfig, LogFormat, ObservabilityConfig, PrimarySite,
    RedirectConfig, RequestConfig, TimeoutConfig, UpstreamConfig,
};
pub use settings::Settings;
pub use validation::{validate_config, ValidationError};
