//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Logging/metrics → Bind listener → Start watcher
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → server stops accepting → drain → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: an invalid config at startup is fatal
//! - Reload failures are never fatal; the previous snapshot stays

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
