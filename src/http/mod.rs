//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout layers)
//!     → middleware.rs (build RequestContext, run the engine, execute Decision)
//!         Redirect → 302 + Set-Cookie, done
//!         Accept   → continue, Set-Cookie on the response
//!         Skip     → continue
//!     → proxy.rs (forward to upstream, or echo the resolved site)
//!     → Send to client
//! ```

pub mod middleware;
pub mod proxy;
pub mod request;
pub mod server;
pub mod state;

pub use middleware::{CurrentSite, X_LOCALE_LANGUAGE, X_LOCALE_SITE_ID};
pub use request::X_REQUEST_ID;
pub use server::HttpServer;
pub use state::{AppState, InnerState};
