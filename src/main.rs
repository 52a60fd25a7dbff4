//! Language redirect gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request
//!   ───────────────▶ request id ─▶ trace ─▶ timeout
//!                                             │
//!                                             ▼
//!                                 ┌───────────────────────┐
//!                                 │ locale middleware     │
//!                                 │  resolver ─▶ decider  │──── 302 + Set-Cookie ──▶ Client
//!                                 └──────────┬────────────┘
//!                                            │ accept / skip
//!                                            ▼
//!                                 ┌───────────────────────┐
//!                                 │ upstream proxy / echo │──────────────────────▶ Upstream
//!                                 └───────────────────────┘
//!
//!   config.toml ─▶ watcher ─▶ ArcSwap snapshot (settings + site directory)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use locale_redirect::config::watcher::ConfigWatcher;
use locale_redirect::lifecycle::{signals, startup, Shutdown};
use locale_redirect::HttpServer;

#[derive(Parser)]
#[command(name = "locale-redirect")]
#[command(about = "Language redirect gateway for multi-site deployments", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "LOCALE_REDIRECT_CONFIG")]
    config: Option<PathBuf>,

    /// Reload the configuration when the file changes.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = startup::load_initial_config(args.config.as_deref())?;
    startup::init_observability(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "locale-redirect starting");

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // The watcher handle must outlive the server
    let (_watcher, config_updates) = match (&args.config, args.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        _ => {
            let (_tx, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let mut server_task = tokio::spawn(server.run(listener, config_updates, shutdown.subscribe()));

    tokio::select! {
        _ = signals::wait_for_shutdown_signal() => {
            shutdown.trigger();
            server_task.await??;
        }
        result = &mut server_task => result??,
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
