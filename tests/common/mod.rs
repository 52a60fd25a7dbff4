//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use locale_redirect::config::{parse_config, GatewayConfig};
use locale_redirect::{HttpServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Three sites of one group on `brand.test`, English primary, redirects on.
pub const BRAND_CONFIG: &str = r#"
default_site = 1

[redirect]
enabled = true

[[redirect.primary_sites]]
group = 1
site = 1

[[redirect.global_excluded_routes]]
route = "/robots.txt"

[[redirect.global_excluded_routes]]
route = "/api/*"

[[sites]]
id = 1
group = 1
language = "en"
base_url = "http://brand.test/en/"

[[sites]]
id = 2
group = 1
language = "fr"
base_url = "http://brand.test/fr/"

[[sites]]
id = 3
group = 1
language = "de"
base_url = "http://brand.test/de/"
"#;

/// A running gateway bound to an ephemeral local port.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub config_updates: mpsc::UnboundedSender<GatewayConfig>,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn brand_config() -> GatewayConfig {
    parse_config(BRAND_CONFIG).unwrap()
}

/// Start the gateway with `config`; the listener is bound before this returns.
pub async fn start_gateway(config: GatewayConfig) -> TestGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    let shutdown = Shutdown::new();

    let server = HttpServer::new(config);
    let signal = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx, signal).await;
    });

    TestGateway {
        addr,
        shutdown,
        config_updates: tx,
    }
}

/// Start a mock upstream that answers every request with the value of the
/// `x-locale-site-id` header it received (or `none`).
pub async fn start_echo_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let head = read_head(&mut socket).await;
                        let site = head
                            .lines()
                            .filter_map(|line| line.split_once(':'))
                            .find(|(name, _)| name.trim().eq_ignore_ascii_case("x-locale-site-id"))
                            .map(|(_, value)| value.trim().to_string())
                            .unwrap_or_else(|| "none".to_string());

                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            site.len(),
                            site
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Client that never follows redirects, so 302s can be inspected.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
