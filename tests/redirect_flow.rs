//! End-to-end tests through the HTTP gateway.

mod common;

use std::time::Duration;

use reqwest::header::{ACCEPT_LANGUAGE, COOKIE, HOST, LOCATION, SET_COOKIE};
use reqwest::StatusCode;
use serde_json::Value;

use common::{brand_config, client, start_echo_backend, start_gateway};

#[tokio::test]
async fn test_root_redirects_to_negotiated_language() {
    let gateway = start_gateway(brand_config()).await;

    let response = client()
        .get(gateway.url("/"))
        .header(HOST, "brand.test")
        .header(ACCEPT_LANGUAGE, "fr-FR,fr;q=0.9,en;q=0.5")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[LOCATION], "http://brand.test/fr");

    let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("language=fr;"));
    assert!(cookie.contains("Max-Age=31536000"));
    assert!(cookie.contains("Path=/"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_cookie_wins_over_accept_language() {
    let gateway = start_gateway(brand_config()).await;

    let response = client()
        .get(gateway.url("/about"))
        .header(HOST, "brand.test")
        .header(COOKIE, "theme=dark; language=de")
        .header(ACCEPT_LANGUAGE, "fr")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[LOCATION], "http://brand.test/de/about");
}

#[tokio::test]
async fn test_translated_route_is_forwarded_and_tagged() {
    let backend = start_echo_backend().await;
    let mut config = brand_config();
    config.upstream.address = Some(backend.to_string());
    let gateway = start_gateway(config).await;

    let response = client()
        .get(gateway.url("/fr/contact"))
        .header(HOST, "brand.test")
        .header(ACCEPT_LANGUAGE, "de")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(cookie.starts_with("language=fr;"));
    assert_eq!(response.text().await.unwrap(), "2");
}

#[tokio::test]
async fn test_ignored_method_passes_through() {
    let backend = start_echo_backend().await;
    let mut config = brand_config();
    config.upstream.address = Some(backend.to_string());
    let gateway = start_gateway(config).await;

    let response = client()
        .post(gateway.url("/"))
        .header(HOST, "brand.test")
        .header(ACCEPT_LANGUAGE, "fr")
        .body("payload")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert_eq!(response.text().await.unwrap(), "1");
}

#[tokio::test]
async fn test_excluded_route_ignores_cookie() {
    let backend = start_echo_backend().await;
    let mut config = brand_config();
    config.upstream.address = Some(backend.to_string());
    let gateway = start_gateway(config).await;

    let response = client()
        .get(gateway.url("/robots.txt"))
        .header(HOST, "brand.test")
        .header(COOKIE, "language=de")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
    // Resolved to the primary site, not the cookie's.
    assert_eq!(response.text().await.unwrap(), "1");
}

#[tokio::test]
async fn test_unsupported_language_segment_is_left_alone() {
    let gateway = start_gateway(brand_config()).await;

    let response = client()
        .get(gateway.url("/es/page"))
        .header(HOST, "brand.test")
        .header(ACCEPT_LANGUAGE, "fr")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_echo_describes_resolved_site() {
    let gateway = start_gateway(brand_config()).await;

    let response = client()
        .get(gateway.url("/de/page"))
        .header(HOST, "brand.test")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-request-id").is_some());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["site_id"], 3);
    assert_eq!(body["group_id"], 1);
    assert_eq!(body["language"], "de");
    assert_eq!(body["path"], "/de/page");
}

#[tokio::test]
async fn test_reload_applies_new_settings() {
    let gateway = start_gateway(brand_config()).await;
    let http = client();

    let before = http
        .get(gateway.url("/"))
        .header(HOST, "brand.test")
        .header(ACCEPT_LANGUAGE, "fr")
        .send()
        .await
        .unwrap();
    assert_eq!(before.status(), StatusCode::FOUND);

    let mut disabled = brand_config();
    disabled.redirect.enabled = false;
    gateway.config_updates.send(disabled).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let after = http
        .get(gateway.url("/"))
        .header(HOST, "brand.test")
        .header(ACCEPT_LANGUAGE, "fr")
        .send()
        .await
        .unwrap();
    assert_eq!(after.status(), StatusCode::OK);
    assert!(after.headers().get(SET_COOKIE).is_none());
}
