//! Integration tests for Driftline.
//!
//! # Running Tests
//!
//! These tests exercise a live storefront server and are `#[ignore]`-gated;
//! the `/api/integration/test` endpoint runs them with `--include-ignored`
//! against the server that spawned them.
//!
//! ```bash
//! # Terminal 1: migrate and start the server in demo mode
//! cargo run -p driftline-cli -- migrate
//! DEMO_MODE=true cargo run -p driftline-storefront
//!
//! # Terminal 2: run the suite
//! cargo test -p driftline-integration-tests -- --include-ignored
//! ```
//!
//! Required environment: `STOREFRONT_TOKEN_SECRET` matching the server, and
//! optionally `STOREFRONT_BASE_URL` (default `http://localhost:3000`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use secrecy::SecretString;

use driftline_core::UserId;
use driftline_storefront::services::TokenService;

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client for talking to the storefront.
///
/// # Panics
///
/// Panics if the client cannot be built; tests cannot proceed without one.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// Mint a bearer token with the same secret the server uses.
///
/// # Panics
///
/// Panics if `STOREFRONT_TOKEN_SECRET` is unset or signing fails.
#[must_use]
pub fn mint_token(user_id: &str) -> String {
    let secret = std::env::var("STOREFRONT_TOKEN_SECRET")
        .map(SecretString::from)
        .expect("STOREFRONT_TOKEN_SECRET must be set for integration tests");

    TokenService::new(&secret)
        .issue(&UserId::new(user_id))
        .expect("Failed to sign test token")
}

/// Regenerate demo data on the live server and return the response body.
///
/// # Panics
///
/// Panics if the request fails or the server is not in demo mode.
pub async fn seed_demo_data(client: &reqwest::Client) -> serde_json::Value {
    let resp = client
        .post(format!("{}/api/demo/generate", base_url()))
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("Failed to call /api/demo/generate");

    assert!(
        resp.status().is_success(),
        "demo generation failed; is the server running with DEMO_MODE=true?"
    );

    resp.json().await.expect("Failed to parse generate response")
}
