//! Demo subsystem endpoints: generation defaults and stats counting.
//!
//! Run with: cargo test -p driftline-integration-tests -- --include-ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use driftline_integration_tests::{base_url, client, seed_demo_data};

#[tokio::test]
#[ignore = "Requires running storefront server with DEMO_MODE=true"]
async fn generate_with_no_body_uses_defaults() {
    let c = client();
    let body = seed_demo_data(&c).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["usersCreated"], 3);
    assert_eq!(body["data"]["ordersCreated"], 5);
    assert_eq!(body["data"]["reviewsCreated"], 8);
}

#[tokio::test]
#[ignore = "Requires running storefront server with DEMO_MODE=true"]
async fn generate_with_partial_body_merges_defaults() {
    let c = client();

    let resp = c
        .post(format!("{}/api/demo/generate", base_url()))
        .json(&json!({"userCount": 1}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json body");

    assert_eq!(body["data"]["usersCreated"], 1);
    assert_eq!(body["data"]["ordersCreated"], 5);
    assert_eq!(body["data"]["reviewsCreated"], 8);
}

#[tokio::test]
#[ignore = "Requires running storefront server with DEMO_MODE=true"]
async fn stats_reflect_generated_counts() {
    let c = client();
    seed_demo_data(&c).await;

    let resp = c
        .get(format!("{}/api/demo/stats", base_url()))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json body");

    assert_eq!(body["userCount"], 3);
    assert_eq!(body["orderCount"], 5);
    assert_eq!(body["reviewCount"], 8);
    assert!(body["lastReset"].is_string(), "lastReset set after generation");
}

#[tokio::test]
#[ignore = "Requires running storefront server with DEMO_MODE=true"]
async fn stats_accepts_post_as_well() {
    let c = client();
    seed_demo_data(&c).await;

    let resp = c
        .post(format!("{}/api/demo/stats", base_url()))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
}
