//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (pings the database)
//!
//! # Profile (requires bearer token)
//! PUT  /api/auth/profile        - Update the authenticated user's profile
//!
//! # Orders (requires bearer token)
//! GET  /api/orders/{order_id}   - Fetch one owned order with media projection
//!
//! # Demo (requires demo mode)
//! GET  /api/demo/stats          - Demo row counts + last reset time
//! POST /api/demo/stats          - Same as GET
//! POST /api/demo/generate       - Regenerate demo data
//!
//! # Integration tests
//! GET  /api/integration/test    - Run the external test suite
//! POST /api/integration/test    - Same; named single-test runs are 501
//! ```

pub mod demo;
pub mod integration;
pub mod orders;
pub mod profile;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create all API routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/profile", put(profile::update_profile))
        .route("/api/orders/{order_id}", get(orders::get_order))
        .route("/api/demo/stats", get(demo::stats).post(demo::stats))
        .route("/api/demo/generate", post(demo::generate))
        .route(
            "/api/integration/test",
            get(integration::run_get).post(integration::run_post),
        )
}
