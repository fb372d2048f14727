//! Demo subsystem endpoints: stats and generation.
//!
//! Both are gated on the demo-mode flag read once at startup. Outside demo
//! mode they are plain 403s regardless of payload.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::DemoRepository;
use crate::error::{AppError, Result};
use crate::services::{DemoSeedOptions, DemoSeedSummary, DemoSeeder};
use crate::state::AppState;

/// Response for `GET|POST /api/demo/stats`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoStatsResponse {
    pub user_count: i64,
    pub order_count: i64,
    pub review_count: i64,
    pub last_reset: Option<DateTime<Utc>>,
}

/// Response for `POST /api/demo/generate`.
#[derive(Debug, Serialize)]
pub struct DemoGenerateResponse {
    pub success: bool,
    pub message: String,
    pub data: DemoSeedSummary,
}

fn require_demo_mode(state: &AppState) -> Result<()> {
    if state.config().demo.enabled {
        Ok(())
    } else {
        Err(AppError::FeatureDisabled(
            "Demo mode is not enabled".to_string(),
        ))
    }
}

/// Report counts of demo rows and the last reset time.
///
/// # Errors
///
/// Returns 403 outside demo mode and 500 on database failure.
pub async fn stats(State(state): State<AppState>) -> Result<Json<DemoStatsResponse>> {
    require_demo_mode(&state)?;

    let stats = DemoRepository::new(state.pool())
        .stats(&state.config().demo.admin_email)
        .await?;

    Ok(Json(DemoStatsResponse {
        user_count: stats.user_count,
        order_count: stats.order_count,
        review_count: stats.review_count,
        last_reset: stats.last_reset,
    }))
}

/// Regenerate demo data.
///
/// The body is optional; omitted fields use the documented defaults
/// (3 users, 5 orders, 8 reviews, admin included).
///
/// # Errors
///
/// Returns 403 outside demo mode and 500 when seeding fails.
pub async fn generate(
    State(state): State<AppState>,
    body: Option<Json<DemoSeedOptions>>,
) -> Result<Json<DemoGenerateResponse>> {
    require_demo_mode(&state)?;

    let options = body.map_or_else(DemoSeedOptions::default, |Json(options)| options);

    let summary = DemoSeeder::new(state.pool(), &state.config().demo.admin_email)
        .seed(&options)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Demo data generation failed");
            AppError::Internal("Failed to generate demo data".to_string())
        })?;

    let message = format!(
        "Generated {} demo users, {} orders, {} reviews",
        summary.users_created, summary.orders_created, summary.reviews_created
    );

    Ok(Json(DemoGenerateResponse {
        success: true,
        message,
        data: summary,
    }))
}
