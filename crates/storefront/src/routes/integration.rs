//! Integration-test endpoint.
//!
//! Triggers a full external test-suite run and reports its structured
//! results. This is the one place where runner diagnostics are deliberately
//! echoed to the client.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::services::{TestRunResults, TestRunner};
use crate::state::AppState;

/// Optional POST body for `POST /api/integration/test`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationTestRequest {
    /// Requested single test. Running one named test is not implemented;
    /// supplying this yields a 501.
    #[serde(default)]
    pub test_name: Option<String>,
}

/// Response for a completed suite run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationTestResponse {
    pub success: bool,
    pub results: TestRunResults,
    pub timestamp: DateTime<Utc>,
}

/// Run the full suite (GET).
///
/// # Errors
///
/// Returns 500 when the runner cannot be spawned.
pub async fn run_get(State(state): State<AppState>) -> Result<Json<IntegrationTestResponse>> {
    run_suite(&state).await
}

/// Run the full suite (POST), rejecting single-test requests.
///
/// # Errors
///
/// Returns 501 when `testName` is supplied and 500 when the runner cannot
/// be spawned.
pub async fn run_post(
    State(state): State<AppState>,
    body: Option<Json<IntegrationTestRequest>>,
) -> Result<Json<IntegrationTestResponse>> {
    if let Some(Json(request)) = body
        && request.test_name.is_some()
    {
        return Err(AppError::Unsupported(
            "Running a single test is not supported".to_string(),
        ));
    }

    run_suite(&state).await
}

async fn run_suite(state: &AppState) -> Result<Json<IntegrationTestResponse>> {
    let results = TestRunner::from_config(&state.config().test_runner)
        .run()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Integration test run failed to start");
            AppError::Internal("Failed to run integration tests".to_string())
        })?;

    Ok(Json(IntegrationTestResponse {
        success: true,
        results,
        timestamp: Utc::now(),
    }))
}
