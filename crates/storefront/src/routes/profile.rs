//! Profile update endpoint.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use driftline_core::Email;

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::UserProfile;
use crate::state::AppState;

/// Request body for `PUT /api/auth/profile`.
///
/// Missing fields deserialize to empty strings so that "absent" and "empty"
/// fail validation identically.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

/// Response for a successful profile update.
#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub success: bool,
    pub user: UserProfile,
}

/// Validated profile input, produced by one validation pass before any
/// business logic runs.
#[derive(Debug)]
struct ValidatedProfile {
    first_name: String,
    last_name: String,
    email: Email,
}

impl UpdateProfileRequest {
    fn validate(self) -> Result<ValidatedProfile> {
        if self.first_name.is_empty() || self.last_name.is_empty() || self.email.is_empty() {
            return Err(AppError::Validation("All fields are required".to_string()));
        }

        let email = Email::parse(&self.email)
            .map_err(|_| AppError::Validation("Invalid email address".to_string()))?;

        Ok(ValidatedProfile {
            first_name: self.first_name,
            last_name: self.last_name,
            email,
        })
    }
}

/// Update the authenticated user's profile.
///
/// The target row is always the principal from the verified token; a client
/// cannot name another account. Any repository failure — including the row
/// vanishing between authentication and update — is a plain 500.
///
/// # Errors
///
/// Returns 401 when unauthenticated, 400 on validation failure, and 500
/// when the update cannot be applied.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>> {
    let input = body.validate()?;

    let updated = UserRepository::new(state.pool())
        .update_profile(&user.id, &input.first_name, &input.last_name, &input.email)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %user.id, "Profile update failed");
            AppError::Internal("Failed to update profile".to_string())
        })?;

    Ok(Json(UpdateProfileResponse {
        success: true,
        user: updated.into(),
    }))
}
