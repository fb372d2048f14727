//! Authentication middleware and extractors.
//!
//! Provides an extractor for requiring bearer-token authentication in route
//! handlers. The extractor verifies the token and resolves the principal in
//! one step; handlers only ever see a fully-loaded [`User`].

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// Extractor that requires bearer-token authentication.
///
/// Resolution: `Authorization: Bearer <token>` header → token service →
/// live user row. Every failure along that chain rejects with the same
/// generic 401, so a missing header, a forged token, an expired token, and
/// a deleted account are indistinguishable from outside.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub User);

/// Error returned when authentication is required but absent or invalid.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        AppError::Unauthorized.into_response()
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthRejection)?;

        let user_id = state.tokens().verify(token).ok_or(AuthRejection)?;

        // A valid token whose user vanished is treated exactly like a bad
        // token; only the server-side log can tell them apart.
        let user = crate::db::UserRepository::new(state.pool())
            .get_by_id(&user_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to resolve principal");
                AuthRejection
            })?
            .ok_or_else(|| {
                tracing::debug!(user_id = %user_id, "Token references missing user");
                AuthRejection
            })?;

        Ok(Self(user))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// Returns `None` for a missing header, non-UTF-8 bytes, or a value without
/// the exact `Bearer ` prefix.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/orders/1");
        if let Some(v) = value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extracts_value() {
        let parts = parts_with_auth(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let parts = parts_with_auth(None);
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let parts = parts_with_auth(Some("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_bearer_token_is_case_sensitive() {
        let parts = parts_with_auth(Some("bearer abc"));
        assert_eq!(bearer_token(&parts), None);
    }
}
