//! Order access endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use driftline_core::OrderId;

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::OrderResponse;
use crate::state::AppState;

/// Fetch a single order owned by the authenticated user.
///
/// The id and the owner are matched in one compound query, so a wrong id
/// and another user's order produce the same 404 and nothing about foreign
/// orders leaks — not even their existence.
///
/// # Errors
///
/// Returns 401 when unauthenticated, 404 when no owned order matches, and
/// 500 on database failure.
pub async fn get_order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(order_id): Path<String>,
) -> Result<Json<OrderResponse>> {
    let order = OrderRepository::new(state.pool())
        .get_for_user(&OrderId::new(order_id), &user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    Ok(Json(OrderResponse::from_order(
        order,
        &state.config().asset_base_path,
    )))
}
