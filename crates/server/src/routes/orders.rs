//! Order route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;

use tradepost_core::CartId;

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::Order;
use crate::services::CheckoutService;
use crate::state::AppState;

use super::wire_id;

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub cart_id: u64,
}

/// `POST /orders` - check out one of the caller's open carts.
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<Order>, AppError> {
    let cart_id = CartId::new(wire_id(req.cart_id, "cart_id")?);

    let order = CheckoutService::new(state.pool())
        .checkout(&user, cart_id)
        .await?;

    tracing::info!(user_id = %user.id, cart_id = %cart_id, order_id = %order.id, "order created");

    Ok(Json(order))
}

/// `GET /orders` - list the caller's orders.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = CheckoutService::new(state.pool()).list_orders(&user).await?;
    Ok(Json(orders))
}
