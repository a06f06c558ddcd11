//! Cart route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use tradepost_core::ItemId;

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::{Cart, CartLine};
use crate::services::CartService;
use crate::state::AppState;

use super::wire_id;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub item_id: u64,
}

/// Add-to-cart response body: the (possibly fresh) open cart and the line
/// that was just appended.
#[derive(Debug, Serialize)]
pub struct AddToCartResponse {
    pub cart: Cart,
    pub line: CartLine,
}

/// `POST /carts` - add an item to the caller's open cart, opening one if
/// none exists.
pub async fn add_to_cart(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<AddToCartResponse>, AppError> {
    let item_id = ItemId::new(wire_id(req.item_id, "item_id")?);

    let (cart, line) = CartService::new(state.pool())
        .add_item(&user, item_id)
        .await?;

    tracing::debug!(user_id = %user.id, cart_id = %cart.id, item_id = %item_id, "item added to cart");

    Ok(Json(AddToCartResponse { cart, line }))
}

/// `GET /carts` - list all carts with their lines.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<Vec<Cart>>, AppError> {
    let carts = CartService::new(state.pool()).list().await?;
    Ok(Json(carts))
}
