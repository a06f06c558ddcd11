//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health             - Liveness check
//! GET  /health/ready       - Readiness check (verifies the store)
//!
//! # Users
//! POST /users              - Register
//! GET  /users              - List users
//! POST /users/login        - Login, returns a bearer token
//!
//! # Catalog
//! POST /items              - Create item
//! GET  /items              - List items
//!
//! # Carts (require Bearer token)
//! POST /carts              - Add an item to the caller's open cart
//! GET  /carts              - List carts with their lines
//!
//! # Orders (require Bearer token)
//! POST /orders             - Check out a cart into an order
//! GET  /orders             - List the caller's orders
//! ```
//!
//! Handlers are thin: they parse the wire shape, call a service, and
//! serialize the result. The lifecycle rules live in the services.

pub mod carts;
pub mod items;
pub mod orders;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Build the application router (without operational endpoints).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::register).get(users::list))
        .route("/users/login", post(users::login))
        .route("/items", post(items::create).get(items::list))
        .route("/carts", post(carts::add_to_cart).get(carts::list))
        .route("/orders", post(orders::checkout).get(orders::list))
}

/// Convert a wire-side unsigned id into an i64-backed entity id value.
///
/// Zero is rejected as "missing": entity ids start at 1, and the wire
/// contract treats an absent numeric field and zero identically.
pub(crate) fn wire_id(value: u64, field: &str) -> Result<i64, AppError> {
    if value == 0 {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    i64::try_from(value).map_err(|_| AppError::BadRequest(format!("{field} is out of range")))
}
