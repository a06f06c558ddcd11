//! Catalog route handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use tradepost_core::ItemStatus;

use crate::error::AppError;
use crate::models::Item;
use crate::services::CatalogService;
use crate::state::AppState;

/// Item creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    /// Optional; omitted or empty means `active`.
    pub status: Option<String>,
}

/// `POST /items` - create a catalog item.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = match req.status.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => s
            .parse::<ItemStatus>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?,
        None => ItemStatus::default(),
    };

    let item = CatalogService::new(state.pool())
        .create(&req.name, status)
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// `GET /items` - list the catalog.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Item>>, AppError> {
    let items = CatalogService::new(state.pool()).list().await?;
    Ok(Json(items))
}
