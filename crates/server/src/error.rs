//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{CartError, CatalogError, CheckoutError, IdentityError};

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Identity operation failed.
    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Catalog operation failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart operation failed.
    #[error("cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout operation failed.
    #[error("checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Bad request from client.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Caller presented no usable session credential.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    /// Whether this error is a server fault (worth capturing) rather than a
    /// client mistake.
    fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::Internal(_)
                | Self::Identity(IdentityError::Repository(_))
                | Self::Catalog(CatalogError::Repository(_))
                | Self::Cart(_)
                | Self::Checkout(CheckoutError::Repository(_))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server faults to Sentry
        if self.is_server_fault() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Identity(err) => match err {
                IdentityError::MissingCredentials => StatusCode::BAD_REQUEST,
                IdentityError::InvalidCredentials | IdentityError::InvalidToken => {
                    StatusCode::UNAUTHORIZED
                }
                IdentityError::UsernameTaken => StatusCode::CONFLICT,
                IdentityError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Catalog(err) => match err {
                CatalogError::MissingName => StatusCode::BAD_REQUEST,
                CatalogError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Checkout(err) => match err {
                CheckoutError::CartNotOpen => StatusCode::CONFLICT,
                CheckoutError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Cart(_) | Self::Database(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        };

        // Don't expose internal error details to clients
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "internal server error".to_owned()
        } else {
            match &self {
                Self::Identity(err) => err.to_string(),
                Self::Catalog(err) => err.to_string(),
                Self::Checkout(err) => err.to_string(),
                Self::BadRequest(msg) | Self::Unauthorized(msg) => msg.clone(),
                _ => self.to_string(),
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("item_id is required".to_owned());
        assert_eq!(err.to_string(), "bad request: item_id is required");

        let err = AppError::Unauthorized("invalid token".to_owned());
        assert_eq!(err.to_string(), "unauthorized: invalid token");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::BadRequest("test".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_identity_error_status_codes() {
        assert_eq!(
            get_status(IdentityError::MissingCredentials.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(IdentityError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(IdentityError::InvalidToken.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(IdentityError::UsernameTaken.into()),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_checkout_error_status_codes() {
        assert_eq!(
            get_status(CheckoutError::CartNotOpen.into()),
            StatusCode::CONFLICT
        );
    }
}
