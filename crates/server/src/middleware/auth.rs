//! Authentication extractor: the session gate.
//!
//! Every protected operation takes [`RequireAuth`] in its handler signature.
//! The extractor validates the `Authorization: Bearer <token>` header,
//! resolves the token through the identity service, and hands the resolved
//! user to the handler. On any failure the handler never runs.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};

use crate::error::AppError;
use crate::models::User;
use crate::services::IdentityService;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// Stateless per call: holds nothing beyond what the identity store
/// resolves for this request.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub User);

/// Extract the token from an `Authorization` header value.
///
/// Accepts exactly two whitespace-separated parts with a case-insensitive
/// `Bearer` scheme. Anything else - wrong scheme, missing token, trailing
/// parts - is rejected.
fn parse_bearer(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token)
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("missing Authorization header".to_owned()))?;

        let header = header
            .to_str()
            .map_err(|_| AppError::Unauthorized("invalid Authorization header".to_owned()))?;

        let token = parse_bearer(header)
            .ok_or_else(|| AppError::Unauthorized("invalid Authorization header".to_owned()))?;

        let user = IdentityService::new(state.pool()).resolve(token).await?;

        Ok(Self(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer_happy_path() {
        assert_eq!(parse_bearer("Bearer abc123"), Some("abc123"));
    }

    #[test]
    fn test_parse_bearer_scheme_is_case_insensitive() {
        assert_eq!(parse_bearer("bearer abc"), Some("abc"));
        assert_eq!(parse_bearer("BEARER abc"), Some("abc"));
        assert_eq!(parse_bearer("BeArEr abc"), Some("abc"));
    }

    #[test]
    fn test_parse_bearer_rejects_wrong_scheme() {
        assert_eq!(parse_bearer("Basic abc"), None);
        assert_eq!(parse_bearer("Token abc"), None);
    }

    #[test]
    fn test_parse_bearer_rejects_missing_token() {
        assert_eq!(parse_bearer("Bearer"), None);
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer(""), None);
    }

    #[test]
    fn test_parse_bearer_rejects_multiple_tokens() {
        assert_eq!(parse_bearer("Bearer abc def"), None);
    }
}
