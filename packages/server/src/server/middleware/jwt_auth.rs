use crate::common::ApiError;
use crate::domains::auth::JwtService;
use axum::{
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

/// Authenticated admin from JWT
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub email: String,
}

/// JWT authentication middleware
///
/// Requires `Authorization: Bearer <token>`. Requests without a valid, unexpired
/// token get 401 and never reach the handler; otherwise AuthUser is added to
/// request extensions.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match extract_auth_user(request.headers(), &jwt_service) {
        Ok(user) => {
            debug!("Authenticated admin: {}", user.email);
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            debug!("Rejected request: {}", e);
            e.into_response()
        }
    }
}

/// Pull the token out of `Bearer <token>`; the scheme name is case-insensitive
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = auth_str.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Extract and verify JWT token from request headers
fn extract_auth_user(headers: &HeaderMap, jwt_service: &JwtService) -> Result<AuthUser, ApiError> {
    let token = extract_bearer_token(headers).ok_or_else(ApiError::missing_token)?;

    let claims = jwt_service
        .verify_token(token)
        .map_err(|_| ApiError::invalid_token())?;

    Ok(AuthUser {
        email: claims.email,
    })
}
