use axum::{extract::rejection::JsonRejection, extract::Extension, Json};
use serde::{Deserialize, Serialize};

use crate::common::{ApiError, ApiResult};
use crate::kernel::ServerDeps;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

/// POST /api/login
///
/// Exchanges the admin email and password for an 8 hour session token.
pub async fn login_handler(
    Extension(deps): Extension<ServerDeps>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(request) = body.map_err(|e| ApiError::Validation(e.body_text()))?;

    let (email, password) = match (request.email, request.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(ApiError::Validation("Email & password required".to_string())),
    };

    // bcrypt is deliberately slow; keep it off the async workers
    let admin = deps.admin.clone();
    let submitted_email = email.clone();
    let authorized = tokio::task::spawn_blocking(move || admin.verify(&submitted_email, &password))
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    if !authorized {
        tracing::info!("Rejected login attempt");
        return Err(ApiError::invalid_credentials());
    }

    let token = deps
        .jwt_service
        .create_token(&email)
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    tracing::info!("Admin logged in: {}", email);

    Ok(Json(LoginResponse {
        success: true,
        token,
    }))
}
