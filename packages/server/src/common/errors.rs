use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use twilio::TwilioError;

use crate::kernel::TranscriptError;

/// Errors returned by API handlers.
///
/// Every route goes through this type, so the status code for each class of
/// failure is decided in one place.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized("Invalid credentials".to_string())
    }

    pub fn missing_token() -> Self {
        ApiError::Unauthorized("Authorization token required".to_string())
    }

    pub fn invalid_token() -> Self {
        ApiError::Unauthorized("Invalid or expired token".to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            success: false,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<TwilioError> for ApiError {
    fn from(err: TwilioError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<TranscriptError> for ApiError {
    fn from(err: TranscriptError) -> Self {
        match err {
            TranscriptError::NotFound => ApiError::NotFound(err.to_string()),
            TranscriptError::InvalidId => ApiError::Validation(err.to_string()),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// `{ "success": true, "data": ... }`
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}
