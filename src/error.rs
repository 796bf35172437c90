use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Path identity segment is not a positive integer
    InvalidIdentity(String),
    /// Request body could not be decoded or failed validation
    InvalidPayload(String),
    /// Bulk create received an empty list
    EmptyInput,
    /// Patch payload contained no settable field
    NoValidFields,
    /// Query string contained no filterable field
    NoValidFilters,
    NotFound(String),
    /// Visitor exceeded its request budget for the current window
    RateLimited,
    Storage(sqlx::Error),
    Serialization(serde_json::Error),
    Configuration(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidIdentity(id) => write!(f, "Invalid identity: {}", id),
            AppError::InvalidPayload(e) => write!(f, "Invalid request payload: {}", e),
            AppError::EmptyInput => write!(f, "Empty input list"),
            AppError::NoValidFields => write!(f, "No valid fields to update"),
            AppError::NoValidFilters => write!(f, "At least one valid filter is required"),
            AppError::NotFound(e) => write!(f, "{}", e),
            AppError::RateLimited => write!(f, "Too many requests"),
            AppError::Storage(e) => write!(f, "Storage error: {}", e),
            AppError::Serialization(e) => write!(f, "Serialization error: {}", e),
            AppError::Configuration(e) => write!(f, "Configuration error: {}", e),
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Storage(e) => Some(e),
            AppError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Storage(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err)
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidIdentity(_)
            | AppError::InvalidPayload(_)
            | AppError::EmptyInput
            | AppError::NoValidFields
            | AppError::NoValidFilters => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Storage(_)
            | AppError::Serialization(_)
            | AppError::Configuration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Server-side causes are logged and replaced with
    /// a generic message.
    pub fn to_response(&self) -> (StatusCode, Json<serde_json::Value>) {
        let status = self.status_code();
        let message = match self {
            AppError::Storage(e) => {
                tracing::error!(error = %e, "storage failure");
                "Error accessing the database".to_string()
            }
            AppError::Serialization(e) => {
                tracing::error!(error = %e, "serialization failure");
                "Error encoding response".to_string()
            }
            AppError::Configuration(e) | AppError::Internal(e) => {
                tracing::error!(error = %e, "internal failure");
                "Internal server error".to_string()
            }
            other => {
                tracing::debug!(error = %other, "rejected request");
                other.to_string()
            }
        };

        (status, Json(json!({ "status": "error", "message": message })))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}
