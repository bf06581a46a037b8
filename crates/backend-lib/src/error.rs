// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    /// Signup with an already-registered handle.
    #[error("Handle already registered")]
    DuplicateHandle,

    /// Login failed. Unknown handle and wrong password both collapse into
    /// this variant; the distinction lives only in server-side logs.
    #[error("Invalid handle or password")]
    InvalidCredentials,

    /// Protected request carried no bearer credential.
    #[error("Authentication required")]
    AuthRequired,

    /// Token was malformed, expired, or carried a bad signature.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token verified but its subject no longer exists.
    #[error("Token subject no longer exists")]
    StaleIdentity,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateHandle => StatusCode::CONFLICT,
            AppError::InvalidCredentials
            | AppError::AuthRequired
            | AppError::InvalidToken(_)
            | AppError::StaleIdentity => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::DuplicateHandle => "SIGNUP_001",
            AppError::InvalidCredentials => "AUTH_001",
            AppError::AuthRequired => "AUTH_002",
            AppError::InvalidToken(_) => "AUTH_003",
            AppError::StaleIdentity => "AUTH_004",
            AppError::Forbidden(_) => "AUTH_005",
            AppError::NotFound(_) => "NF_001",
            AppError::InvalidInput(_) => "VAL_001",
            AppError::Internal(_) => "INT_001",
            AppError::Io(_) => "IO_001",
            AppError::Json(_) => "JSON_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::DuplicateHandle => "An account with this handle already exists".to_string(),
            AppError::InvalidCredentials => "Invalid handle or password".to_string(),
            AppError::AuthRequired => {
                "You are not logged in, please log in to get access".to_string()
            },
            AppError::InvalidToken(_) => "Invalid token, please log in again".to_string(),
            AppError::StaleIdentity => {
                "The account belonging to this token no longer exists".to_string()
            },
            AppError::Forbidden(_) => "You do not have permission for this action".to_string(),
            AppError::NotFound(_) => "Resource not found".to_string(),
            AppError::InvalidInput(_) => "Invalid input provided".to_string(),
            AppError::Internal(_) | AppError::Io(_) => {
                "An internal server error occurred".to_string()
            },
            AppError::Json(_) => "Invalid request format".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body = serde_json::json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
