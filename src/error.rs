use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid provider assertion")]
    InvalidAssertion,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("An account with this contact already exists")]
    DuplicateContact,

    #[error("At least one of email or phone is required")]
    MissingContact,

    #[error("Invalid phone number")]
    InvalidPhone,

    #[error("Invalid or expired verification code")]
    InvalidOrExpiredCode,

    #[error("Daily limit reached")]
    QuotaExceeded,

    #[error("Watch duration below the minimum")]
    WatchTooShort,

    #[error("Unknown content item")]
    UnknownContent,

    #[error("Amount is below the minimum withdrawal")]
    BelowMinimum,

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "unauthenticated", self.to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials", self.to_string())
            }
            AppError::InvalidAssertion => {
                (StatusCode::UNAUTHORIZED, "invalid_assertion", self.to_string())
            }
            AppError::AccountDisabled => {
                (StatusCode::FORBIDDEN, "account_disabled", self.to_string())
            }
            AppError::DuplicateContact => {
                (StatusCode::CONFLICT, "duplicate_contact", self.to_string())
            }
            AppError::MissingContact => {
                (StatusCode::BAD_REQUEST, "missing_contact", self.to_string())
            }
            AppError::InvalidPhone => {
                (StatusCode::BAD_REQUEST, "invalid_phone", self.to_string())
            }
            AppError::InvalidOrExpiredCode => {
                (StatusCode::BAD_REQUEST, "invalid_or_expired_code", self.to_string())
            }
            AppError::QuotaExceeded => {
                (StatusCode::BAD_REQUEST, "quota_exceeded", self.to_string())
            }
            AppError::WatchTooShort => {
                (StatusCode::BAD_REQUEST, "watch_too_short", self.to_string())
            }
            AppError::UnknownContent => {
                (StatusCode::NOT_FOUND, "unknown_content", self.to_string())
            }
            AppError::BelowMinimum => {
                (StatusCode::BAD_REQUEST, "below_minimum", self.to_string())
            }
            AppError::InsufficientBalance => {
                (StatusCode::BAD_REQUEST, "insufficient_balance", self.to_string())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "Internal server error".to_string())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "Internal server error".to_string())
            }
            AppError::HttpClient(e) => {
                tracing::error!("HTTP client error: {e}");
                (StatusCode::BAD_GATEWAY, "provider_error", "External provider error".to_string())
            }
        };

        let body = json!({
            "error": error_type,
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
