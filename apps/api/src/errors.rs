use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Configuration errors raised by the generation core before any problem is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("No problem categories enabled. Select at least one category.")]
    NoCategories,

    #[error("page_count must be at least 1")]
    NoPages,

    #[error("problems_per_page must be at least 1")]
    EmptyPage,

    #[error("Category '{category_id}' uses a {digits}-digit operand; widths must be between 1 and {max}")]
    InvalidDigits {
        category_id: String,
        digits: u32,
        max: u32,
    },

    #[error(
        "Category '{category_id}' cannot produce whole-number division: \
         no {divisor_digits}-digit divisor leaves a quotient of at least 2 \
         within {dividend_digits}-digit dividends"
    )]
    InfeasibleDivision {
        category_id: String,
        dividend_digits: u32,
        divisor_digits: u32,
    },
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] GenerationError),

    #[error("Export unavailable: {0}")]
    ExportUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Configuration(e) => {
                tracing::warn!("Rejected generation request: {e}");
                (StatusCode::BAD_REQUEST, "CONFIGURATION_ERROR", e.to_string())
            }
            AppError::ExportUnavailable(msg) => {
                tracing::warn!("Export unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "EXPORT_UNAVAILABLE",
                    format!("{msg}. Please try again shortly."),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
