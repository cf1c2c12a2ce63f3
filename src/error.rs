//! Error types for the countdown server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::form::ValidationIssue;
use crate::shopify::graphql::UserError;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The submitted countdown failed the form engine's advisory checks.
    #[error("Countdown is invalid: {}", format_issues(.0))]
    CountdownInvalid(Vec<ValidationIssue>),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Recoverable: a metaobject lookup by handle came back empty. Save
    /// interprets this as "create instead of update", remove as "nothing
    /// to delete"; it only surfaces when neither caught it.
    #[error("No metaobject stored under handle '{handle}'")]
    MissingMetaobject { handle: String },

    /// The Admin API accepted the request but rejected it with per-field
    /// user errors (other than the undefined-type code handled by the
    /// definition bootstrap).
    #[error("Shopify rejected the request: {}", format_user_errors(errors))]
    UserErrorsFound { errors: Vec<UserError> },

    /// The Admin API failed the whole request with top-level GraphQL
    /// errors (throttling, revoked access) and ran no operation at all.
    #[error("Admin API request failed: {0}")]
    AdminRequestFailed(String),

    #[error("Shopify transport error: {0}")]
    ShopifyTransport(#[from] reqwest::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Present only for invalid countdown submissions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<ValidationIssue>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message, issues) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, "not-authorized", msg.clone(), None)
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "not-found", msg.clone(), None)
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "bad-value", msg.clone(), None)
            }
            AppError::CountdownInvalid(issues) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid-countdown",
                "The countdown configuration is invalid".to_string(),
                Some(issues.clone()),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database-failure",
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::MissingMetaobject { handle } => {
                tracing::warn!("Unhandled missing metaobject for handle {}", handle);
                (
                    StatusCode::BAD_GATEWAY,
                    "missing-metaobject",
                    format!("No metaobject stored under handle '{}'", handle),
                    None,
                )
            }
            AppError::UserErrorsFound { errors } => (
                StatusCode::BAD_GATEWAY,
                "shopify-rejected",
                format!("Shopify rejected the request: {}", format_user_errors(errors)),
                None,
            ),
            AppError::AdminRequestFailed(msg) => (
                StatusCode::BAD_GATEWAY,
                "shopify-request-failed",
                format!("Admin API request failed: {}", msg),
                None,
            ),
            AppError::ShopifyTransport(e) => {
                tracing::error!("Shopify transport error: {:?}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "shopify-unreachable",
                    "Could not reach the Shopify Admin API".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
            issues,
        });

        (status, body).into_response()
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.code())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
