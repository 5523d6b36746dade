use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing entry, or an entry owned by someone else.
    #[error("Journal entry not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Missing owner identity")]
    Unauthorized,

    #[error("Request cancelled")]
    Cancelled,

    #[error("A transaction is already in progress")]
    TransactionInProgress,

    #[error("No transaction is in progress")]
    NoTransaction,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            AppError::TransactionInProgress
            | AppError::NoTransaction
            | AppError::Database(_)
            | AppError::Migration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                "Internal server error".to_string()
            }
            AppError::Migration(e) => {
                tracing::error!("Migration error: {e}");
                "Internal server error".to_string()
            }
            AppError::TransactionInProgress | AppError::NoTransaction => {
                tracing::error!("Transaction misuse: {self}");
                "Internal server error".to_string()
            }
            AppError::Cancelled => {
                tracing::warn!("Request cancelled before commit");
                self.to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
