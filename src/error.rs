// src/error.rs
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::mail::MailError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error occurred")]
    DatabaseError(#[from] sqlx::Error),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    /// The request body or path could not be decoded.
    #[error("{detail}")]
    BadRequest { status: StatusCode, detail: String },
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::Notify(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.code()),
            AppError::BadRequest { status, .. } => (*status, "invalid_request"),
        }
    }
}

/// Failures of the supplier notification path.
///
/// Every kind is reported to the client as a 500 envelope; the `code` field
/// tells them apart.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Product {0} not found")]
    ProductNotFound(i64),
    #[error("Supplier {supplier_id} of product {product_id} not found")]
    RecipientNotFound { product_id: i64, supplier_id: i64 },
    #[error("Supplier address {0:?} cannot receive mail")]
    InvalidRecipient(String),
    #[error("Mail delivery failed: {0}")]
    Transport(#[source] MailError),
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl NotifyError {
    pub fn code(&self) -> &'static str {
        match self {
            NotifyError::ProductNotFound(_) => "product_not_found",
            NotifyError::RecipientNotFound { .. } => "recipient_not_found",
            NotifyError::InvalidRecipient(_) => "invalid_recipient",
            NotifyError::Transport(_) => "transport",
            NotifyError::Database(_) => "database",
        }
    }
}

impl From<MailError> for NotifyError {
    fn from(err: MailError) -> Self {
        match err {
            MailError::Address(addr) => NotifyError::InvalidRecipient(addr),
            other => NotifyError::Transport(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        if let AppError::DatabaseError(e) = &self {
            tracing::error!(error = %e, "database error");
        }

        let body = Json(json!({
            "status": "error",
            "code": code,
            "detail": self.to_string(),
        }));

        (status, body).into_response()
    }
}
