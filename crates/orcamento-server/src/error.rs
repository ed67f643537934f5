use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use orcamento_core::error::ValidationError;
use orcamento_export::error::ExportError;

const INTERNAL_MESSAGE: &str = "Erro interno ao gerar o orçamento.";

/// Error type for the JSON endpoint. Bodies are `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        tracing::warn!(kind = e.kind(), "quote rejected");
        ApiError::BadRequest(e.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

/// Error type for the HTML form. Bodies are plain text.
#[derive(Debug)]
pub enum FormError {
    Invalid(ValidationError),
    Internal(String),
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            FormError::Invalid(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            FormError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}

impl From<ValidationError> for FormError {
    fn from(e: ValidationError) -> Self {
        tracing::warn!(kind = e.kind(), "quote rejected");
        FormError::Invalid(e)
    }
}

impl From<ExportError> for FormError {
    fn from(e: ExportError) -> Self {
        FormError::Internal(e.to_string())
    }
}

impl From<tokio::task::JoinError> for FormError {
    fn from(e: tokio::task::JoinError) -> Self {
        FormError::Internal(e.to_string())
    }
}
