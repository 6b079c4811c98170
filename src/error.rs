//! Error taxonomy for the enrolments service.
//!
//! Domain errors raised inside the workflow pass through unchanged to the API
//! boundary; transport-level failures from collaborator calls and unexpected
//! database errors are wrapped into `ApiError::Service` so stack traces never
//! leak to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::models::enrolment::ErrorResponse;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad input or a collaborator rejected the request.
    #[error("{0}")]
    Validation(String),

    /// The requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The operation conflicts with current state (duplicate payment or
    /// duplicate enrolment).
    #[error("{0}")]
    Conflict(String),

    /// The invoice API returned an unprocessable response.
    #[error("{0}")]
    InvoiceCreation(String),

    /// Downstream, network, or unexpected failure.
    #[error("{0}")]
    Service(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvoiceCreation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::InvoiceCreation(_) | ApiError::Service(_) => "service_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self);
        }

        let body = ErrorResponse {
            message: self.to_string(),
            error: self.error_code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ApiError::Conflict("Enrolment already exists for this user and course".to_string())
            }
            _ => ApiError::Service(format!("Database error: {}", err)),
        }
    }
}
