//! # API Errors
//!
//! What clients see when a request fails.
//!
//! ## Wire Format
//! ```text
//! HTTP 404
//! {
//!   "status": 404,
//!   "code": "NOT_FOUND",
//!   "message": "User with this mobile number does not exist."
//! }
//! ```
//!
//! ## Mapping
//! ```text
//! ┌───────────────────────────────┬────────┬──────────────────────┐
//! │ Source                        │ Status │ Code                 │
//! ├───────────────────────────────┼────────┼──────────────────────┤
//! │ ValidationError, bad JSON     │ 400    │ VALIDATION_ERROR     │
//! │ CoreError::PriceNotFound      │ 400    │ VALIDATION_ERROR     │
//! │ missing/invalid token         │ 401    │ UNAUTHORIZED         │
//! │ logged_in_user mismatch       │ 403    │ FORBIDDEN            │
//! │ *NotFound, UnknownMobile      │ 404    │ NOT_FOUND            │
//! │ CoreError::AlreadyRegistered  │ 409    │ ALREADY_REGISTERED   │
//! │ CoreError::InvalidOrderStatus │ 409    │ CONFLICT             │
//! │ SmsError                      │ 502    │ GATEWAY_ERROR        │
//! │ DbError                       │ 500    │ DATABASE_ERROR       │
//! │ anything else                 │ 500    │ INTERNAL             │
//! └───────────────────────────────┴────────┴──────────────────────┘
//! ```
//!
//! Every `ApiError` response carries an [`ErrorReport`] extension that the
//! error-log middleware persists.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use fh_core::{CoreError, ValidationError};
use fh_db::DbError;

use crate::sms::SmsError;

/// A failed request.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{code} ({status}): {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    status: u16,
    code: &'a str,
    message: &'a str,
}

/// Response extension read by the error-log middleware.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: u16,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        ApiError {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "CONFLICT", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, code = self.code, message = %self.message, "Request failed");
        } else {
            warn!(status = %self.status, code = self.code, message = %self.message, "Request rejected");
        }

        let body = ErrorBody {
            status: self.status.as_u16(),
            code: self.code,
            message: &self.message,
        };

        let mut response = (self.status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorReport {
            status: self.status.as_u16(),
            message: self.message,
        });
        response
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::Validation(_) | CoreError::PriceNotFound { .. } => {
                ApiError::validation(message)
            }
            CoreError::AlreadyRegistered { .. } => {
                ApiError::new(StatusCode::CONFLICT, "ALREADY_REGISTERED", message)
            }
            CoreError::InvalidOrderStatus { .. } => ApiError::conflict(message),
            CoreError::UnknownMobile(_)
            | CoreError::NotLinkedToCustomer(_)
            | CoreError::ItemNotFound(_)
            | CoreError::SalesOrderNotFound(_) => ApiError::not_found(message),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::not_found(err.to_string()),
            DbError::UniqueViolation { .. } => ApiError::conflict(err.to_string()),
            other => {
                error!(error = %other, "Database error");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred",
                )
            }
        }
    }
}

impl From<SmsError> for ApiError {
    fn from(err: SmsError) -> Self {
        ApiError::new(StatusCode::BAD_GATEWAY, "GATEWAY_ERROR", err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}
