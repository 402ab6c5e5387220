//!
//! # Custom Error Handling
//!
//! This module defines the error type `AppError` shared by the stores, the session
//! manager, the authentication gate and the HTTP handlers.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so every failure reaches the
//! client as a JSON body of the form `{"error": "..."}` with a status code derived from
//! the variant. Storage errors are classified by inspecting the underlying `sqlx` error:
//! a duplicate email is the caller's fault (409), a lost connection is ours (500).

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use sqlx::error::ErrorKind;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// The session token is missing, unknown, malformed or revoked (HTTP 401).
    InvalidSession(String),
    /// Login credentials did not match a user (HTTP 401).
    Unauthorized(String),
    /// The request body or path could not be parsed (HTTP 400).
    BadRequest(String),
    /// No live record matched the request (HTTP 404).
    NotFound(String),
    /// The write collided with an existing record, e.g. a registered email (HTTP 409).
    Conflict(String),
    /// Input parsed but failed validation rules (HTTP 422).
    ValidationError(String),
    /// Any other storage-layer failure (HTTP 500).
    DatabaseError(String),
    /// Password hashing failed internally (HTTP 500).
    HashingError(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::InvalidSession(msg) => write!(f, "Invalid Session: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::HashingError(msg) => write!(f, "Hashing Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidSession(_) | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatabaseError(_)
            | AppError::HashingError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let msg = match self {
            AppError::InvalidSession(msg)
            | AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::ValidationError(msg)
            | AppError::InternalServerError(msg) => msg.as_str(),
            // Storage and hashing details stay in the server log.
            AppError::DatabaseError(_) => "Database error",
            AppError::HashingError(_) => "Failed to process credentials",
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": msg }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// Constraint violations describe bad input and become client errors; everything else
/// is logged and reported as `AppError::DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match &error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(db_error) => match db_error.kind() {
                ErrorKind::UniqueViolation => AppError::Conflict("Record already exists".into()),
                ErrorKind::ForeignKeyViolation => {
                    AppError::BadRequest("Referenced record does not exist".into())
                }
                ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                    log::warn!("Rejected by a database constraint: {}", db_error.message());
                    AppError::BadRequest("Invalid record".into())
                }
                _ => {
                    log::error!("Database error: {}", error);
                    AppError::DatabaseError(error.to_string())
                }
            },
            _ => {
                log::error!("Database error: {}", error);
                AppError::DatabaseError(error.to_string())
            }
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::DatabaseError(format!("Migration failed: {}", error))
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::HashingError(error.to_string())
    }
}

/// Password work runs on the blocking pool; losing that pool is an internal fault.
impl From<actix_web::error::BlockingError> for AppError {
    fn from(error: actix_web::error::BlockingError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
