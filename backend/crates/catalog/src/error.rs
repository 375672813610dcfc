//! Catalog Error Types
//!
//! Item, evaluation and upload failures, converted into the unified
//! `kernel::error::AppError` at the HTTP boundary.

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Item not found")]
    ItemNotFound,

    #[error("Evaluation not found")]
    EvaluationNotFound,

    /// The item already carries an evaluation
    #[error("Item has already been evaluated")]
    AlreadyEvaluated,

    /// Caller is neither the owner (or evaluator) nor an admin
    #[error("Access denied")]
    AccessDenied,

    #[error("Too many files: at most {max} images per request")]
    TooManyFiles { max: usize },

    #[error("Unsupported file type: {0}. Only JPEG and PNG images are allowed")]
    UnsupportedFileType(String),

    #[error("File too large: {name} exceeds {max} bytes")]
    FileTooLarge { name: String, max: usize },

    /// Input rejected by a value object or request parser
    #[error("{}", .0.message())]
    Validation(AppError),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::ItemNotFound | CatalogError::EvaluationNotFound => ErrorKind::NotFound,
            CatalogError::AlreadyEvaluated => ErrorKind::Conflict,
            CatalogError::AccessDenied => ErrorKind::Forbidden,
            CatalogError::TooManyFiles { .. }
            | CatalogError::UnsupportedFileType(_)
            | CatalogError::FileTooLarge { .. } => ErrorKind::BadRequest,
            CatalogError::Validation(e) => e.kind(),
            CatalogError::Storage(_) | CatalogError::Database(_) | CatalogError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            CatalogError::Validation(e) => e,
            CatalogError::Database(e) => AppError::internal("Database error").with_source(e),
            CatalogError::Storage(e) => AppError::internal("Storage error").with_source(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Storage(e) => {
                tracing::error!(error = %e, "Image storage error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            CatalogError::AccessDenied => {
                tracing::warn!("Caller may not access this resource");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        err.into_app_error()
    }
}

impl From<AppError> for CatalogError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            CatalogError::Validation(err)
        } else {
            CatalogError::Internal(err.to_string())
        }
    }
}

impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogError::Validation(rejection.into())
    }
}

impl From<MultipartError> for CatalogError {
    fn from(err: MultipartError) -> Self {
        let kind = match err.status().as_u16() {
            413 => ErrorKind::PayloadTooLarge,
            _ => ErrorKind::BadRequest,
        };
        CatalogError::Validation(AppError::new(kind, err.body_text()))
    }
}
