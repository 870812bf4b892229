use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

/// Failures raised by the catalog services.
///
/// Messages are shown to API clients verbatim, so they are written for them.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("{0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Log a failed write and replace it with a client-facing `message`.
    pub fn persistence(source: CatalogError, message: &str) -> Self {
        tracing::error!(error = %source, "{}", message);
        CatalogError::Internal(message.to_string())
    }
}

impl From<DbErr> for CatalogError {
    fn from(err: DbErr) -> Self {
        CatalogError::Database(err.to_string())
    }
}

/// Only malformed requests are client errors. Every other service failure
/// (including not-found, validation and conflict) is reported as a 500 with
/// its message, which existing API consumers depend on.
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::BadRequest(msg) => AppError::BadRequest(msg),
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        match &self {
            CatalogError::Database(_) | CatalogError::Storage(_) | CatalogError::Internal(_) => {
                tracing::error!(error = %self, "Catalog operation failed");
            }
            _ => tracing::warn!(error = %self, "Catalog request rejected"),
        }
        AppError::from(self).into_response()
    }
}
