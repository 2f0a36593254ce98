use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The record store could not be reached or timed out
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::StoreUnavailable(msg) => AppError::DatabaseUnavailable(msg),
            ProductError::Database(msg) => AppError::Database(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. } => {
                ProductError::StoreUnavailable(err.to_string())
            }
            _ => ProductError::Database(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ProductError {
    fn from(err: validator::ValidationErrors) -> Self {
        ProductError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_io_error_is_store_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ProductError::from(mongodb::error::Error::from(io));

        assert!(matches!(err, ProductError::StoreUnavailable(_)));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ProductError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (
                ProductError::StoreUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ProductError::Database("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ProductError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
