//! API error types with HTTP response mapping.

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::{AppError, ErrorResponse};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Failure reported by the application layer.
    App(AppError),
    /// The request body could not be deserialized.
    MalformedBody(serde_json::Error),
    /// The request body could not be read, e.g. it exceeds the size limit.
    UnreadableBody(BytesRejection),
}

impl ApiError {
    /// Returns the status code this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::App(AppError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::App(AppError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::App(AppError::Internal { .. }) | ApiError::MalformedBody(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::UnreadableBody(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::App(err) => {
                if let AppError::Internal { context, source } = err {
                    tracing::error!(context, error = %source, "internal server error");
                }
                ErrorResponse::from_error(err)
            }
            ApiError::MalformedBody(err) => {
                tracing::error!(error = %err, "failed to deserialize request body");
                ErrorResponse::from_message(common::error::INTERNAL_ERROR_MESSAGE)
            }
            ApiError::UnreadableBody(rejection) => {
                tracing::warn!(%status, error = %rejection, "failed to read request body");
                if status.is_server_error() {
                    ErrorResponse::from_message(common::error::INTERNAL_ERROR_MESSAGE)
                } else {
                    ErrorResponse::from_message(rejection.body_text())
                }
            }
        };

        metrics::counter!("order_requests_total", "status" => status.as_u16().to_string())
            .increment(1);
        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::App(err)
    }
}

#[cfg(test)]
mod tests {
    use common::ValidationError;

    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(AppError::Validation(vec![ValidationError::new("items", "x")])).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AppError::not_found("order", "o-1")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(AppError::internal("json", "boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let malformed = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            ApiError::MalformedBody(malformed).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
