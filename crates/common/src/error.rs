//! Typed outcome model shared by every layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used for every internal failure that reaches a client.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message used for the body of a validation failure.
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

/// A single constraint violation on an input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Path of the offending field, e.g. `items[0].quantity`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application-level failure, propagated as the error side of [`AppResult`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Client input violates one or more declared constraints.
    #[error("Validation failed with {} violation(s)", .0.len())]
    Validation(Vec<ValidationError>),

    /// A referenced entity does not exist.
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    /// Infrastructure or serialization failure, tagged with where it happened.
    #[error("Internal error ({context}): {source}")]
    Internal {
        context: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl AppError {
    /// Wraps an underlying cause as an internal error.
    pub fn internal(
        context: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        AppError::Internal {
            context,
            source: source.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        AppError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Returns a validation error if `errors` is non-empty.
    pub fn check(errors: Vec<ValidationError>) -> AppResult<()> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// Result type for application operations.
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Wire body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationError>>,
}

impl ErrorResponse {
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }

    pub fn from_errors(message: impl Into<String>, errors: Vec<ValidationError>) -> Self {
        Self {
            message: message.into(),
            errors: Some(errors),
        }
    }

    /// Builds the client-facing body for an error.
    ///
    /// Internal causes are never rendered; the caller is expected to log them.
    pub fn from_error(error: &AppError) -> Self {
        match error {
            AppError::Validation(errors) => {
                Self::from_errors(VALIDATION_FAILED_MESSAGE, errors.clone())
            }
            AppError::NotFound { .. } => Self::from_message(error.to_string()),
            AppError::Internal { .. } => Self::from_message(INTERNAL_ERROR_MESSAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_passes_on_empty_violations() {
        assert!(AppError::check(vec![]).is_ok());
    }

    #[test]
    fn check_fails_on_violations() {
        let err = AppError::check(vec![ValidationError::new("items", "must not be empty")])
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref v) if v.len() == 1));
    }

    #[test]
    fn internal_error_keeps_cause_as_source() {
        let err = AppError::internal("repository", std::io::Error::other("disk on fire"));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "disk on fire");
        assert!(err.to_string().contains("repository"));
    }

    #[test]
    fn error_response_hides_internal_cause() {
        let err = AppError::internal("repository", "connection refused by 10.0.0.7");
        let body = ErrorResponse::from_error(&err);
        assert_eq!(body.message, INTERNAL_ERROR_MESSAGE);
        assert!(body.errors.is_none());
    }

    #[test]
    fn error_response_for_not_found_names_the_resource() {
        let body = ErrorResponse::from_error(&AppError::not_found("order", "o-123"));
        assert_eq!(body.message, "order o-123 not found");
    }

    #[test]
    fn error_response_serialization_omits_missing_errors() {
        let json = serde_json::to_value(ErrorResponse::from_message("nope")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "nope" }));

        let body = ErrorResponse::from_error(&AppError::Validation(vec![ValidationError::new(
            "customerId",
            "must not be blank",
        )]));
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json["message"], VALIDATION_FAILED_MESSAGE);
        assert_eq!(json["errors"][0]["field"], "customerId");
        assert_eq!(json["errors"][0]["message"], "must not be blank");
    }
}
