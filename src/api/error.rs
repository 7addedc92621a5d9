use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorResponse;
use crate::forms::FormErrors;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError(String),

    DatabaseError(String),

    /// A write was rolled back. The store already logged the cause; the
    /// message here is what the caller sees.
    PersistFailed(&'static str),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::PersistFailed(msg) => write!(f, "Persistence failed: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::PersistFailed(msg) => (StatusCode::INTERNAL_SERVER_ERROR, (*msg).to_string()),
        };

        (status, Json(ErrorResponse::new(error_message))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(format!("{err:#}"))
    }
}

/// Reports the first failing field, in declaration order.
impl From<FormErrors> for ApiError {
    fn from(errors: FormErrors) -> Self {
        let message = errors
            .first()
            .map_or_else(|| "Invalid input".to_string(), |e| e.message.clone());
        ApiError::ValidationError(message)
    }
}

impl ApiError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::NotFound(format!("{} {} not found", resource, id))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{ApiContactForm, Form, Payload};

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::validation("x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::not_found("Project", 3).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::PersistFailed("Failed").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::DatabaseError("locked".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_form_errors_report_first_field() {
        let errors = ApiContactForm::validate(&Payload::default()).unwrap_err();
        match ApiError::from(errors) {
            ApiError::ValidationError(msg) => assert_eq!(msg, "name is required"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
