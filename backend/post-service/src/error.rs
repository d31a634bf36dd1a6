/// Error types for Post Service
///
/// Errors are converted to appropriate HTTP responses for API clients.
/// Validation failures carry per-field messages so the caller can
/// annotate the submitted form and retry.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for post-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Input failed validation
    #[error("validation failed")]
    Validation(#[from] validator::ValidationErrors),

    /// Resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Missing or invalid authentication
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        if let AppError::Validation(errors) = self {
            body["fields"] = field_messages(errors);
        }

        HttpResponse::build(status).json(body)
    }
}

/// Flatten `validator` errors into a field -> [messages] JSON object.
fn field_messages(errors: &validator::ValidationErrors) -> serde_json::Value {
    let fields: serde_json::Map<String, serde_json::Value> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages: Vec<serde_json::Value> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_deref()
                        .unwrap_or(e.code.as_ref())
                        .to_string()
                        .into()
                })
                .collect();
            (field.to_string(), serde_json::Value::Array(messages))
        })
        .collect();

    serde_json::Value::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(max = 3, message = "too long"))]
        name: String,
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("post".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Unauthorized("no token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("not the author".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_error_carries_field_messages() {
        let err = Probe {
            name: "abcd".into(),
        }
        .validate()
        .unwrap_err();

        let app_err = AppError::from(err);
        assert_eq!(app_err.status_code(), StatusCode::BAD_REQUEST);

        if let AppError::Validation(errors) = &app_err {
            let fields = field_messages(errors);
            assert_eq!(fields["name"][0], "too long");
        } else {
            panic!("expected validation error");
        }
    }
}
