use axum::{
    extract::rejection::{BytesRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::generation::service::GenerationError;
use crate::session::SessionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every body is `{"error": <message>, "code": <CODE>}`, plus `details` where there are any.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown action")]
    UnknownAction,

    #[error("Conflict: {0}")]
    Conflict(String),

    /// An extractor refused the request; keeps the extractor's status.
    #[error("Invalid request: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Generation failed upstream while serving a session operation.
    #[error("Bad gateway: {message}")]
    BadGateway { message: String, details: String },

    /// Generation failed while serving the raw proxy endpoint.
    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Proxy-endpoint mapping: quota exhaustion stays 429, every other upstream failure is a 500.
    pub fn from_proxy(e: GenerationError) -> Self {
        match e {
            GenerationError::Validation(msg) => AppError::Validation(msg),
            GenerationError::RateLimited => {
                AppError::RateLimited(GenerationError::RateLimited.notice())
            }
            GenerationError::Unavailable(msg) => AppError::Configuration(msg),
            other => AppError::Generation(other.to_string()),
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::Validation(msg) => AppError::Validation(msg),
            GenerationError::RateLimited => {
                AppError::RateLimited(GenerationError::RateLimited.notice())
            }
            GenerationError::Unavailable(msg) => AppError::Configuration(msg),
            other => AppError::BadGateway {
                message: other.notice(),
                details: other.to_string(),
            },
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        let message = e.to_string();
        match e {
            SessionError::NotFound(_) | SessionError::EntryNotFound(_) => {
                AppError::NotFound(message)
            }
            SessionError::Validation(msg) => AppError::Validation(msg),
            SessionError::Busy(_) | SessionError::DismissBlocked => AppError::Conflict(message),
            SessionError::Generation(inner) => inner.into(),
        }
    }
}

macro_rules! from_rejection {
    ($($rejection:ty),+) => {
        $(impl From<$rejection> for AppError {
            fn from(rejection: $rejection) -> Self {
                AppError::Rejected {
                    status: rejection.status(),
                    message: rejection.body_text(),
                }
            }
        })+
    };
}

from_rejection!(JsonRejection, PathRejection, QueryRejection, BytesRejection);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details): (StatusCode, &str, String, Option<String>) =
            match self {
                AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
                AppError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg, None)
                }
                AppError::UnknownAction => (
                    StatusCode::BAD_REQUEST,
                    "UNKNOWN_ACTION",
                    "Unknown action".to_string(),
                    None,
                ),
                AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg, None),
                AppError::Rejected { status, message } => {
                    (status, "INVALID_REQUEST", message, None)
                }
                AppError::MethodNotAllowed => (
                    StatusCode::METHOD_NOT_ALLOWED,
                    "METHOD_NOT_ALLOWED",
                    "Method not allowed".to_string(),
                    None,
                ),
                AppError::RateLimited(msg) => {
                    tracing::warn!("Generation rate limited");
                    (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", msg, None)
                }
                AppError::BadGateway { message, details } => {
                    tracing::error!("Generation failed: {details}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "GENERATION_FAILED",
                        message,
                        Some(details),
                    )
                }
                AppError::Generation(details) => {
                    tracing::error!("Generation failed: {details}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "GENERATION_ERROR",
                        "Internal Server Error".to_string(),
                        Some(details),
                    )
                }
                AppError::Configuration(msg) => {
                    tracing::error!("Configuration error: {msg}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "CONFIGURATION_ERROR",
                        msg,
                        None,
                    )
                }
                AppError::Internal(e) => {
                    tracing::error!("Internal error: {e:?}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal server error occurred".to_string(),
                        None,
                    )
                }
            };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let (Some(details), Value::Object(map)) = (details, &mut body) {
            map.insert("details".to_string(), Value::String(details));
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn status_of(e: AppError) -> StatusCode {
        e.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(AppError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::UnknownAction), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(SessionError::DismissBlocked.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(SessionError::EntryNotFound(Uuid::nil()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(GenerationError::RateLimited.into()),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            status_of(GenerationError::Malformed("x".into()).into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(GenerationError::Validation("x".into()).into()),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_rejections_keep_their_status() {
        let err = AppError::Rejected {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: "Expected request with `Content-Type: application/json`".into(),
        };
        assert_eq!(status_of(err), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(status_of(AppError::MethodNotAllowed), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_proxy_mapping_uses_500_for_upstream_failures() {
        let err = AppError::from_proxy(GenerationError::Transport("down".into()));
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
        let err = AppError::from_proxy(GenerationError::RateLimited);
        assert_eq!(status_of(err), StatusCode::TOO_MANY_REQUESTS);
    }
}
