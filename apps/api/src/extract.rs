//! Extractors whose rejections render as `AppError` JSON bodies.

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// `axum::Json` with a JSON error body on rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with a JSON error body on rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// `axum::extract::Query` with a JSON error body on rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// A JSON body that may be left out entirely.
///
/// An empty (or whitespace-only) body is `None`. Anything else must be valid JSON for `T`.
#[derive(Debug)]
pub struct OptionalJson<T>(pub Option<T>);

#[async_trait]
impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJson(None));
        }
        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(OptionalJson(Some(value)))
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::StatusCode};
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        name: String,
    }

    async fn extract(body: &'static str) -> Result<Option<Named>, AppError> {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body))
            .unwrap();
        OptionalJson::<Named>::from_request(request, &())
            .await
            .map(|OptionalJson(value)| value)
    }

    #[tokio::test]
    async fn test_empty_body_is_none() {
        assert_eq!(extract("").await.unwrap(), None);
        assert_eq!(extract("  \n").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_valid_body_is_parsed() {
        assert_eq!(
            extract(r#"{"name": "Ada"}"#).await.unwrap(),
            Some(Named {
                name: "Ada".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        for body in ["not json", r#"{"name": 3}"#] {
            match extract(body).await {
                Err(AppError::Rejected { status, .. }) => {
                    assert!(status == StatusCode::BAD_REQUEST
                        || status == StatusCode::UNPROCESSABLE_ENTITY);
                }
                other => panic!("expected a rejection for {body:?}, got {other:?}"),
            }
        }
    }
}
