//! Generation service: pluggable backend for the three generation actions.
//!
//! Default: `LlmGenerationService` (in-process Claude calls through `llm_client`).
//! Alternative: `RemoteGenerationService` (HTTP proxy speaking `{action, payload}`).
//! Without either, `UnavailableGenerationService` fails every call with a configuration error.
//!
//! `AppState` holds an `Arc<dyn GenerationService>`, chosen at startup from config.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use crate::generation::design_parser::{parse_design_payload, parse_design_text};
use crate::generation::prompts::{design_prompt, improve_prompt, summary_prompt};
use crate::generation::request::{GenerationRequest, TextResult};
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, PLAIN_TEXT_SYSTEM};
use crate::llm_client::{LlmClient, LlmError, DESIGN_TEMPERATURE, TEXT_TEMPERATURE};
use crate::models::DesignConfig;

pub const MISSING_BACKEND: &str = "Server configuration error: API_KEY missing";

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Rejected locally; nothing was sent.
    #[error("{0}")]
    Validation(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("generation service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("generation service rate limited")]
    RateLimited,

    #[error("malformed generation response: {0}")]
    Malformed(String),

    #[error("{0}")]
    Unavailable(String),
}

impl GenerationError {
    /// User-facing notice, in the UI language.
    pub fn notice(&self) -> String {
        match self {
            GenerationError::Validation(message) => message.clone(),
            GenerationError::RateLimited => {
                "Le service IA est momentanément saturé. Réessayez dans quelques instants."
                    .to_string()
            }
            GenerationError::Malformed(_) => {
                "La réponse du service IA est illisible. Veuillez réessayer.".to_string()
            }
            GenerationError::Transport(_)
            | GenerationError::Service { .. }
            | GenerationError::Unavailable(_) => {
                "La génération a échoué. Veuillez réessayer plus tard.".to_string()
            }
        }
    }
}

impl From<LlmError> for GenerationError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::RateLimited { .. } | LlmError::Api { status: 429, .. } => {
                GenerationError::RateLimited
            }
            LlmError::Api { status, message } => GenerationError::Service { status, message },
            LlmError::Http(e) => GenerationError::Transport(e.to_string()),
            LlmError::EmptyContent => GenerationError::Malformed("empty response".to_string()),
        }
    }
}

/// Successful result of one generation request.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutput {
    Text(String),
    Design(DesignConfig),
}

/// The generation backend trait. Implement this to swap backends without touching
/// the session actions or the proxy handler.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: &GenerationRequest)
        -> Result<GenerationOutput, GenerationError>;

    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmGenerationService: default backend
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmGenerationService(pub LlmClient);

#[async_trait]
impl GenerationService for LlmGenerationService {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutput, GenerationError> {
        let output = match request {
            GenerationRequest::GenerateSummary(p) => {
                let prompt = summary_prompt(&p.job_title, &p.keywords);
                GenerationOutput::Text(
                    self.0
                        .call_text(&prompt, PLAIN_TEXT_SYSTEM, TEXT_TEMPERATURE)
                        .await?,
                )
            }
            GenerationRequest::ImproveExperience(p) => {
                let prompt = improve_prompt(&p.role, &p.description);
                GenerationOutput::Text(
                    self.0
                        .call_text(&prompt, PLAIN_TEXT_SYSTEM, TEXT_TEMPERATURE)
                        .await?,
                )
            }
            GenerationRequest::GenerateDesign(p) => {
                let seed: f64 = rand::random();
                let prompt = design_prompt(&p.description, seed);
                let text = self
                    .0
                    .call_text(&prompt, JSON_ONLY_SYSTEM, DESIGN_TEMPERATURE)
                    .await?;
                GenerationOutput::Design(parse_design_text(&text)?)
            }
        };
        info!(action = request.action(), "generation succeeded");
        Ok(output)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RemoteGenerationService: external proxy
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

pub struct RemoteGenerationService {
    client: Client,
    endpoint: String,
}

impl RemoteGenerationService {
    pub fn new(endpoint: String) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;
        Ok(Self { client, endpoint })
    }
}

/// Maps a non-2xx status and body to the error taxonomy.
fn status_error(status: StatusCode, body: &str) -> GenerationError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return GenerationError::RateLimited;
    }
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error,
            details: Some(details),
        }) => format!("{error}: {details}"),
        Ok(ErrorBody { error, .. }) => error,
        Err(_) => body.to_string(),
    };
    GenerationError::Service {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl GenerationService for RemoteGenerationService {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutput, GenerationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(action = request.action(), "generation transport failed: {e}");
                GenerationError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = status_error(status, &body);
            error!(action = request.action(), %status, "generation service failed: {err}");
            return Err(err);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        let output = match request {
            GenerationRequest::GenerateDesign(_) => {
                GenerationOutput::Design(parse_design_payload(body)?)
            }
            _ => {
                let text: TextResult = serde_json::from_value(body)
                    .map_err(|e| GenerationError::Malformed(e.to_string()))?;
                GenerationOutput::Text(text.result.trim().to_string())
            }
        };
        info!(action = request.action(), "generation succeeded");
        Ok(output)
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// UnavailableGenerationService: no backend configured
// ────────────────────────────────────────────────────────────────────────────

pub struct UnavailableGenerationService;

#[async_trait]
impl GenerationService for UnavailableGenerationService {
    async fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GenerationOutput, GenerationError> {
        Err(GenerationError::Unavailable(MISSING_BACKEND.to_string()))
    }

    fn backend(&self) -> &'static str {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_maps_429_to_rate_limited() {
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, "{}"),
            GenerationError::RateLimited
        ));
    }

    #[test]
    fn test_status_error_reads_error_and_details() {
        let err = status_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "Internal Server Error", "details": "quota"}"#,
        );
        match err {
            GenerationError::Service { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error: quota");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_status_error_keeps_non_json_body() {
        match status_error(StatusCode::BAD_GATEWAY, "upstream down") {
            GenerationError::Service { message, .. } => assert_eq!(message, "upstream down"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_rate_limit_notice_is_distinct() {
        let limited = GenerationError::RateLimited.notice();
        let generic = GenerationError::Transport("x".into()).notice();
        assert_ne!(limited, generic);
        assert!(limited.contains("Réessayez"));
    }

    #[test]
    fn test_llm_error_mapping() {
        assert!(matches!(
            GenerationError::from(LlmError::RateLimited { retries: 3 }),
            GenerationError::RateLimited
        ));
        assert!(matches!(
            GenerationError::from(LlmError::Api {
                status: 400,
                message: "bad".into()
            }),
            GenerationError::Service { status: 400, .. }
        ));
    }

    #[tokio::test]
    async fn test_unavailable_backend_reports_configuration_error() {
        let err = UnavailableGenerationService
            .generate(&GenerationRequest::summary("Dev"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), MISSING_BACKEND);
    }
}
