//! Generation Request Builder: the `{action, payload}` wire contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::generation::service::GenerationError;

/// Context sent with every summary request.
pub const DEFAULT_SUMMARY_KEYWORDS: &str = "Expérimenté, motivé, professionnel";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPayload {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub keywords: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovePayload {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignPayload {
    #[serde(default)]
    pub description: String,
}

/// One request to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationRequest {
    GenerateSummary(SummaryPayload),
    ImproveExperience(ImprovePayload),
    GenerateDesign(DesignPayload),
}

/// `{result: string}` response of the two text actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResult {
    pub result: String,
}

impl GenerationRequest {
    pub fn summary(job_title: &str) -> Self {
        GenerationRequest::GenerateSummary(SummaryPayload {
            job_title: job_title.trim().to_string(),
            keywords: DEFAULT_SUMMARY_KEYWORDS.to_string(),
        })
    }

    pub fn improve(role: &str, description: &str) -> Self {
        GenerationRequest::ImproveExperience(ImprovePayload {
            role: role.trim().to_string(),
            description: description.trim().to_string(),
        })
    }

    pub fn design(description: &str) -> Self {
        GenerationRequest::GenerateDesign(DesignPayload {
            description: description.trim().to_string(),
        })
    }

    pub fn action(&self) -> &'static str {
        match self {
            GenerationRequest::GenerateSummary(_) => "GENERATE_SUMMARY",
            GenerationRequest::ImproveExperience(_) => "IMPROVE_EXPERIENCE",
            GenerationRequest::GenerateDesign(_) => "GENERATE_DESIGN",
        }
    }

    /// Local validation, run before any network call.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let missing = |what: &str| Err(GenerationError::Validation(what.to_string()));
        match self {
            GenerationRequest::GenerateSummary(p) if p.job_title.trim().is_empty() => {
                missing("Renseignez d'abord un titre de poste.")
            }
            GenerationRequest::ImproveExperience(p) if p.role.trim().is_empty() => {
                missing("Renseignez d'abord le poste occupé.")
            }
            GenerationRequest::ImproveExperience(p) if p.description.trim().is_empty() => {
                missing("Renseignez d'abord une description à améliorer.")
            }
            GenerationRequest::GenerateDesign(p) if p.description.trim().is_empty() => {
                missing("Décrivez le style souhaité.")
            }
            _ => Ok(()),
        }
    }

    /// Parses an untyped proxy body. Unknown or missing actions are reported as such,
    /// distinct from a known action with a bad payload.
    pub fn from_value(body: Value) -> Result<Self, RequestParseError> {
        let action = body
            .get("action")
            .and_then(Value::as_str)
            .ok_or(RequestParseError::UnknownAction)?;
        if !matches!(
            action,
            "GENERATE_SUMMARY" | "IMPROVE_EXPERIENCE" | "GENERATE_DESIGN"
        ) {
            return Err(RequestParseError::UnknownAction);
        }
        let mut body = body;
        if let Some(obj) = body.as_object_mut() {
            obj.entry("payload")
                .or_insert_with(|| Value::Object(Default::default()));
        }
        serde_json::from_value(body).map_err(|e| RequestParseError::BadPayload(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestParseError {
    UnknownAction,
    BadPayload(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(GenerationRequest::summary(" Ingénieur Logiciel ")).unwrap();
        assert_eq!(
            value,
            json!({
                "action": "GENERATE_SUMMARY",
                "payload": {
                    "jobTitle": "Ingénieur Logiciel",
                    "keywords": "Expérimenté, motivé, professionnel"
                }
            })
        );
    }

    #[test]
    fn test_validation_rejects_blank_inputs() {
        assert!(GenerationRequest::summary("  ").validate().is_err());
        assert!(GenerationRequest::improve("Dev", "").validate().is_err());
        assert!(GenerationRequest::improve("", "Code").validate().is_err());
        assert!(GenerationRequest::design("\n").validate().is_err());
        assert!(GenerationRequest::improve("Dev", "Code").validate().is_ok());
    }

    #[test]
    fn test_from_value_unknown_action() {
        assert_eq!(
            GenerationRequest::from_value(json!({"action": "TRANSLATE", "payload": {}})),
            Err(RequestParseError::UnknownAction)
        );
        assert_eq!(
            GenerationRequest::from_value(json!({"payload": {}})),
            Err(RequestParseError::UnknownAction)
        );
    }

    #[test]
    fn test_from_value_tolerates_missing_fields() {
        let request =
            GenerationRequest::from_value(json!({"action": "GENERATE_DESIGN"})).unwrap();
        assert_eq!(request, GenerationRequest::design(""));
        assert_eq!(request.action(), "GENERATE_DESIGN");
    }

    #[test]
    fn test_from_value_bad_payload() {
        let result =
            GenerationRequest::from_value(json!({"action": "GENERATE_SUMMARY", "payload": 3}));
        assert!(matches!(result, Err(RequestParseError::BadPayload(_))));
    }
}
