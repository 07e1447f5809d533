//! Recovers a `DesignConfig` from whatever the generative service sends back.
//!
//! Accepted shapes, in order:
//! 1. `{ "result": <DesignConfig> }` or a bare `DesignConfig` object
//! 2. `{ "result": "<text>" }` or plain text holding JSON, possibly fenced or prose-wrapped
//!
//! Anything else is a malformed response. Partial configs are rejected, never patched.

use serde_json::Value;

use crate::generation::service::GenerationError;
use crate::models::DesignConfig;

/// Parses a JSON response body from the generation endpoint.
pub fn parse_design_payload(payload: Value) -> Result<DesignConfig, GenerationError> {
    let inner = match payload {
        Value::Object(mut obj) if obj.contains_key("result") && !obj.contains_key("layout") => {
            obj.remove("result").unwrap_or(Value::Null)
        }
        other => other,
    };
    match inner {
        Value::String(text) => parse_design_text(&text),
        value => serde_json::from_value(value).map_err(malformed),
    }
}

/// Parses model text: bare JSON, a fenced block, or the outermost `{ … }` span.
pub fn parse_design_text(text: &str) -> Result<DesignConfig, GenerationError> {
    let text = text.trim();
    if let Ok(config) = serde_json::from_str::<DesignConfig>(text) {
        return Ok(config);
    }
    let mut last_error = None;
    for candidate in [fenced_block(text), brace_span(text)].into_iter().flatten() {
        match serde_json::from_str::<DesignConfig>(candidate) {
            Ok(config) => return Ok(config),
            Err(e) => last_error = Some(e),
        }
    }
    Err(match last_error {
        Some(e) => malformed(e),
        None => GenerationError::Malformed("no JSON object in response".to_string()),
    })
}

fn malformed(e: serde_json::Error) -> GenerationError {
    GenerationError::Malformed(e.to_string())
}

/// Content of the first ``` fence, with an optional language tag dropped.
fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    let body_start = after.find('\n').map(|i| i + 1).unwrap_or(0);
    let tag = after[..body_start].trim();
    let body = if tag.is_empty() || tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        &after[body_start..]
    } else {
        after
    };
    let end = body.find("```")?;
    Some(body[..end].trim())
}

/// From the first `{` to the last `}`.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::design::LayoutKind;
    use serde_json::json;

    fn design_json() -> Value {
        json!({
            "layout": "asymmetric",
            "header": {"alignment": "right", "style": "banner", "nameSize": "huge"},
            "sections": {"style": "cards", "titleStyle": "highlighted", "spacing": "compact"},
            "colors": {"primary": "#7c3aed", "secondary": "#a78bfa", "background": "#fffbeb",
                       "text": "#1c1917", "accent": "#f472b6"},
            "fonts": {"heading": "Playfair Display", "body": "Lato"},
            "decorative": {"shape": "geometric", "borderStyle": "none", "useIcons": true}
        })
    }

    #[test]
    fn test_wrapped_and_bare_objects_parse_identically() {
        let bare = parse_design_payload(design_json()).unwrap();
        let wrapped = parse_design_payload(json!({"result": design_json()})).unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare.layout, LayoutKind::Asymmetric);
    }

    #[test]
    fn test_prose_wrapped_fenced_json() {
        let text = format!(
            "Voici votre design :\n```json\n{}\n```\nBonne chance !",
            serde_json::to_string_pretty(&design_json()).unwrap()
        );
        let parsed = parse_design_text(&text).unwrap();
        assert_eq!(parsed, parse_design_payload(design_json()).unwrap());
    }

    #[test]
    fn test_untagged_fence_and_string_result() {
        let text = format!("```\n{}\n```", design_json());
        let payload = json!({ "result": text });
        assert!(parse_design_payload(payload).is_ok());
    }

    #[test]
    fn test_unfenced_prose_uses_brace_span() {
        let text = format!("Design proposé : {} (fin).", design_json());
        assert!(parse_design_text(&text).is_ok());
    }

    #[test]
    fn test_partial_config_is_malformed() {
        let mut partial = design_json();
        partial.as_object_mut().unwrap().remove("fonts");
        assert!(matches!(
            parse_design_payload(partial),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn test_no_json_is_malformed() {
        assert!(matches!(
            parse_design_text("Désolé, je ne peux pas."),
            Err(GenerationError::Malformed(_))
        ));
    }
}
