//! Model-based intent extraction with deterministic fallback.
//!
//! Builds the structured prompt, queries Ollama, and validates the JSON
//! record the model emits. Any failure along that path - transport,
//! status, parse, or schema - falls through to the keyword fallback.
//! This module never raises past its own boundary.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::ollama::{OllamaClient, OllamaError};
use smith_common::fallback::parse_fallback;
use smith_common::intent::{Action, Emotion, IntentResult, IntentSource, ResolvedIntent};

/// Instruction prompt defining the JSON schema, the closed enumerations,
/// and worked examples. The user's text is appended per request.
const SYSTEM_PROMPT: &str = r#"You are Smith, an intelligent mobile assistant. You must respond ONLY with valid JSON.

Analyze the user's command and provide a JSON response with exactly these fields:
- "reply": A friendly, concise response (maximum 20 words)
- "action": Choose ONE from [call, sms, search, open_app, mobile_data, hotspot, wifi, bluetooth, settings, time, date, weather, none]
- "target": The specific target for the action (phone number, search query, app name, contact name, etc.)
- "emotion": Choose ONE from [happy, sad, excited, calm, confident, helpful, friendly, thoughtful, apologetic]
- "confidence": A number between 0.0 and 1.0 indicating how confident you are about the action

Examples:
User: "Call mom" -> {"reply": "Calling Mom now", "action": "call", "target": "mom", "emotion": "friendly", "confidence": 0.9}
User: "What time is it" -> {"reply": "Let me check the time", "action": "time", "target": "", "emotion": "helpful", "confidence": 0.95}
User: "How are you" -> {"reply": "I'm doing great and ready to help!", "action": "none", "target": "", "emotion": "happy", "confidence": 0.9}

CRITICAL: Respond with ONLY the JSON object, no other text."#;

/// Keys a model record must carry to be accepted
const REQUIRED_FIELDS: [&str; 5] = ["reply", "action", "target", "emotion", "confidence"];

/// Why a model response was rejected
#[derive(Debug, Error)]
pub enum IntentError {
    #[error(transparent)]
    Upstream(#[from] OllamaError),

    #[error("no JSON object in model output")]
    NoJson,

    #[error("model output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("intent record is missing `{0}`")]
    MissingField(&'static str),

    #[error("`{value}` is not in the {field} enumeration")]
    OutOfEnumeration { field: &'static str, value: String },
}

/// Intent record as the model emits it, before enumeration checks
#[derive(Debug, Deserialize)]
struct RawIntent {
    reply: String,
    action: String,
    target: String,
    emotion: String,
    confidence: f64,
}

/// Extract an intent for the given command text. Tries the model first;
/// on any failure the keyword fallback answers instead, so this always
/// produces a fully populated record.
pub async fn request_intent(ollama: &OllamaClient, text: &str) -> ResolvedIntent {
    match model_intent(ollama, text).await {
        Ok(intent) => ResolvedIntent {
            intent,
            source: IntentSource::Model,
        },
        Err(err) => {
            warn!("Model intent extraction failed, using fallback parser: {err}");
            ResolvedIntent {
                intent: parse_fallback(text),
                source: IntentSource::Fallback,
            }
        }
    }
}

async fn model_intent(ollama: &OllamaClient, text: &str) -> Result<IntentResult, IntentError> {
    let raw = ollama.generate(&build_prompt(text)).await?;
    parse_model_output(&raw).map_err(|err| {
        // Raw output goes to the log so prompt drift can be diagnosed
        warn!(raw_output = %raw, "Model output rejected: {err}");
        err
    })
}

/// Append the user's text to the instruction prompt
pub fn build_prompt(text: &str) -> String {
    format!("{SYSTEM_PROMPT}\n\nUser: \"{text}\"\n\nJSON:")
}

/// Parse and validate the model's raw text into an intent record
pub fn parse_model_output(raw: &str) -> Result<IntentResult, IntentError> {
    let json = extract_json(raw)?;
    let value: serde_json::Value = serde_json::from_str(&json)?;

    for field in REQUIRED_FIELDS {
        if value.get(field).is_none() {
            return Err(IntentError::MissingField(field));
        }
    }

    let record: RawIntent = serde_json::from_value(value)?;

    let action = Action::parse(&record.action).ok_or_else(|| IntentError::OutOfEnumeration {
        field: "action",
        value: record.action.clone(),
    })?;
    let emotion = Emotion::parse(&record.emotion).ok_or_else(|| IntentError::OutOfEnumeration {
        field: "emotion",
        value: record.emotion.clone(),
    })?;

    Ok(IntentResult {
        reply: record.reply,
        action,
        target: record.target,
        emotion,
        confidence: record.confidence.clamp(0.0, 1.0),
    })
}

/// Extract the JSON object from raw model text. Models often wrap the
/// object in commentary or markdown fences; the first-`{`-to-last-`}`
/// span tolerates both. Nested braces inside string values can still
/// defeat this, in which case the parse error falls through to the
/// fallback parser.
fn extract_json(response: &str) -> Result<String, IntentError> {
    let t = response.trim();

    // Direct JSON
    if t.starts_with('{') && t.ends_with('}') {
        return Ok(t.to_string());
    }

    // Markdown code block
    if let Some(start) = t.find("```json") {
        let body = &t[start + 7..];
        if let Some(end) = body.find("```") {
            let candidate = body[..end].trim();
            if !candidate.is_empty() {
                return Ok(candidate.to_string());
            }
        }
    }

    // First { to last }
    if let (Some(start), Some(end)) = (t.find('{'), t.rfind('}')) {
        if start < end {
            return Ok(t[start..=end].to_string());
        }
    }

    Err(IntentError::NoJson)
}
