//! Core intent types.
//!
//! Every command produces exactly one [`IntentResult`] carrying all five
//! fields. The action and emotion enumerations are closed: model output
//! naming anything outside them is rejected upstream and replaced by the
//! fallback parser's output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Context tag attached to commands that omit one
pub const DEFAULT_CONTEXT: &str = "mobile_assistant";

/// Incoming natural-language command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Command {
    pub text: String,

    #[serde(default = "default_context")]
    pub context: String,
}

fn default_context() -> String {
    DEFAULT_CONTEXT.to_string()
}

/// Action the assistant wants the device to take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Call,
    Sms,
    Search,
    OpenApp,
    MobileData,
    Hotspot,
    Wifi,
    Bluetooth,
    Settings,
    Time,
    Date,
    Weather,
    None,
}

impl Action {
    /// Parse a model-emitted action name. Returns `None` for anything
    /// outside the enumeration so the caller can reject the record.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "call" => Some(Self::Call),
            "sms" => Some(Self::Sms),
            "search" => Some(Self::Search),
            "open_app" => Some(Self::OpenApp),
            "mobile_data" => Some(Self::MobileData),
            "hotspot" => Some(Self::Hotspot),
            "wifi" => Some(Self::Wifi),
            "bluetooth" => Some(Self::Bluetooth),
            "settings" => Some(Self::Settings),
            "time" => Some(Self::Time),
            "date" => Some(Self::Date),
            "weather" => Some(Self::Weather),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Sms => "sms",
            Self::Search => "search",
            Self::OpenApp => "open_app",
            Self::MobileData => "mobile_data",
            Self::Hotspot => "hotspot",
            Self::Wifi => "wifi",
            Self::Bluetooth => "bluetooth",
            Self::Settings => "settings",
            Self::Time => "time",
            Self::Date => "date",
            Self::Weather => "weather",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emotional register of the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Happy,
    Sad,
    Excited,
    Calm,
    Confident,
    Helpful,
    Friendly,
    Thoughtful,
    Apologetic,
}

impl Emotion {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Some(Self::Happy),
            "sad" => Some(Self::Sad),
            "excited" => Some(Self::Excited),
            "calm" => Some(Self::Calm),
            "confident" => Some(Self::Confident),
            "helpful" => Some(Self::Helpful),
            "friendly" => Some(Self::Friendly),
            "thoughtful" => Some(Self::Thoughtful),
            "apologetic" => Some(Self::Apologetic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Excited => "excited",
            Self::Calm => "calm",
            Self::Confident => "confident",
            Self::Helpful => "helpful",
            Self::Friendly => "friendly",
            Self::Thoughtful => "thoughtful",
            Self::Apologetic => "apologetic",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured interpretation of a command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    pub reply: String,
    pub action: Action,
    pub target: String,
    pub emotion: Emotion,
    pub confidence: f64,
}

impl IntentResult {
    /// Degraded result returned when the pipeline itself fails.
    /// Confidence 0.0 marks it as carrying no signal.
    pub fn degraded() -> Self {
        Self {
            reply: "I'm having trouble processing that command".to_string(),
            action: Action::None,
            target: String::new(),
            emotion: Emotion::Apologetic,
            confidence: 0.0,
        }
    }
}

/// Where an intent came from. The relay never surfaces upstream failures
/// as errors, so the source is the typed record of which path produced
/// the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentSource {
    Model,
    Fallback,
    Degraded,
}

impl IntentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Fallback => "fallback",
            Self::Degraded => "degraded",
        }
    }
}

impl fmt::Display for IntentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intent paired with the path that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIntent {
    pub intent: IntentResult,
    pub source: IntentSource,
}

impl ResolvedIntent {
    pub fn degraded() -> Self {
        Self {
            intent: IntentResult::degraded(),
            source: IntentSource::Degraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_snake_case_serde() {
        assert_eq!(
            serde_json::to_string(&Action::MobileData).unwrap(),
            "\"mobile_data\""
        );
        assert_eq!(
            serde_json::from_str::<Action>("\"open_app\"").unwrap(),
            Action::OpenApp
        );
    }

    #[test]
    fn test_action_parse_round_trip() {
        for action in [
            Action::Call,
            Action::Sms,
            Action::Search,
            Action::OpenApp,
            Action::MobileData,
            Action::Hotspot,
            Action::Wifi,
            Action::Bluetooth,
            Action::Settings,
            Action::Time,
            Action::Date,
            Action::Weather,
            Action::None,
        ] {
            assert_eq!(Action::parse(action.as_str()), Some(action));
        }
        assert_eq!(Action::parse("reboot"), None);
        assert_eq!(Action::parse(""), None);
    }

    #[test]
    fn test_action_parse_tolerates_case_and_whitespace() {
        assert_eq!(Action::parse(" Mobile_Data "), Some(Action::MobileData));
        assert_eq!(Emotion::parse("FRIENDLY"), Some(Emotion::Friendly));
    }

    #[test]
    fn test_emotion_parse_rejects_unknown() {
        assert_eq!(Emotion::parse("angry"), None);
    }

    #[test]
    fn test_command_context_default() {
        let cmd: Command = serde_json::from_str(r#"{"text": "Call mom"}"#).unwrap();
        assert_eq!(cmd.context, DEFAULT_CONTEXT);

        let cmd: Command =
            serde_json::from_str(r#"{"text": "Call mom", "context": "watch"}"#).unwrap();
        assert_eq!(cmd.context, "watch");
    }

    #[test]
    fn test_degraded_shape() {
        let degraded = IntentResult::degraded();
        assert_eq!(degraded.action, Action::None);
        assert_eq!(degraded.emotion, Emotion::Apologetic);
        assert_eq!(degraded.confidence, 0.0);
        assert!(!degraded.reply.is_empty());
    }

    #[test]
    fn test_intent_result_json_shape() {
        let intent = IntentResult {
            reply: "Calling mom".to_string(),
            action: Action::Call,
            target: "mom".to_string(),
            emotion: Emotion::Friendly,
            confidence: 0.8,
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&intent).unwrap()).unwrap();
        assert_eq!(json["action"], "call");
        assert_eq!(json["emotion"], "friendly");
        assert_eq!(json["confidence"], 0.8);
    }
}
