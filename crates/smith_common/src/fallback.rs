//! Deterministic keyword fallback for intent extraction.
//!
//! Used whenever the model is unreachable or returns output that fails
//! validation. Pure function of the input text, always returns a fully
//! populated record. Rule order matters: the conversational status check
//! runs before the generic keyword checks, and the default catches the
//! rest.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::intent::{Action, Emotion, IntentResult};

/// Leading "search" / "search for" phrase, stripped from the original
/// casing of the text when extracting a search target
static SEARCH_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^search(\s+for)?\b\s*").expect("valid literal regex"));

/// Infer an intent from keywords alone. First matching rule wins.
pub fn parse_fallback(text: &str) -> IntentResult {
    let lowered = text.to_lowercase();
    let lowered = lowered.trim();

    if lowered.contains("how are you") {
        return IntentResult {
            reply: "I'm doing great and ready to help you!".to_string(),
            action: Action::None,
            target: String::new(),
            emotion: Emotion::Friendly,
            confidence: 0.9,
        };
    }

    if lowered.contains("time") {
        return IntentResult {
            reply: "Let me check the current time for you".to_string(),
            action: Action::Time,
            target: String::new(),
            emotion: Emotion::Helpful,
            confidence: 0.9,
        };
    }

    if lowered.contains("call") {
        let target = if lowered.contains("mom") { "mom" } else { "unknown" };
        return IntentResult {
            reply: format!("Calling {target}"),
            action: Action::Call,
            target: target.to_string(),
            emotion: Emotion::Friendly,
            confidence: 0.8,
        };
    }

    if lowered.contains("search") {
        let stripped = SEARCH_PREFIX.replace(text.trim(), "");
        let target = if stripped.trim().is_empty() {
            "general search".to_string()
        } else {
            stripped.trim().to_string()
        };
        return IntentResult {
            reply: format!("Searching for {target}"),
            action: Action::Search,
            target,
            emotion: Emotion::Helpful,
            confidence: 0.8,
        };
    }

    if lowered.contains("turn on") && lowered.contains("data") {
        return IntentResult {
            reply: "Turning on mobile data".to_string(),
            action: Action::MobileData,
            target: "on".to_string(),
            emotion: Emotion::Helpful,
            confidence: 0.9,
        };
    }

    IntentResult {
        reply: "I heard you, but I'm not sure how to help with that yet".to_string(),
        action: Action::None,
        target: String::new(),
        emotion: Emotion::Apologetic,
        confidence: 0.5,
    }
}
