//! Ollama client - generate completions and probe availability.

use std::time::Duration;

use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::config::LlmConfig;
use smith_common::status::OllamaHealth;

/// Upstream failure taxonomy. Every variant is recovered locally by the
/// fallback parser; none of them reaches the HTTP caller as an error.
#[derive(Debug, Error)]
pub enum OllamaError {
    #[error("request to Ollama failed: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("Ollama returned status {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("Ollama response body was not valid JSON: {0}")]
    MalformedBody(reqwest::Error),
}

/// Client for the local Ollama inference service
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    generate_timeout: Duration,
    health_timeout: Duration,
}

impl OllamaClient {
    pub fn new(config: &LlmConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: config.ollama_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            generate_timeout: Duration::from_secs(config.generate_timeout_secs),
            health_timeout: Duration::from_secs(config.health_timeout_secs),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a non-streaming generate request with low-randomness sampling.
    /// Returns the model's raw text output.
    pub async fn generate(&self, prompt: &str) -> Result<String, OllamaError> {
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": 0.1,
                "top_p": 0.9,
                "top_k": 40,
                "num_predict": 150,
            }
        });

        debug!("Generate request to {} ({} bytes)", self.base_url, prompt.len());

        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .timeout(self.generate_timeout)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OllamaError::BadStatus(response.status()));
        }

        let body: Value = response.json().await.map_err(OllamaError::MalformedBody)?;
        Ok(body
            .get("response")
            .and_then(|r| r.as_str())
            .unwrap_or("")
            .trim()
            .to_string())
    }

    /// Probe the model listing endpoint with a short timeout. Never errors;
    /// the tri-state result feeds the health endpoint directly.
    pub async fn probe(&self) -> OllamaHealth {
        let result = self
            .http
            .get(format!("{}/api/tags", self.base_url))
            .timeout(self.health_timeout)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => OllamaHealth::Connected,
            Ok(_) => OllamaHealth::Disconnected,
            Err(_) => OllamaHealth::Unreachable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = LlmConfig {
            ollama_url: "http://127.0.0.1:11434/".to_string(),
            ..LlmConfig::default()
        };
        let client = OllamaClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:11434");
    }

    #[tokio::test]
    async fn test_probe_unreachable() {
        let config = LlmConfig {
            ollama_url: "http://127.0.0.1:9".to_string(),
            health_timeout_secs: 1,
            ..LlmConfig::default()
        };
        let client = OllamaClient::new(&config).unwrap();
        assert_eq!(client.probe().await, OllamaHealth::Unreachable);
    }

    #[tokio::test]
    async fn test_generate_unreachable_is_error() {
        let config = LlmConfig {
            ollama_url: "http://127.0.0.1:9".to_string(),
            generate_timeout_secs: 1,
            ..LlmConfig::default()
        };
        let client = OllamaClient::new(&config).unwrap();
        assert!(matches!(
            client.generate("hello").await,
            Err(OllamaError::Unreachable(_))
        ));
    }
}
