//! Service identity and health payloads.

use serde::{Deserialize, Serialize};

/// Payload for the root endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
    pub server_ip: String,
    pub ollama_url: String,
}

/// Payload for the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub ollama: String,
    pub server_ip: String,
    pub ollama_url: String,
}

/// Tri-state result of probing the Ollama listing endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OllamaHealth {
    /// Listing endpoint answered with a success status
    Connected,
    /// Endpoint answered, but not successfully
    Disconnected,
    /// No answer at all (connect failure or timeout)
    Unreachable,
}

impl OllamaHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Unreachable => "unreachable",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}
