//! Configuration management for smithd.
//!
//! Loads settings from /etc/smith/config.toml or uses defaults.
//! `SMITHD_CONFIG` overrides the path entirely.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/smith/config.toml";

/// Default config file path for fallback
pub const DEFAULT_CONFIG_PATH: &str = "/var/lib/smith/config.toml";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the relay listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the local Ollama service
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Model queried for intent extraction
    #[serde(default = "default_model")]
    pub model: String,

    /// Generate request timeout in seconds
    #[serde(default = "default_generate_timeout")]
    pub generate_timeout_secs: u64,

    /// Health probe timeout in seconds
    #[serde(default = "default_health_timeout")]
    pub health_timeout_secs: u64,
}

fn default_ollama_url() -> String {
    // Ollama runs on the same machine; external access goes through the relay
    "http://127.0.0.1:11434".to_string()
}

fn default_model() -> String {
    "gemma2:2b".to_string()
}

fn default_generate_timeout() -> u64 {
    90
}

fn default_health_timeout() -> u64 {
    5
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            ollama_url: default_ollama_url(),
            model: default_model(),
            generate_timeout_secs: default_generate_timeout(),
            health_timeout_secs: default_health_timeout(),
        }
    }
}

/// Full daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub llm: LlmConfig,
}

impl Config {
    /// Load config from file, or return defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("SMITHD_CONFIG") {
            return Self::load_from_path(&path).unwrap_or_else(|e| {
                warn!("Config at {} unreadable, using defaults: {}", path, e);
                Config::default()
            });
        }

        Self::load_from_path(CONFIG_PATH)
            .or_else(|_| Self::load_from_path(DEFAULT_CONFIG_PATH))
            .unwrap_or_else(|e| {
                warn!("Config not found, using defaults: {}", e);
                Config::default()
            })
    }

    /// Load config from specific path
    pub fn load_from_path(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded config from {}", path);
        Ok(config)
    }

    /// Save default config to path (for init)
    #[allow(dead_code)]
    pub fn save_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)?;
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        info!("Saved default config to {}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.llm.ollama_url, "http://127.0.0.1:11434");
        assert_eq!(config.llm.model, "gemma2:2b");
        assert_eq!(config.llm.generate_timeout_secs, 90);
        assert_eq!(config.llm.health_timeout_secs, 5);
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
[llm]
model = "gemma2:9b"
generate_timeout_secs = 30
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.model, "gemma2:9b");
        assert_eq!(config.llm.generate_timeout_secs, 30);
        // Defaults for missing fields
        assert_eq!(config.llm.ollama_url, "http://127.0.0.1:11434");
        assert_eq!(config.server.bind_addr, "0.0.0.0:8000");
    }

    #[test]
    fn test_empty_toml_falls_back_safely() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.llm.model, "gemma2:2b");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nbind_addr = \"127.0.0.1:9000\"\n").unwrap();

        let config = Config::load_from_path(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.llm.model, "gemma2:2b");
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(Config::load_from_path("/nonexistent/smith.toml").is_err());
    }
}
