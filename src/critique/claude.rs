//! Claude API integration for documentation critique
//!
//! Requires the `ai` feature to be enabled:
//! ```toml
//! docgrade = { version = "0.3", features = ["ai"] }
//! ```

use super::{Critic, CritiqueError};
use crate::config::{CritiqueConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use std::time::Duration;

/// Claude API client
#[cfg_attr(not(feature = "ai"), allow(dead_code))]
pub struct ClaudeClient {
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
    timeout: Duration,
}

impl std::fmt::Debug for ClaudeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ClaudeClient {
    /// Create a client from config, reading the key from the configured environment variable
    pub fn from_config(config: &CritiqueConfig) -> Result<Self, CritiqueError> {
        let env_var = config.api_key_env();
        let api_key = std::env::var(env_var)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| CritiqueError::NoApiKey {
                env_var: env_var.to_string(),
            })?;

        Ok(Self::with_key(api_key)
            .model(config.model())
            .base_url(config.base_url())
            .max_tokens(config.max_tokens())
            .timeout(config.timeout()))
    }

    /// Create a client with a specific API key
    pub fn with_key(api_key: String) -> Self {
        let defaults = CritiqueConfig::default();
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: defaults.max_tokens(),
            timeout: defaults.timeout(),
        }
    }

    /// Set the model to use
    pub fn model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send a prompt to Claude and get the reply text
    #[cfg(feature = "ai")]
    pub fn send_request(&self, prompt: &str) -> Result<String, CritiqueError> {
        use serde_json::json;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| CritiqueError::RequestFailed(e.to_string()))?;

        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let response = client
            .post(&self.base_url)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .map_err(|e| CritiqueError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CritiqueError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().unwrap_or_default();
            return Err(CritiqueError::ApiError(format!("{}: {}", status, error_text)));
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| CritiqueError::InvalidResponse(e.to_string()))?;

        let text = json["content"]
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|item| item["text"].as_str())
            .ok_or_else(|| CritiqueError::InvalidResponse("No content in response".to_string()))?;

        if let Some(tokens) = json["usage"]["output_tokens"].as_u64() {
            tracing::debug!("Critique used {} output tokens", tokens);
        }

        Ok(text.to_string())
    }

    /// Stub implementation when ai feature is disabled
    #[cfg(not(feature = "ai"))]
    pub fn send_request(&self, _prompt: &str) -> Result<String, CritiqueError> {
        Err(CritiqueError::RequestFailed(
            "AI feature not enabled. Rebuild with: cargo build --features ai".to_string(),
        ))
    }
}

impl Critic for ClaudeClient {
    fn generate_critique(&self, prompt: &str) -> Result<String, CritiqueError> {
        self.send_request(prompt)
    }
}

/// Check if the AI feature is available
pub fn is_ai_available() -> bool {
    cfg!(feature = "ai")
}
