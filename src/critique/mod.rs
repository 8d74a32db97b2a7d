//! Language-model critique collaborator.
//!
//! Each analyzer sends one prompt and embeds the raw reply as commentary.
//! The reply never feeds into a score.

pub mod claude;
pub mod prompts;

pub use claude::{is_ai_available, ClaudeClient};

use crate::config::CritiqueConfig;
use thiserror::Error;

/// Error from the critique service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CritiqueError {
    #[error("critique is disabled")]
    Disabled,

    #[error("{env_var} environment variable not set")]
    NoApiKey { env_var: String },

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Prompt in, free text or failure out
pub trait Critic: Send + Sync {
    fn generate_critique(&self, prompt: &str) -> Result<String, CritiqueError>;
}

/// Critic used when critique is turned off; every call fails with `Disabled`
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCritic;

impl Critic for DisabledCritic {
    fn generate_critique(&self, _prompt: &str) -> Result<String, CritiqueError> {
        Err(CritiqueError::Disabled)
    }
}

/// Critic that returns the same text for every prompt
#[derive(Debug, Clone, Default)]
pub struct StaticCritic {
    response: String,
}

impl StaticCritic {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl Critic for StaticCritic {
    fn generate_critique(&self, _prompt: &str) -> Result<String, CritiqueError> {
        Ok(self.response.clone())
    }
}

/// Build the critic described by the config.
///
/// Falls back to [`DisabledCritic`] (with a warning) when critique is enabled
/// but no client can be built.
pub fn from_config(config: &CritiqueConfig) -> Box<dyn Critic> {
    if !config.is_enabled() {
        return Box::new(DisabledCritic);
    }
    if !is_ai_available() {
        tracing::warn!(
            "Critique requested but the ai feature is not enabled. Rebuild with: cargo build --features ai"
        );
        return Box::new(DisabledCritic);
    }
    match ClaudeClient::from_config(config) {
        Ok(client) => Box::new(client),
        Err(e) => {
            tracing::warn!("Critique disabled: {}", e);
            Box::new(DisabledCritic)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_config_yields_disabled_critic() {
        let config = CritiqueConfig {
            enabled: Some(false),
            ..CritiqueConfig::default()
        };
        let critic = from_config(&config);
        assert_eq!(
            critic.generate_critique("anything"),
            Err(CritiqueError::Disabled)
        );
    }

    #[test]
    fn test_missing_key_yields_disabled_critic() {
        let config = CritiqueConfig {
            api_key_env: Some("DOCGRADE_TEST_KEY_THAT_IS_NEVER_SET".to_string()),
            ..CritiqueConfig::default()
        };
        let critic = from_config(&config);
        assert_eq!(critic.generate_critique("x"), Err(CritiqueError::Disabled));
    }

    #[test]
    fn test_static_critic() {
        let critic = StaticCritic::new("Clear and friendly.");
        assert_eq!(
            critic.generate_critique("prompt").unwrap(),
            "Clear and friendly."
        );
    }
}
