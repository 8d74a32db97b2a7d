//! Config schema and deserialization

use super::thresholds::{
    AggregateThresholds, Bands, CompletenessThresholds, ReadabilityThresholds,
    StructureThresholds, StyleThresholds, Thresholds,
};
use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Per-analyzer threshold tables; an absent table falls back to its defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readability: Option<ReadabilityThresholds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<StructureThresholds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completeness: Option<CompletenessThresholds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleThresholds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<AggregateThresholds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Bands>,
}

impl ThresholdOverrides {
    /// Complete threshold set with defaults for every table not overridden
    pub fn resolve(&self) -> Thresholds {
        Thresholds {
            readability: self.readability.clone().unwrap_or_default(),
            structure: self.structure.clone().unwrap_or_default(),
            completeness: self.completeness.clone().unwrap_or_default(),
            style: self.style.clone().unwrap_or_default(),
            aggregate: self.aggregate.clone().unwrap_or_default(),
            summary: self.summary.unwrap_or_default(),
        }
    }

    fn merge_from(&mut self, base: ThresholdOverrides) {
        if self.readability.is_none() {
            self.readability = base.readability;
        }
        if self.structure.is_none() {
            self.structure = base.structure;
        }
        if self.completeness.is_none() {
            self.completeness = base.completeness;
        }
        if self.style.is_none() {
            self.style = base.style;
        }
        if self.aggregate.is_none() {
            self.aggregate = base.aggregate;
        }
        if self.summary.is_none() {
            self.summary = base.summary;
        }
    }
}

/// Language-model critique settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CritiqueConfig {
    /// Call the critique service at all. Default: true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Name of the environment variable holding the API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl CritiqueConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    fn merge_from(&mut self, base: CritiqueConfig) {
        if self.enabled.is_none() {
            self.enabled = base.enabled;
        }
        if self.model.is_none() {
            self.model = base.model;
        }
        if self.base_url.is_none() {
            self.base_url = base.base_url;
        }
        if self.api_key_env.is_none() {
            self.api_key_env = base.api_key_env;
        }
        if self.timeout_secs.is_none() {
            self.timeout_secs = base.timeout_secs;
        }
        if self.max_tokens.is_none() {
            self.max_tokens = base.max_tokens;
        }
    }
}

/// Root config structure for .docgraderc.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Minimum overall score (exit 1 if below). Default: none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Scoring constants per analyzer
    #[serde(default)]
    pub thresholds: ThresholdOverrides,

    /// Word list overrides; unnamed lists keep their defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<Vocabulary>,

    #[serde(default)]
    pub critique: CritiqueConfig,

    /// Glob patterns for feature files to exclude when analyzing a directory
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Run the four analyzers concurrently. Default: false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(
        mut self,
        cli_threshold: Option<f64>,
        no_critique: bool,
        parallel: bool,
    ) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        if no_critique {
            self.critique.enabled = Some(false);
        }
        if parallel {
            self.parallel = Some(true);
        }
        self
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds.resolve()
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary.clone().unwrap_or_default()
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel.unwrap_or(false)
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        // Base values are overridden by this config's values
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }
        if self.vocabulary.is_none() {
            self.vocabulary = base.vocabulary;
        }
        if self.parallel.is_none() {
            self.parallel = base.parallel;
        }

        self.thresholds.merge_from(base.thresholds);
        self.critique.merge_from(base.critique);

        // Merge ignore patterns
        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;
    }

    /// Config written by `docgrade init`
    pub fn starter() -> Self {
        Self {
            threshold: Some(6.0),
            critique: CritiqueConfig {
                enabled: Some(true),
                model: Some(DEFAULT_MODEL.to_string()),
                api_key_env: Some(DEFAULT_API_KEY_ENV.to_string()),
                timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
                ..CritiqueConfig::default()
            },
            ignore: vec!["**/analysis_results/**".to_string(), "**/reports/**".to_string()],
            ..Self::default()
        }
    }
}
