//! Analyzer module - documentation quality scoring engine

pub mod aggregate;
pub mod completeness;
pub mod engine;
pub mod indices;
pub mod readability;
pub mod structure;
pub mod style;

pub use aggregate::Aggregator;
pub use engine::{BatchStats, DocumentationAnalyzer};

use crate::config::thresholds::{Band, Bands};
use crate::critique::{Critic, CritiqueError};
use crate::error::{AnalyzerError, MetricError};
use crate::{AnalysisResult, Dimension, DocumentFeatures};
use regex::Regex;
use std::panic::{self, AssertUnwindSafe};

/// One scoring dimension.
///
/// `measure` does all the work that can fail; scoring, suggestions and the
/// summary are pure functions of the measured metrics.
pub trait DimensionAnalyzer: Send + Sync {
    type Metrics: Send;

    fn dimension(&self) -> Dimension;

    /// Compute the metric breakdown
    fn measure(&self, features: &DocumentFeatures) -> Result<Self::Metrics, AnalyzerError>;

    /// Dimension score (0-10, one decimal)
    fn score(&self, metrics: &Self::Metrics) -> f64;

    /// Improvement suggestions in fixed check order
    fn suggestions(&self, metrics: &Self::Metrics) -> Vec<String>;

    /// One-sentence verdict for a score
    fn summary(&self, score: f64) -> String;

    /// Prompt sent to the critique collaborator
    fn critique_prompt(&self, features: &DocumentFeatures) -> String;

    /// Commentary used when the critique call fails
    fn critique_fallback(&self) -> &'static str;
}

/// Run one analyzer behind the failure boundary.
///
/// Errors and panics inside the analyzer become a failed result; a failed
/// critique call only replaces the commentary.
pub fn run_analyzer<A: DimensionAnalyzer>(
    analyzer: &A,
    features: &DocumentFeatures,
    critic: &dyn Critic,
) -> AnalysisResult<A::Metrics> {
    let dimension = analyzer.dimension();
    tracing::info!("Analyzing {}...", dimension);

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let metrics = analyzer.measure(features)?;
        let score = analyzer.score(&metrics);
        if !score.is_finite() {
            return Err(AnalyzerError::Metric(MetricError::NonFinite { metric: "score" }));
        }
        let suggestions = analyzer.suggestions(&metrics);
        let summary = analyzer.summary(score);
        Ok((metrics, score, suggestions, summary))
    }))
    .unwrap_or_else(|payload| Err(AnalyzerError::from_panic(dimension, payload)));

    match outcome {
        Ok((metrics, score, suggestions, summary)) => {
            let llm_commentary = critique(analyzer, features, critic);
            tracing::debug!("{} score: {:.1}", dimension, score);
            AnalysisResult {
                score,
                metrics: Some(metrics),
                llm_commentary,
                suggestions,
                summary,
                error: None,
            }
        }
        Err(e) => {
            tracing::error!("Error in {} analysis: {}", dimension, e);
            AnalysisResult::failed(dimension, e)
        }
    }
}

fn critique<A: DimensionAnalyzer>(
    analyzer: &A,
    features: &DocumentFeatures,
    critic: &dyn Critic,
) -> String {
    let dimension = analyzer.dimension();
    let prompt = analyzer.critique_prompt(features);
    let result = panic::catch_unwind(AssertUnwindSafe(|| critic.generate_critique(&prompt)))
        .unwrap_or_else(|_| {
            Err(CritiqueError::RequestFailed(
                "critique collaborator panicked".to_string(),
            ))
        });
    match result {
        Ok(text) => text,
        Err(CritiqueError::Disabled) => {
            tracing::debug!("Critique disabled, skipping {} commentary", dimension);
            String::new()
        }
        Err(e) => {
            tracing::warn!("Error in {} critique: {}", dimension, e);
            analyzer.critique_fallback().to_string()
        }
    }
}

/// Compile a pattern table
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, AnalyzerError> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|e| AnalyzerError::InvalidPattern {
                pattern: p.clone(),
                message: e.to_string(),
            })
        })
        .collect()
}

/// Total non-overlapping matches of every pattern
pub fn count_matches(patterns: &[Regex], haystack: &str) -> usize {
    patterns.iter().map(|re| re.find_iter(haystack).count()).sum()
}

/// Borrow a compiled pattern table, surfacing a compile failure as an analyzer error
pub(crate) fn patterns(
    compiled: &Result<Vec<Regex>, AnalyzerError>,
) -> Result<&[Regex], AnalyzerError> {
    compiled.as_deref().map_err(Clone::clone)
}

/// Pick the sentence for a score's band
pub(crate) fn banded<'a>(bands: &Bands, score: f64, texts: [&'a str; 4]) -> &'a str {
    match bands.classify(score) {
        Band::Excellent => texts[0],
        Band::Good => texts[1],
        Band::Fair => texts[2],
        Band::Poor => texts[3],
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::critique::{Critic, CritiqueError};

    /// Critic that always fails the request
    pub struct FailingCritic;

    impl Critic for FailingCritic {
        fn generate_critique(&self, _prompt: &str) -> Result<String, CritiqueError> {
            Err(CritiqueError::RequestFailed("connection refused".to_string()))
        }
    }

    /// Critic that panics
    pub struct PanickingCritic;

    impl Critic for PanickingCritic {
        fn generate_critique(&self, _prompt: &str) -> Result<String, CritiqueError> {
            panic!("critic exploded")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{FailingCritic, PanickingCritic};
    use super::*;
    use crate::critique::StaticCritic;

    struct Exploding;

    impl DimensionAnalyzer for Exploding {
        type Metrics = ();

        fn dimension(&self) -> Dimension {
            Dimension::Style
        }

        fn measure(&self, _features: &DocumentFeatures) -> Result<(), AnalyzerError> {
            panic!("bad input")
        }

        fn score(&self, _metrics: &()) -> f64 {
            0.0
        }

        fn suggestions(&self, _metrics: &()) -> Vec<String> {
            Vec::new()
        }

        fn summary(&self, _score: f64) -> String {
            String::new()
        }

        fn critique_prompt(&self, _features: &DocumentFeatures) -> String {
            String::new()
        }

        fn critique_fallback(&self) -> &'static str {
            "fallback"
        }
    }

    struct Constant(f64);

    impl DimensionAnalyzer for Constant {
        type Metrics = f64;

        fn dimension(&self) -> Dimension {
            Dimension::Readability
        }

        fn measure(&self, _features: &DocumentFeatures) -> Result<f64, AnalyzerError> {
            Ok(self.0)
        }

        fn score(&self, metrics: &f64) -> f64 {
            *metrics
        }

        fn suggestions(&self, _metrics: &f64) -> Vec<String> {
            vec!["do better".to_string()]
        }

        fn summary(&self, score: f64) -> String {
            format!("score {:.1}", score)
        }

        fn critique_prompt(&self, features: &DocumentFeatures) -> String {
            features.content.clone()
        }

        fn critique_fallback(&self) -> &'static str {
            "fallback"
        }
    }

    #[test]
    fn test_panic_becomes_failed_result() {
        let result = run_analyzer(&Exploding, &DocumentFeatures::default(), &FailingCritic);
        assert!(result.is_failed());
        assert_eq!(result.score, 0.0);
        assert_eq!(
            result.suggestions,
            vec!["Unable to analyze style due to processing error".to_string()]
        );
        assert!(result.error.unwrap().contains("bad input"));
    }

    #[test]
    fn test_non_finite_score_is_analyzer_failure() {
        let result = run_analyzer(&Constant(f64::NAN), &DocumentFeatures::default(), &FailingCritic);
        assert!(result.is_failed());
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_critic_failure_uses_fallback() {
        let result = run_analyzer(&Constant(7.5), &DocumentFeatures::default(), &FailingCritic);
        assert!(!result.is_failed());
        assert_eq!(result.score, 7.5);
        assert_eq!(result.llm_commentary, "fallback");
        assert_eq!(result.summary, "score 7.5");
    }

    #[test]
    fn test_critic_panic_uses_fallback() {
        let result = run_analyzer(&Constant(5.0), &DocumentFeatures::default(), &PanickingCritic);
        assert_eq!(result.llm_commentary, "fallback");
        assert_eq!(result.score, 5.0);
    }

    #[test]
    fn test_critic_receives_prompt() {
        let features = DocumentFeatures::from_content("hello docs");
        let critic = StaticCritic::new("looks fine");
        let result = run_analyzer(&Constant(5.0), &features, &critic);
        assert_eq!(result.llm_commentary, "looks fine");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = compile_patterns(&["(unclosed".to_string()]).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidPattern { .. }));
    }
}
