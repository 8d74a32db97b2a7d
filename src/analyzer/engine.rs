//! Analysis engine - runs the four dimension analyzers and aggregates them

use super::completeness::CompletenessAnalyzer;
use super::readability::ReadabilityAnalyzer;
use super::structure::StructureAnalyzer;
use super::style::StyleAnalyzer;
use super::{run_analyzer, Aggregator};
use crate::config::thresholds::Thresholds;
use crate::config::Config;
use crate::critique::{Critic, DisabledCritic};
use crate::vocabulary::Vocabulary;
use crate::{DocumentFeatures, DocumentInfo, OverallReport};
use serde::{Deserialize, Serialize};

/// Main analysis engine that scores one page at a time
pub struct DocumentationAnalyzer {
    readability: ReadabilityAnalyzer,
    structure: StructureAnalyzer,
    completeness: CompletenessAnalyzer,
    style: StyleAnalyzer,
    aggregator: Aggregator,
    critic: Box<dyn Critic>,
    thresholds: Thresholds,
    vocabulary: Vocabulary,
    /// Run the analyzers on the rayon pool
    parallel: bool,
}

impl Default for DocumentationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentationAnalyzer {
    /// Default thresholds and vocabulary, no critique
    pub fn new() -> Self {
        Self::build(
            Thresholds::default(),
            Vocabulary::default(),
            Box::new(DisabledCritic),
            false,
        )
    }

    /// Build from a loaded config and a critique collaborator
    pub fn from_config(config: &Config, critic: Box<dyn Critic>) -> Self {
        Self::build(
            config.thresholds(),
            config.vocabulary(),
            critic,
            config.is_parallel(),
        )
    }

    fn build(
        thresholds: Thresholds,
        vocabulary: Vocabulary,
        critic: Box<dyn Critic>,
        parallel: bool,
    ) -> Self {
        let bands = thresholds.summary;
        Self {
            readability: ReadabilityAnalyzer::new(thresholds.readability.clone(), bands, &vocabulary),
            structure: StructureAnalyzer::new(thresholds.structure.clone(), bands, &vocabulary),
            completeness: CompletenessAnalyzer::new(
                thresholds.completeness.clone(),
                bands,
                &vocabulary,
            ),
            style: StyleAnalyzer::new(thresholds.style.clone(), bands, &vocabulary),
            aggregator: Aggregator::new(thresholds.aggregate.clone()),
            critic,
            thresholds,
            vocabulary,
            parallel,
        }
    }

    /// Replace the critique collaborator
    pub fn with_critic(mut self, critic: Box<dyn Critic>) -> Self {
        self.critic = critic;
        self
    }

    /// Replace every threshold table
    pub fn with_thresholds(self, thresholds: Thresholds) -> Self {
        Self::build(thresholds, self.vocabulary, self.critic, self.parallel)
    }

    /// Replace the word lists
    pub fn with_vocabulary(self, vocabulary: Vocabulary) -> Self {
        Self::build(self.thresholds, vocabulary, self.critic, self.parallel)
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Score a page. Never fails: analyzer and aggregation failures are
    /// folded into the report.
    pub fn analyze(&self, features: &DocumentFeatures) -> OverallReport {
        let document = DocumentInfo::from_features(features);
        tracing::info!("Analyzing document: {}", document.label());
        tracing::info!("Content length: {} characters", document.character_count);

        let critic = self.critic.as_ref();
        let ((readability, structure), (completeness, style)) = if self.parallel {
            rayon::join(
                || {
                    rayon::join(
                        || run_analyzer(&self.readability, features, critic),
                        || run_analyzer(&self.structure, features, critic),
                    )
                },
                || {
                    rayon::join(
                        || run_analyzer(&self.completeness, features, critic),
                        || run_analyzer(&self.style, features, critic),
                    )
                },
            )
        } else {
            (
                (
                    run_analyzer(&self.readability, features, critic),
                    run_analyzer(&self.structure, features, critic),
                ),
                (
                    run_analyzer(&self.completeness, features, critic),
                    run_analyzer(&self.style, features, critic),
                ),
            )
        };

        let mut report = OverallReport {
            document,
            readability,
            structure,
            completeness,
            style,
            overall_score: 0.0,
            executive_summary: Default::default(),
        };

        let scores = report.dimension_scores().map(|(d, s)| (d, Some(s)));
        let (overall_score, executive_summary) = self.aggregator.aggregate(&scores);
        report.overall_score = overall_score;
        report.executive_summary = executive_summary;

        tracing::info!("Analysis complete. Overall score: {:.1}", overall_score);
        report
    }
}

/// Aggregate statistics over a batch of analyzed pages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    pub documents_analyzed: usize,
    /// Mean overall score (one decimal)
    pub average_score: f64,
    pub lowest_score: f64,
    pub highest_score: f64,
    /// Dimension analyzers that failed across the batch
    pub failed_dimensions: usize,
}

impl BatchStats {
    pub fn from_reports(reports: &[OverallReport]) -> Self {
        if reports.is_empty() {
            return Self::default();
        }
        let scores = reports.iter().map(|r| r.overall_score);
        let total: f64 = scores.clone().sum();
        Self {
            documents_analyzed: reports.len(),
            average_score: crate::text::round_to(total / reports.len() as f64, 1),
            lowest_score: scores.clone().fold(f64::INFINITY, f64::min),
            highest_score: scores.fold(f64::NEG_INFINITY, f64::max),
            failed_dimensions: reports
                .iter()
                .map(|r| {
                    [
                        r.readability.is_failed(),
                        r.structure.is_failed(),
                        r.completeness.is_failed(),
                        r.style.is_failed(),
                    ]
                    .iter()
                    .filter(|&&failed| failed)
                    .count()
                })
                .sum(),
        }
    }
}
