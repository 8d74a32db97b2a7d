//! Readability for a non-technical (marketing) audience.
//!
//! Combines the classic readability indices with a technical-vocabulary
//! density check. Higher density and higher grade level both pull the score
//! down from the Flesch baseline.

use super::indices::{self, TextStats};
use super::{banded, compile_patterns, count_matches, patterns, DimensionAnalyzer};
use crate::config::thresholds::{Bands, ReadabilityThresholds};
use crate::critique::prompts;
use crate::error::AnalyzerError;
use crate::text;
use crate::vocabulary::Vocabulary;
use crate::{Dimension, DocumentFeatures};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub syllable_count: usize,
    pub avg_sentence_length: f64,
    pub avg_syllables_per_word: f64,
    pub character_count: usize,
    pub paragraph_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityIndices {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub gunning_fog: f64,
    pub coleman_liau: f64,
    pub automated_readability: f64,
    pub smog_index: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplexityLevel {
    #[serde(rename = "Very High")]
    VeryHigh,
    High,
    Moderate,
    Low,
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplexityLevel::VeryHigh => write!(f, "Very High"),
            ComplexityLevel::High => write!(f, "High"),
            ComplexityLevel::Moderate => write!(f, "Moderate"),
            ComplexityLevel::Low => write!(f, "Low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityAnalysis {
    pub technical_term_count: usize,
    /// Technical terms per 100 words
    pub technical_term_density: f64,
    pub jargon_count: usize,
    pub complexity_level: ComplexityLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityMetrics {
    pub basic: BasicMetrics,
    pub indices: ReadabilityIndices,
    pub complexity: ComplexityAnalysis,
}

pub struct ReadabilityAnalyzer {
    thresholds: ReadabilityThresholds,
    bands: Bands,
    technical_terms: Vec<String>,
    jargon: Result<Vec<Regex>, AnalyzerError>,
}

impl ReadabilityAnalyzer {
    pub fn new(thresholds: ReadabilityThresholds, bands: Bands, vocabulary: &Vocabulary) -> Self {
        Self {
            thresholds,
            bands,
            technical_terms: vocabulary.technical_terms.clone(),
            jargon: compile_patterns(&vocabulary.jargon_patterns),
        }
    }

    fn basic_metrics(&self, content: &str, stats: &TextStats) -> BasicMetrics {
        BasicMetrics {
            word_count: stats.words,
            sentence_count: stats.sentences,
            syllable_count: stats.syllables,
            avg_sentence_length: text::round_to(
                text::ratio(stats.words as f64, stats.sentences as f64),
                1,
            ),
            avg_syllables_per_word: text::round_to(
                text::ratio(stats.syllables as f64, stats.words as f64),
                2,
            ),
            character_count: content.chars().count(),
            paragraph_count: text::blocks(content).len(),
        }
    }

    fn indices(&self, stats: &TextStats) -> ReadabilityIndices {
        ReadabilityIndices {
            flesch_reading_ease: indices::or_zero(
                "flesch_reading_ease",
                indices::flesch_reading_ease(stats),
            ),
            flesch_kincaid_grade: indices::or_zero(
                "flesch_kincaid_grade",
                indices::flesch_kincaid_grade(stats),
            ),
            gunning_fog: indices::or_zero("gunning_fog", indices::gunning_fog(stats)),
            coleman_liau: indices::or_zero("coleman_liau", indices::coleman_liau(stats)),
            automated_readability: indices::or_zero(
                "automated_readability",
                indices::automated_readability(stats),
            ),
            smog_index: indices::or_zero(
                "smog_index",
                indices::smog_index(stats, self.thresholds.smog_min_sentences),
            ),
        }
    }

    fn complexity(&self, content: &str, jargon: &[Regex]) -> ComplexityAnalysis {
        let lower = content.to_lowercase();
        let technical_term_count = text::count_terms(&lower, &self.technical_terms);
        let density = text::ratio(
            technical_term_count as f64,
            text::word_count(content) as f64,
        );
        let technical_term_density = text::round_to(density * 100.0, 2);
        let jargon_count = count_matches(jargon, content);

        ComplexityAnalysis {
            technical_term_count,
            technical_term_density,
            jargon_count,
            complexity_level: self.complexity_level(technical_term_density, jargon_count),
        }
    }

    /// Level from density (percent) and jargon count
    pub fn complexity_level(&self, density: f64, jargon: usize) -> ComplexityLevel {
        let t = &self.thresholds;
        if density > t.very_high_density || jargon > t.very_high_jargon {
            ComplexityLevel::VeryHigh
        } else if density > t.high_density || jargon > t.high_jargon {
            ComplexityLevel::High
        } else if density > t.moderate_density || jargon > t.moderate_jargon {
            ComplexityLevel::Moderate
        } else {
            ComplexityLevel::Low
        }
    }
}

impl DimensionAnalyzer for ReadabilityAnalyzer {
    type Metrics = ReadabilityMetrics;

    fn dimension(&self) -> Dimension {
        Dimension::Readability
    }

    fn measure(&self, features: &DocumentFeatures) -> Result<ReadabilityMetrics, AnalyzerError> {
        let jargon = patterns(&self.jargon)?;
        let content = features.content.as_str();
        let stats = TextStats::from_text(content);

        Ok(ReadabilityMetrics {
            basic: self.basic_metrics(content, &stats),
            indices: self.indices(&stats),
            complexity: self.complexity(content, jargon),
        })
    }

    fn score(&self, metrics: &ReadabilityMetrics) -> f64 {
        let t = &self.thresholds;
        let flesch = (metrics.indices.flesch_reading_ease / t.flesch_divisor).clamp(0.0, 10.0);
        let grade_penalty =
            ((metrics.indices.flesch_kincaid_grade - t.target_grade) * t.grade_penalty).max(0.0);
        let density_penalty = metrics.complexity.technical_term_density * t.density_penalty;
        text::clamp_round(flesch - grade_penalty - density_penalty, 0.0, 10.0, 1)
    }

    fn suggestions(&self, metrics: &ReadabilityMetrics) -> Vec<String> {
        let t = &self.thresholds;
        let mut suggestions = Vec::new();

        let sentence_length = metrics.basic.avg_sentence_length;
        if sentence_length > t.long_sentence_words {
            suggestions.push(format!(
                "Average sentence length is {:.1} words. Break long sentences into shorter ones (aim for 15-20 words).",
                sentence_length
            ));
        } else if sentence_length > t.wordy_sentence_words {
            suggestions.push(format!(
                "Some sentences are long ({:.1} words average). Consider splitting complex sentences.",
                sentence_length
            ));
        }

        let flesch = metrics.indices.flesch_reading_ease;
        if flesch < t.very_difficult_flesch {
            suggestions.push(
                "Text is very difficult to read. Use simpler words and shorter sentences."
                    .to_string(),
            );
        } else if flesch < t.difficult_flesch {
            suggestions.push(
                "Text is fairly difficult. Simplify vocabulary and sentence structure.".to_string(),
            );
        } else if flesch < t.standard_flesch {
            suggestions.push(
                "Text readability is standard but could be improved for broader accessibility."
                    .to_string(),
            );
        }

        let grade = metrics.indices.flesch_kincaid_grade;
        if grade > t.college_grade {
            suggestions.push(format!(
                "Content requires college-level reading (grade {:.1}). Simplify for broader audience.",
                grade
            ));
        } else if grade > t.high_grade {
            suggestions.push(format!(
                "Content is at grade {:.1} level. Consider simplifying for marketing audience.",
                grade
            ));
        }

        let density = metrics.complexity.technical_term_density;
        if density > t.high_density_percent {
            suggestions.push(format!(
                "High technical term density ({:.2}%). Add definitions or explanations for technical concepts.",
                density
            ));
        } else if density > t.moderate_density_percent {
            suggestions.push(
                "Consider adding a glossary or inline explanations for technical terms."
                    .to_string(),
            );
        }

        if metrics.complexity.jargon_count > t.max_jargon {
            suggestions.push(
                "Reduce technical jargon or provide clear explanations for marketing audience."
                    .to_string(),
            );
        }

        if metrics.basic.avg_syllables_per_word > t.max_syllables_per_word {
            suggestions.push(
                "Use shorter, simpler words when possible to improve readability.".to_string(),
            );
        }

        suggestions
    }

    fn summary(&self, score: f64) -> String {
        let template = banded(
            &self.bands,
            score,
            [
                "Excellent readability (score: {}). Content is well-suited for marketing audience.",
                "Good readability (score: {}) with room for improvement.",
                "Moderate readability (score: {}). Significant improvements needed.",
                "Poor readability (score: {}). Major revision required for marketing audience.",
            ],
        );
        template.replace("{}", &format!("{:.1}", score))
    }

    fn critique_prompt(&self, features: &DocumentFeatures) -> String {
        prompts::readability(&features.content)
    }

    fn critique_fallback(&self) -> &'static str {
        "Unable to perform marketer-specific analysis due to API error"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> ReadabilityAnalyzer {
        ReadabilityAnalyzer::new(
            ReadabilityThresholds::default(),
            Bands::default(),
            &Vocabulary::default(),
        )
    }

    fn measure(content: &str) -> ReadabilityMetrics {
        analyzer()
            .measure(&DocumentFeatures::from_content(content))
            .unwrap()
    }

    #[test]
    fn test_empty_content_zero_metrics() {
        let a = analyzer();
        let metrics = measure("");
        assert_eq!(metrics.basic, BasicMetrics::default());
        assert_eq!(metrics.indices, ReadabilityIndices::default());
        assert_eq!(metrics.complexity.complexity_level, ComplexityLevel::Low);
        assert_eq!(a.score(&metrics), 0.0);
    }

    #[test]
    fn test_simple_text_scores_high() {
        let a = analyzer();
        let metrics = measure(
            "Open the app. Tap the big blue button. Pick a name for your list. \
             Add a few items. Save it when you are done.",
        );
        assert!(metrics.indices.flesch_reading_ease > 80.0);
        assert!(a.score(&metrics) >= 8.0);
        assert!(a.suggestions(&metrics).is_empty());
    }

    #[test]
    fn test_technical_density_counts_substrings() {
        let metrics = measure("The API endpoint returns JSON. Configure the webhook callback.");
        // api, endpoint, json, webhook, callback ("configure" is not "configuration")
        assert_eq!(metrics.complexity.technical_term_count, 5);
        assert_eq!(metrics.complexity.technical_term_density, 55.56);
        assert_eq!(
            metrics.complexity.complexity_level,
            ComplexityLevel::VeryHigh
        );
    }

    #[test]
    fn test_jargon_patterns() {
        let metrics = measure("Call client.send() with {token} on api/v2 via the REST SDK");
        // send(), {token}, api/v2, REST, SDK
        assert_eq!(metrics.complexity.jargon_count, 5);
    }

    #[test]
    fn test_complexity_levels() {
        let a = analyzer();
        assert_eq!(a.complexity_level(0.5, 0), ComplexityLevel::Low);
        assert_eq!(a.complexity_level(1.5, 0), ComplexityLevel::Moderate);
        assert_eq!(a.complexity_level(0.0, 6), ComplexityLevel::Moderate);
        assert_eq!(a.complexity_level(3.5, 0), ComplexityLevel::High);
        assert_eq!(a.complexity_level(0.0, 21), ComplexityLevel::VeryHigh);
    }

    #[test]
    fn test_score_formula() {
        let a = analyzer();
        let mut metrics = measure("");
        metrics.indices.flesch_reading_ease = 65.0;
        metrics.indices.flesch_kincaid_grade = 10.0;
        metrics.complexity.technical_term_density = 2.0;
        // 6.5 - 1.0 - 0.6
        assert_eq!(a.score(&metrics), 4.9);

        metrics.complexity.technical_term_density = 40.0;
        assert_eq!(a.score(&metrics), 0.0);
    }

    #[test]
    fn test_higher_density_never_raises_score() {
        let a = analyzer();
        let mut metrics = measure("Short words help. Use them.");
        let mut previous = f64::MAX;
        for density in [0.0, 0.5, 1.0, 2.5, 5.0, 10.0] {
            metrics.complexity.technical_term_density = density;
            let score = a.score(&metrics);
            assert!(score <= previous);
            previous = score;
        }
    }

    #[test]
    fn test_suggestions_in_fixed_order() {
        let a = analyzer();
        let mut metrics = measure("");
        metrics.basic.avg_sentence_length = 30.0;
        metrics.indices.flesch_reading_ease = 20.0;
        metrics.indices.flesch_kincaid_grade = 14.0;
        metrics.complexity.technical_term_density = 6.0;
        metrics.complexity.jargon_count = 11;
        metrics.basic.avg_syllables_per_word = 1.9;

        let suggestions = a.suggestions(&metrics);
        assert_eq!(suggestions.len(), 6);
        assert!(suggestions[0].starts_with("Average sentence length is 30.0 words"));
        assert!(suggestions[1].starts_with("Text is very difficult"));
        assert!(suggestions[2].contains("college-level reading (grade 14.0)"));
        assert!(suggestions[3].starts_with("High technical term density (6.00%)"));
        assert!(suggestions[4].starts_with("Reduce technical jargon"));
        assert!(suggestions[5].starts_with("Use shorter, simpler words"));
    }

    #[test]
    fn test_summary_bands() {
        let a = analyzer();
        assert!(a.summary(8.0).starts_with("Excellent readability (score: 8.0)"));
        assert!(a.summary(6.5).starts_with("Good readability"));
        assert!(a.summary(4.0).starts_with("Moderate readability"));
        assert!(a.summary(0.0).starts_with("Poor readability (score: 0.0)"));
    }

    #[test]
    fn test_invalid_jargon_pattern_fails_measure() {
        let vocabulary = Vocabulary {
            jargon_patterns: vec!["[".to_string()],
            ..Vocabulary::default()
        };
        let a = ReadabilityAnalyzer::new(
            ReadabilityThresholds::default(),
            Bands::default(),
            &vocabulary,
        );
        assert!(a.measure(&DocumentFeatures::default()).is_err());
    }
}
