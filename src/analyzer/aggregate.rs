//! Overall score and executive summary across the four dimensions

use crate::config::thresholds::AggregateThresholds;
use crate::error::AggregationError;
use crate::text;
use crate::{Dimension, ExecutiveSummary};

/// Recommendation used when aggregation itself fails
pub const FALLBACK_RECOMMENDATION: &str = "Unable to generate summary due to analysis errors";

/// A dimension and its score, `None` when the dimension produced no score
pub type DimensionScore = (Dimension, Option<f64>);

fn strength(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Readability => "Good readability for target audience",
        Dimension::Structure => "Well-organized document structure",
        Dimension::Completeness => "Comprehensive information coverage",
        Dimension::Style => "Adherence to style guidelines",
    }
}

fn improvement(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Readability => "Improve readability for marketers",
        Dimension::Structure => "Enhance document structure and flow",
        Dimension::Completeness => "Add missing information and examples",
        Dimension::Style => "Improve writing style and tone",
    }
}

/// Combines dimension scores into the overall verdict
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    thresholds: AggregateThresholds,
}

impl Aggregator {
    pub fn new(thresholds: AggregateThresholds) -> Self {
        Self { thresholds }
    }

    /// Unweighted mean of the present scores, rounded to one decimal; 0.0 when none are present
    pub fn overall_score(&self, scores: &[DimensionScore]) -> Result<f64, AggregationError> {
        let present = present_scores(scores)?;
        if present.is_empty() {
            return Ok(0.0);
        }
        let mean = present.iter().map(|(_, s)| s).sum::<f64>() / present.len() as f64;
        Ok(text::round_to(mean, 1))
    }

    pub fn executive_summary(
        &self,
        scores: &[DimensionScore],
    ) -> Result<ExecutiveSummary, AggregationError> {
        let t = &self.thresholds;
        let mut summary = ExecutiveSummary::default();

        // A missing score reads as 0 here, unlike in the mean
        let scored: Vec<(Dimension, f64)> = present_scores(scores)?;
        let score_of = |dimension: Dimension| {
            scored
                .iter()
                .find(|(d, _)| *d == dimension)
                .map_or(0.0, |(_, s)| *s)
        };

        for (dimension, _) in scores {
            if score_of(*dimension) >= t.strength_at {
                summary.strengths.push(strength(*dimension).to_string());
            }
        }

        for (dimension, _) in scores {
            let score = score_of(*dimension);
            if score < t.weakness_below {
                summary
                    .weaknesses
                    .push(format!("Poor {} (score: {:.1})", dimension, score));
                summary.priority_improvements.push(improvement(*dimension).to_string());
            } else if score < t.strength_at {
                summary.priority_improvements.push(improvement(*dimension).to_string());
            }
        }

        summary.recommendation = self.recommendation(self.overall_score(scores)?).to_string();
        Ok(summary)
    }

    pub fn recommendation(&self, overall: f64) -> &'static str {
        let t = &self.thresholds;
        if overall >= t.excellent_at {
            "Excellent documentation with minor improvements needed"
        } else if overall >= t.good_at {
            "Good documentation with some areas for improvement"
        } else if overall >= t.adequate_at {
            "Adequate documentation requiring moderate improvements"
        } else {
            "Documentation needs significant improvements across multiple areas"
        }
    }

    /// Overall score and summary; an aggregation failure yields 0.0 and the fallback recommendation
    pub fn aggregate(&self, scores: &[DimensionScore]) -> (f64, ExecutiveSummary) {
        let overall = self.overall_score(scores).unwrap_or_else(|e| {
            tracing::error!("Error calculating overall score: {}", e);
            0.0
        });
        let summary = self.executive_summary(scores).unwrap_or_else(|e| {
            tracing::error!("Error generating summary: {}", e);
            ExecutiveSummary {
                recommendation: FALLBACK_RECOMMENDATION.to_string(),
                ..ExecutiveSummary::default()
            }
        });
        (overall, summary)
    }
}

fn present_scores(scores: &[DimensionScore]) -> Result<Vec<(Dimension, f64)>, AggregationError> {
    scores
        .iter()
        .filter_map(|(dimension, score)| score.map(|s| (*dimension, s)))
        .map(|(dimension, score)| {
            if score.is_finite() {
                Ok((dimension, score))
            } else {
                Err(AggregationError::NonFiniteScore { dimension })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: [f64; 4]) -> Vec<DimensionScore> {
        Dimension::ALL
            .iter()
            .zip(values)
            .map(|(d, v)| (*d, Some(v)))
            .collect()
    }

    #[test]
    fn test_mean_of_present_scores() {
        let a = Aggregator::default();
        assert_eq!(a.overall_score(&scores([8.0, 6.0, 7.0, 5.0])).unwrap(), 6.5);

        let partial = vec![
            (Dimension::Readability, Some(9.0)),
            (Dimension::Structure, None),
            (Dimension::Completeness, Some(6.0)),
            (Dimension::Style, None),
        ];
        assert_eq!(a.overall_score(&partial).unwrap(), 7.5);
        assert_eq!(a.overall_score(&[]).unwrap(), 0.0);
    }

    #[test]
    fn test_strengths_weaknesses_and_improvements() {
        let a = Aggregator::default();
        let summary = a.executive_summary(&scores([8.0, 6.5, 4.0, 7.0])).unwrap();
        assert_eq!(
            summary.strengths,
            vec![
                "Good readability for target audience".to_string(),
                "Adherence to style guidelines".to_string(),
            ]
        );
        assert_eq!(summary.weaknesses, vec!["Poor completeness (score: 4.0)".to_string()]);
        assert_eq!(
            summary.priority_improvements,
            vec![
                "Enhance document structure and flow".to_string(),
                "Add missing information and examples".to_string(),
            ]
        );
        // mean 6.375 rounds to 6.4
        assert_eq!(
            summary.recommendation,
            "Adequate documentation requiring moderate improvements"
        );
    }

    #[test]
    fn test_recommendation_bands() {
        let a = Aggregator::default();
        assert_eq!(
            a.recommendation(8.0),
            "Excellent documentation with minor improvements needed"
        );
        assert_eq!(a.recommendation(7.2), "Good documentation with some areas for improvement");
        assert_eq!(
            a.recommendation(5.9),
            "Documentation needs significant improvements across multiple areas"
        );
    }

    #[test]
    fn test_non_finite_score_falls_back() {
        let a = Aggregator::default();
        let input = scores([8.0, f64::NAN, 7.0, 7.0]);
        assert_eq!(
            a.overall_score(&input),
            Err(AggregationError::NonFiniteScore {
                dimension: Dimension::Structure
            })
        );

        let (overall, summary) = a.aggregate(&input);
        assert_eq!(overall, 0.0);
        assert_eq!(summary.recommendation, FALLBACK_RECOMMENDATION);
        assert!(summary.strengths.is_empty());
    }

    #[test]
    fn test_custom_thresholds() {
        let a = Aggregator::new(AggregateThresholds {
            strength_at: 9.0,
            ..AggregateThresholds::default()
        });
        let summary = a.executive_summary(&scores([8.0, 8.0, 8.0, 8.0])).unwrap();
        assert!(summary.strengths.is_empty());
        assert_eq!(summary.priority_improvements.len(), 4);
    }
}
