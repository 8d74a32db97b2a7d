//! Failure tiers of the scoring pipeline.
//!
//! A [`MetricError`] is absorbed where the metric is computed (the metric
//! defaults to 0). An [`AnalyzerError`] is absorbed at the analyzer boundary
//! (the dimension gets a failed result). An [`AggregationError`] is absorbed
//! by the aggregator (overall score 0.0, fallback recommendation). None of
//! them escape `DocumentationAnalyzer::analyze`.

use crate::Dimension;
use thiserror::Error;

/// A single readability index or ratio could not be computed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    #[error("text contains no words")]
    EmptyText,

    #[error("at least {required} sentences required, found {found}")]
    InsufficientSentences { required: usize, found: usize },

    #[error("{metric} produced a non-finite value")]
    NonFinite { metric: &'static str },
}

/// A dimension analyzer could not produce a result
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    #[error("metric computation failed: {0}")]
    Metric(#[from] MetricError),

    #[error("invalid document features: {0}")]
    InvalidFeatures(String),

    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("{dimension} analyzer panicked: {message}")]
    Panicked {
        dimension: Dimension,
        message: String,
    },
}

impl AnalyzerError {
    /// Build from the payload of a caught panic
    pub fn from_panic(dimension: Dimension, payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        AnalyzerError::Panicked { dimension, message }
    }
}

/// The overall score or executive summary could not be computed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregationError {
    #[error("{dimension} score is not a finite number")]
    NonFiniteScore { dimension: Dimension },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_payload_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("index out of bounds");
        let err = AnalyzerError::from_panic(Dimension::Style, payload);
        assert_eq!(
            err.to_string(),
            "style analyzer panicked: index out of bounds"
        );

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("boom"));
        let err = AnalyzerError::from_panic(Dimension::Structure, payload);
        assert!(matches!(err, AnalyzerError::Panicked { message, .. } if message == "boom"));
    }

    #[test]
    fn test_metric_error_converts() {
        let err: AnalyzerError = MetricError::EmptyText.into();
        assert_eq!(
            err.to_string(),
            "metric computation failed: text contains no words"
        );
    }
}
