//! JSON reporter for machine-readable output

use crate::analyzer::BatchStats;
use crate::OverallReport;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let result = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        result.unwrap_or_else(|e| {
            tracing::error!("Failed to serialize report: {}", e);
            fallback.to_string()
        })
    }

    /// Report a single page as JSON
    pub fn report(&self, report: &OverallReport) -> String {
        self.to_json(report, "{}")
    }

    /// Report multiple pages as a JSON array
    pub fn report_many(&self, reports: &[OverallReport]) -> String {
        self.to_json(reports, "[]")
    }

    /// Report with batch summary
    pub fn report_with_summary(&self, reports: &[OverallReport], stats: &BatchStats) -> String {
        let output = JsonOutput {
            results: reports,
            summary: stats,
        };
        self.to_json(&output, "{}")
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [OverallReport],
    summary: &'a BatchStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentFeatures, DocumentationAnalyzer, Heading};

    fn make_report(title: &str) -> OverallReport {
        let features = DocumentFeatures {
            title: Some(title.to_string()),
            content: "Open the dashboard. Select a campaign to see its results.".to_string(),
            headings: vec![Heading::new(1, title)],
            ..DocumentFeatures::default()
        };
        DocumentationAnalyzer::new().analyze(&features)
    }

    #[test]
    fn test_json_single_report_has_expected_keys() {
        let json = JsonReporter::new().report(&make_report("Campaigns"));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["document"]["title"], "Campaigns");
        assert!(parsed.get("overallScore").is_some());
        assert!(parsed.get("executiveSummary").is_some());
        for key in ["readability", "structure", "completeness", "style"] {
            let dimension = &parsed[key];
            assert!(dimension.get("score").is_some(), "{} missing score", key);
            assert!(dimension.get("suggestions").is_some());
            assert!(dimension.get("llmCommentary").is_some());
            assert!(dimension.get("error").is_none());
        }
        assert!(parsed["readability"]["metrics"]["indices"]
            .get("fleschReadingEase")
            .is_some());
        assert!(parsed["structure"]["metrics"]["headings"]["distribution"]
            .get("h1")
            .is_some());
    }

    #[test]
    fn test_json_round_trips_into_report() {
        let report = make_report("Segments");
        let json = JsonReporter::new().report(&report);
        let parsed: OverallReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.overall_score, report.overall_score);
        assert_eq!(parsed.style.suggestions, report.style.suggestions);
    }

    #[test]
    fn test_json_failed_dimension_reads_back_without_metrics() {
        let features = DocumentFeatures {
            title: Some("Broken".to_string()),
            content: "Click Save.".to_string(),
            headings: vec![Heading::new(7, "Too deep")],
            ..DocumentFeatures::default()
        };
        let report = DocumentationAnalyzer::new().analyze(&features);
        let json = JsonReporter::new().pretty().report(&report);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["structure"].get("metrics").is_none());
        assert!(value["structure"]["error"].is_string());

        let parsed: OverallReport = serde_json::from_str(&json).unwrap();
        assert!(parsed.structure.metrics.is_none());
        assert!(parsed.readability.metrics.is_some());
        assert_eq!(parsed.structure.error, report.structure.error);
        assert_eq!(parsed.structure.score, 0.0);
        assert_eq!(parsed.overall_score, report.overall_score);
    }

    #[test]
    fn test_json_pretty_output() {
        let json = JsonReporter::new().pretty().report(&make_report("Campaigns"));
        assert!(json.contains('\n'), "pretty JSON should have newlines");
        assert!(json.contains("  "), "pretty JSON should have indentation");
    }

    #[test]
    fn test_json_report_with_summary() {
        let reports = vec![make_report("A"), make_report("B")];
        let stats = BatchStats::from_reports(&reports);
        let json = JsonReporter::new().report_with_summary(&reports, &stats);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["summary"]["documentsAnalyzed"], 2);
        let results = parsed["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1]["document"]["title"], "B");
    }

    #[test]
    fn test_json_report_many_empty() {
        let json = JsonReporter::new().report_many(&[]);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.as_array().unwrap().is_empty());
    }
}
