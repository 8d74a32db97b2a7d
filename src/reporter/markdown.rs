//! Markdown reporter for human-readable report files

use crate::analyzer::BatchStats;
use crate::{Dimension, OverallReport};
use std::fmt::Write;

/// Reporter for Markdown output
pub struct MarkdownReporter {
    /// Whether to list every dimension's suggestions
    include_suggestions: bool,
}

impl MarkdownReporter {
    pub fn new() -> Self {
        Self {
            include_suggestions: true,
        }
    }

    /// Scores and summary only
    pub fn without_suggestions(mut self) -> Self {
        self.include_suggestions = false;
        self
    }

    /// Report a single page
    pub fn report(&self, report: &OverallReport) -> String {
        let mut md = String::new();
        md.push_str("# Documentation Analysis Report\n\n");
        self.write_document(&mut md, report, None);
        md
    }

    /// Batch report with a header; `generated_at` is printed verbatim
    pub fn report_many(
        &self,
        reports: &[OverallReport],
        stats: &BatchStats,
        generated_at: &str,
    ) -> String {
        let mut md = String::new();
        md.push_str("# Documentation Analysis Report\n\n");
        let _ = writeln!(md, "**Generated:** {}", generated_at);
        let _ = writeln!(md, "**Total Documents Analyzed:** {}", stats.documents_analyzed);
        let _ = writeln!(md, "**Average Score:** {:.1}/10\n", stats.average_score);

        for (i, report) in reports.iter().enumerate() {
            self.write_document(&mut md, report, Some(i + 1));
            md.push_str("---\n\n");
        }
        md
    }

    fn write_document(&self, md: &mut String, report: &OverallReport, index: Option<usize>) {
        let doc = &report.document;
        match index {
            Some(i) => {
                let _ = writeln!(md, "## Document {}: {}\n", i, doc.label());
            }
            None => {
                let _ = writeln!(md, "## {}\n", doc.label());
            }
        }
        let _ = writeln!(md, "**URL:** {}", doc.url.as_deref().unwrap_or("N/A"));
        let _ = writeln!(md, "**Word Count:** {}", doc.word_count);
        let _ = writeln!(md, "**Overall Score:** {:.1}/10\n", report.overall_score);

        let summary = &report.executive_summary;
        md.push_str("### Summary\n");
        let _ = writeln!(md, "**Recommendation:** {}\n", summary.recommendation);
        write_list(md, "Strengths", &summary.strengths);
        write_list(md, "Weaknesses", &summary.weaknesses);
        write_list(md, "Priority Improvements", &summary.priority_improvements);

        md.push_str("### Detailed Scores\n");
        for (dimension, score) in report.dimension_scores() {
            let _ = writeln!(md, "- **{}:** {:.1}/10", dimension.title(), score);
        }
        md.push('\n');

        if self.include_suggestions {
            self.write_suggestions(md, report);
        }
    }

    fn write_suggestions(&self, md: &mut String, report: &OverallReport) {
        if Dimension::ALL
            .iter()
            .all(|d| report.suggestions_for(*d).is_empty())
        {
            return;
        }
        md.push_str("### Suggestions\n");
        for dimension in Dimension::ALL {
            let suggestions = report.suggestions_for(dimension);
            if suggestions.is_empty() {
                continue;
            }
            let _ = writeln!(md, "**{}:**", dimension.title());
            for suggestion in suggestions {
                let _ = writeln!(md, "- {}", suggestion);
            }
            md.push('\n');
        }
    }
}

fn write_list(md: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(md, "**{}:**", heading);
    for item in items {
        let _ = writeln!(md, "- {}", item);
    }
    md.push('\n');
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}
