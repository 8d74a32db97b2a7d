//! Console reporter with colored output

use crate::analyzer::BatchStats;
use crate::config::thresholds::{Band, Bands};
use crate::{Dimension, OverallReport};
use colored::Colorize;

/// Suggestions shown per dimension unless verbose
const SUGGESTIONS_SHOWN: usize = 3;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
    bands: Bands,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
            bands: Bands::default(),
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output: every suggestion, critique commentary and analyzer errors
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single page
    pub fn report(&self, report: &OverallReport) {
        print!("{}", self.render(report));
    }

    /// Report multiple pages with a batch summary
    pub fn report_many(&self, reports: &[OverallReport], stats: &BatchStats) {
        for report in reports {
            self.report(report);
            println!("{}", "─".repeat(60));
        }
        print!("{}", self.render_summary(stats));
    }

    /// Report in quiet mode (one line per page)
    pub fn report_quiet(&self, report: &OverallReport) {
        println!("{}", self.render_quiet(report));
    }

    pub fn render_quiet(&self, report: &OverallReport) -> String {
        format!(
            "{}: {} ({})",
            report.document.source.as_deref().unwrap_or(report.document.label()),
            self.colorize_score(report.overall_score, format!("{:.1}", report.overall_score)),
            report.executive_summary.recommendation
        )
    }

    pub fn render(&self, report: &OverallReport) -> String {
        let mut out = String::new();
        self.render_header(&mut out, report);
        self.render_scores(&mut out, report);
        self.render_summary_lists(&mut out, report);
        self.render_suggestions(&mut out, report);
        if self.verbose {
            self.render_commentary(&mut out, report);
        }
        out.push('\n');
        out
    }

    fn render_header(&self, out: &mut String, report: &OverallReport) {
        let doc = &report.document;
        out.push('\n');
        out.push_str(&format!(
            "{}\n",
            format!("📊 Documentation Quality Analysis: {}", doc.label()).bold()
        ));
        if let Some(ref url) = doc.url {
            out.push_str(&format!("   URL: {}\n", url));
        }
        if let Some(ref source) = doc.source {
            out.push_str(&format!("   Source: {}\n", source));
        }
        out.push_str(&format!(
            "   Words: {} | Characters: {}\n\n",
            doc.word_count, doc.character_count
        ));
    }

    fn render_scores(&self, out: &mut String, report: &OverallReport) {
        out.push_str(&format!(
            "   Overall: {} {}\n",
            self.create_score_bar(report.overall_score),
            report.executive_summary.recommendation.dimmed()
        ));
        out.push('\n');

        out.push_str(&format!("   {}\n", "Dimension Scores:".bold()));
        for (dimension, score) in report.dimension_scores() {
            let score_str = format!("{:>4.1}/10", score);
            out.push_str(&format!(
                "   {} {} {:<13} {}\n",
                self.create_mini_bar(score),
                self.colorize_score(score, score_str),
                dimension.title(),
                self.dimension_summary(report, dimension).dimmed()
            ));
        }
        out.push('\n');
    }

    fn dimension_summary<'a>(&self, report: &'a OverallReport, dimension: Dimension) -> &'a str {
        match dimension {
            Dimension::Readability => &report.readability.summary,
            Dimension::Structure => &report.structure.summary,
            Dimension::Completeness => &report.completeness.summary,
            Dimension::Style => &report.style.summary,
        }
    }

    fn dimension_error<'a>(&self, report: &'a OverallReport, dimension: Dimension) -> Option<&'a str> {
        match dimension {
            Dimension::Readability => report.readability.error.as_deref(),
            Dimension::Structure => report.structure.error.as_deref(),
            Dimension::Completeness => report.completeness.error.as_deref(),
            Dimension::Style => report.style.error.as_deref(),
        }
    }

    fn render_summary_lists(&self, out: &mut String, report: &OverallReport) {
        let summary = &report.executive_summary;
        if !summary.strengths.is_empty() {
            out.push_str(&format!("   {}\n", "Strengths:".bold()));
            for strength in &summary.strengths {
                out.push_str(&format!("   {} {}\n", "✓".green(), strength));
            }
        }
        if !summary.weaknesses.is_empty() {
            out.push_str(&format!("   {}\n", "Weaknesses:".bold()));
            for weakness in &summary.weaknesses {
                out.push_str(&format!("   {} {}\n", "✗".red(), weakness));
            }
        }
        if !summary.priority_improvements.is_empty() {
            out.push_str(&format!("   {}\n", "Priority Improvements:".bold()));
            for improvement in &summary.priority_improvements {
                out.push_str(&format!("   {} {}\n", "→".cyan(), improvement));
            }
        }
        out.push('\n');
    }

    fn render_suggestions(&self, out: &mut String, report: &OverallReport) {
        let any = Dimension::ALL
            .iter()
            .any(|d| !report.suggestions_for(*d).is_empty());
        if !any {
            return;
        }

        out.push_str(&format!("   {}\n", "Suggestions:".bold()));
        for dimension in Dimension::ALL {
            let suggestions = report.suggestions_for(dimension);
            if suggestions.is_empty() {
                continue;
            }
            out.push_str(&format!("   {}\n", dimension.title().underline()));
            if self.verbose {
                if let Some(error) = self.dimension_error(report, dimension) {
                    out.push_str(&format!("     {} {}\n", "✗".red(), error.red()));
                }
            }

            let shown = if self.verbose {
                suggestions.len()
            } else {
                suggestions.len().min(SUGGESTIONS_SHOWN)
            };
            for suggestion in &suggestions[..shown] {
                out.push_str(&format!("     {} {}\n", "ℹ".blue(), suggestion));
            }
            if shown < suggestions.len() {
                out.push_str(&format!(
                    "     {} {} more (use --verbose to show)\n",
                    "…".dimmed(),
                    suggestions.len() - shown
                ));
            }
        }
        out.push('\n');
    }

    fn render_commentary(&self, out: &mut String, report: &OverallReport) {
        let commentary = [
            (Dimension::Readability, &report.readability.llm_commentary),
            (Dimension::Structure, &report.structure.llm_commentary),
            (Dimension::Completeness, &report.completeness.llm_commentary),
            (Dimension::Style, &report.style.llm_commentary),
        ];
        if commentary.iter().all(|(_, text)| text.is_empty()) {
            return;
        }

        out.push_str(&format!("   {}\n", "Critique:".bold()));
        for (dimension, text) in commentary {
            if text.is_empty() {
                continue;
            }
            out.push_str(&format!("   {}\n", dimension.title().underline()));
            for line in text.lines() {
                out.push_str(&format!("     {}\n", line.italic()));
            }
        }
    }

    pub fn render_summary(&self, stats: &BatchStats) -> String {
        let mut out = String::new();
        out.push('\n');
        out.push_str(&format!("{}\n", "═".repeat(60)));
        out.push_str(&format!("{}\n", "Summary".bold()));
        out.push_str(&format!("{}\n", "═".repeat(60)));
        out.push_str(&format!(
            "   Documents analyzed: {}\n",
            stats.documents_analyzed.to_string().bold()
        ));
        out.push_str(&format!(
            "   Average score:      {}\n",
            self.colorize_score(stats.average_score, format!("{:.1}", stats.average_score))
        ));
        out.push_str(&format!(
            "   Range:              {:.1} - {:.1}\n",
            stats.lowest_score, stats.highest_score
        ));
        if stats.failed_dimensions > 0 {
            out.push_str(&format!(
                "   Failed analyzers:   {}\n",
                stats.failed_dimensions.to_string().red()
            ));
        }
        out.push('\n');
        out
    }

    fn colorize_score(&self, score: f64, text: String) -> String {
        if !self.use_colors {
            return text;
        }
        match self.bands.classify(score) {
            Band::Excellent => text.green().bold().to_string(),
            Band::Good => text.green().to_string(),
            Band::Fair => text.yellow().to_string(),
            Band::Poor => text.red().to_string(),
        }
    }

    fn create_score_bar(&self, score: f64) -> String {
        let filled = ((score.clamp(0.0, 10.0) * 2.0).round() as usize).min(20);
        let empty = 20 - filled;
        let bar = format!("[{}{}] {:>4.1}/10", "█".repeat(filled), "░".repeat(empty), score);
        self.colorize_score(score, bar)
    }

    fn create_mini_bar(&self, score: f64) -> String {
        let filled = (score.clamp(0.0, 10.0).round() as usize).min(10);
        let empty = 10 - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
