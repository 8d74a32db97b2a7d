//! Report persistence under an output directory
//!
//! Layout:
//! - `<root>/analysis_results/analysis_<n>_<timestamp>.json`, one per page
//! - `<root>/reports/summary_report_<timestamp>.json` and `.md`, one per batch

use crate::analyzer::BatchStats;
use crate::reporter::MarkdownReporter;
use crate::OverallReport;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const RESULTS_DIR: &str = "analysis_results";
pub const REPORTS_DIR: &str = "reports";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Batch summary written next to the individual reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub total_documents: usize,
    pub processed_at: String,
    pub stats: BatchStats,
    pub results: Vec<OverallReport>,
}

/// Paths written by [`ReportStore::save_summary`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPaths {
    pub json: PathBuf,
    pub markdown: PathBuf,
}

pub struct ReportStore {
    root: PathBuf,
    timestamp: String,
}

impl ReportStore {
    /// Create the directory layout under `root`; the timestamp is fixed for the store's lifetime
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        for dir in [root.join(RESULTS_DIR), root.join(REPORTS_DIR)] {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            tracing::debug!("Ensured directory exists: {}", dir.display());
        }
        Ok(Self {
            root,
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        })
    }

    /// Override the file-name timestamp
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Save one page's report as `analysis_<index>_<timestamp>.json`
    pub fn save_report(&self, index: usize, report: &OverallReport) -> Result<PathBuf> {
        let path = self
            .root
            .join(RESULTS_DIR)
            .join(format!("analysis_{}_{}.json", index, self.timestamp));
        write_json(&path, report)?;
        tracing::info!("Saved analysis result: {}", path.display());
        Ok(path)
    }

    /// Save the batch summary as JSON plus a Markdown rendering
    pub fn save_summary(&self, reports: &[OverallReport]) -> Result<SummaryPaths> {
        let now = chrono::Local::now();
        let stats = BatchStats::from_reports(reports);
        let summary = SummaryReport {
            total_documents: reports.len(),
            processed_at: now.to_rfc3339(),
            stats: stats.clone(),
            results: reports.to_vec(),
        };

        let reports_dir = self.root.join(REPORTS_DIR);
        let json = reports_dir.join(format!("summary_report_{}.json", self.timestamp));
        write_json(&json, &summary)?;
        tracing::info!("Saved summary report: {}", json.display());

        let markdown = reports_dir.join(format!("summary_report_{}.md", self.timestamp));
        let content = MarkdownReporter::new().report_many(
            reports,
            &stats,
            &now.format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        fs::write(&markdown, content)
            .with_context(|| format!("Failed to write report: {}", markdown.display()))?;
        tracing::info!("Created markdown report: {}", markdown.display());

        Ok(SummaryPaths { json, markdown })
    }

    /// Saved per-page reports, sorted by file name
    pub fn list_saved(&self) -> Result<Vec<PathBuf>> {
        let dir = self.root.join(RESULTS_DIR);
        let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();
        Ok(paths)
    }
}

/// Load a previously saved report
pub fn load_report(path: &Path) -> Result<OverallReport> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid report: {}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    fs::write(path, content).with_context(|| format!("Failed to write report: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentFeatures, DocumentationAnalyzer};
    use tempfile::TempDir;

    fn report(title: &str) -> OverallReport {
        let features = DocumentFeatures {
            title: Some(title.to_string()),
            content: "Open Settings. Enter your API key and click Save.".to_string(),
            ..DocumentFeatures::default()
        };
        DocumentationAnalyzer::new().analyze(&features)
    }

    #[test]
    fn test_creates_layout() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path().join("out")).unwrap();
        assert!(store.root().join(RESULTS_DIR).is_dir());
        assert!(store.root().join(REPORTS_DIR).is_dir());
    }

    #[test]
    fn test_save_and_load_report() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path())
            .unwrap()
            .with_timestamp("20260101_120000");
        let original = report("Settings");

        let path = store.save_report(1, &original).unwrap();
        assert_eq!(
            path,
            dir.path().join(RESULTS_DIR).join("analysis_1_20260101_120000.json")
        );
        assert_eq!(load_report(&path).unwrap(), original);
        assert_eq!(store.list_saved().unwrap(), vec![path]);
    }

    #[test]
    fn test_save_summary() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path())
            .unwrap()
            .with_timestamp("20260101_120000");
        let reports = vec![report("One"), report("Two")];

        let paths = store.save_summary(&reports).unwrap();
        assert!(paths.json.ends_with("reports/summary_report_20260101_120000.json"));
        assert!(paths.markdown.ends_with("reports/summary_report_20260101_120000.md"));

        let summary: SummaryReport =
            serde_json::from_str(&fs::read_to_string(&paths.json).unwrap()).unwrap();
        assert_eq!(summary.total_documents, 2);
        assert_eq!(summary.results.len(), 2);
        assert_eq!(summary.stats.documents_analyzed, 2);

        let markdown = fs::read_to_string(&paths.markdown).unwrap();
        assert!(markdown.contains("## Document 2: Two"));
    }

    #[test]
    fn test_load_report_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let err = load_report(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid report"));
    }
}
