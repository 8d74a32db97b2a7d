//! Docgrade: Documentation Quality Analyzer
//!
//! This library scores a scraped documentation page along four independent
//! dimensions (readability, structure, completeness, style) and aggregates
//! them into an overall report with an executive summary.

pub mod analyzer;
pub mod config;
pub mod critique;
pub mod error;
pub mod reporter;
pub mod store;
pub mod text;
pub mod vocabulary;

pub use analyzer::completeness::CompletenessMetrics;
pub use analyzer::readability::ReadabilityMetrics;
pub use analyzer::structure::StructureMetrics;
pub use analyzer::style::StyleMetrics;
pub use analyzer::DocumentationAnalyzer;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Structured representation of a scraped documentation page.
///
/// Produced by the scraping collaborator; every analyzer reads from the same
/// immutable record. Empty `content` is valid input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentFeatures {
    /// Source URL (informational only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Page title (informational only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// When the page was scraped (informational only)
    #[serde(alias = "scraped_at", skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<String>,
    /// Whitespace-normalized plain-text body
    pub content: String,
    /// Headings in document order
    pub headings: Vec<Heading>,
    /// Paragraphs in document order
    pub paragraphs: Vec<Paragraph>,
    /// Ordered and unordered lists
    pub lists: Vec<ListBlock>,
    /// Images
    pub images: Vec<Image>,
    /// Hyperlinks
    pub links: Vec<Link>,
    /// Inline and block code
    #[serde(alias = "code_blocks")]
    pub code_blocks: Vec<CodeBlock>,
}

impl DocumentFeatures {
    /// Features with only a plain-text body
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Whitespace-delimited word count of the body
    pub fn word_count(&self) -> usize {
        text::word_count(&self.content)
    }

    /// Parse a feature record from JSON (camelCase or snake_case keys)
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// A heading (h1-h6)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

impl Heading {
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// A paragraph of body text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub text: String,
    /// Word count reported by the scraper; derived from `text` when absent
    #[serde(default, alias = "word_count", skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let word_count = Some(text::word_count(&text));
        Self { text, word_count }
    }

    /// Reported word count, or the whitespace word count of `text`
    pub fn words(&self) -> usize {
        self.word_count
            .unwrap_or_else(|| text::word_count(&self.text))
    }
}

/// List flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// An HTML list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBlock {
    #[serde(alias = "type")]
    pub kind: ListKind,
    #[serde(default, alias = "item_count")]
    pub item_count: usize,
}

impl ListBlock {
    pub fn new(kind: ListKind, item_count: usize) -> Self {
        Self { kind, item_count }
    }
}

/// An image; `alt_text` may be empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default, alias = "alt", alias = "alt_text")]
    pub alt_text: String,
}

impl Image {
    pub fn new(alt_text: impl Into<String>) -> Self {
        Self {
            alt_text: alt_text.into(),
        }
    }
}

/// A hyperlink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(default, alias = "is_external")]
    pub is_external: bool,
}

impl Link {
    pub fn external() -> Self {
        Self { is_external: true }
    }

    pub fn internal() -> Self {
        Self { is_external: false }
    }
}

/// Code flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeKind {
    Inline,
    Block,
}

/// A code sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    #[serde(alias = "type")]
    pub kind: CodeKind,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl CodeBlock {
    pub fn block(text: impl Into<String>, language: Option<&str>) -> Self {
        Self {
            kind: CodeKind::Block,
            text: text.into(),
            language: language.map(str::to_string),
        }
    }

    pub fn inline(text: impl Into<String>) -> Self {
        Self {
            kind: CodeKind::Inline,
            text: text.into(),
            language: None,
        }
    }
}

/// One of the four scoring axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Readability,
    Structure,
    Completeness,
    Style,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Readability,
        Dimension::Structure,
        Dimension::Completeness,
        Dimension::Style,
    ];

    /// Capitalized display name
    pub fn title(&self) -> &'static str {
        match self {
            Dimension::Readability => "Readability",
            Dimension::Structure => "Structure",
            Dimension::Completeness => "Completeness",
            Dimension::Style => "Style",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Readability => write!(f, "readability"),
            Dimension::Structure => write!(f, "structure"),
            Dimension::Completeness => write!(f, "completeness"),
            Dimension::Style => write!(f, "style"),
        }
    }
}

/// Output of one dimension analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult<M> {
    /// Dimension score (0-10, one decimal)
    pub score: f64,
    /// Analyzer-specific metric breakdown; absent when the analyzer failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<M>,
    /// Raw text returned by the critique collaborator (or its fallback)
    pub llm_commentary: String,
    /// Improvement suggestions, in fixed check order
    pub suggestions: Vec<String>,
    /// One-sentence verdict
    pub summary: String,
    /// Failure message when the analyzer could not complete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<M> AnalysisResult<M> {
    /// Degraded result for an analyzer that failed internally
    pub fn failed(dimension: Dimension, error: impl std::fmt::Display) -> Self {
        Self {
            score: 0.0,
            metrics: None,
            llm_commentary: String::new(),
            suggestions: vec![format!(
                "Unable to analyze {} due to processing error",
                dimension
            )],
            summary: format!("{} analysis could not be completed.", dimension.title()),
            error: Some(error.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Executive summary across all dimensions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveSummary {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub priority_improvements: Vec<String>,
    pub recommendation: String,
}

/// Basic facts about the analyzed page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Feature record the page was read from, set by the CLI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<String>,
    pub word_count: usize,
    pub character_count: usize,
}

impl DocumentInfo {
    pub fn from_features(features: &DocumentFeatures) -> Self {
        Self {
            url: features.url.clone(),
            title: features.title.clone(),
            source: None,
            analyzed_at: features.scraped_at.clone(),
            word_count: features.word_count(),
            character_count: features.content.chars().count(),
        }
    }

    /// Title, then url, then source path
    pub fn label(&self) -> &str {
        self.title
            .as_deref()
            .or(self.url.as_deref())
            .or(self.source.as_deref())
            .unwrap_or("(untitled)")
    }
}

/// The final report for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallReport {
    pub document: DocumentInfo,
    pub readability: AnalysisResult<ReadabilityMetrics>,
    pub structure: AnalysisResult<StructureMetrics>,
    pub completeness: AnalysisResult<CompletenessMetrics>,
    pub style: AnalysisResult<StyleMetrics>,
    /// Mean of the dimension scores (0-10, one decimal)
    pub overall_score: f64,
    pub executive_summary: ExecutiveSummary,
}

impl OverallReport {
    /// Per-dimension scores in canonical order
    pub fn dimension_scores(&self) -> [(Dimension, f64); 4] {
        [
            (Dimension::Readability, self.readability.score),
            (Dimension::Structure, self.structure.score),
            (Dimension::Completeness, self.completeness.score),
            (Dimension::Style, self.style.score),
        ]
    }

    /// Suggestions of a single dimension
    pub fn suggestions_for(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Readability => &self.readability.suggestions,
            Dimension::Structure => &self.structure.suggestions,
            Dimension::Completeness => &self.completeness.suggestions,
            Dimension::Style => &self.style.suggestions,
        }
    }
}

/// Public API: analyze a single feature-record JSON file.
///
/// * `path` - feature record produced by the scraper
/// * `work_dir` - directory used for config lookup
/// * `config_path` - optional path to .docgraderc.json; if None, searches from work_dir
pub fn analyze_file(
    path: &std::path::Path,
    work_dir: &std::path::Path,
    config_path: Option<&std::path::Path>,
) -> anyhow::Result<OverallReport> {
    let config = crate::config::load_config(work_dir, config_path)?;
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read feature record: {}", path.display()))?;
    let features = DocumentFeatures::from_json(&json)
        .with_context(|| format!("Invalid feature record: {}", path.display()))?;
    let critic = crate::critique::from_config(&config.critique);
    let analyzer = DocumentationAnalyzer::from_config(&config, critic);
    Ok(analyzer.analyze(&features))
}
