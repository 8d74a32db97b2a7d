//! Heading hierarchy, paragraph shape and organizational signals

use super::{banded, DimensionAnalyzer};
use crate::config::thresholds::{Band, Bands, StructureThresholds};
use crate::critique::prompts;
use crate::error::AnalyzerError;
use crate::text;
use crate::vocabulary::Vocabulary;
use crate::{Dimension, DocumentFeatures, Heading, ListBlock, ListKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Two adjacent used heading levels more than one apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingGap {
    pub from: u8,
    pub to: u8,
}

impl HeadingGap {
    pub fn size(&self) -> u8 {
        self.to - self.from
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingAnalysis {
    pub total_headings: usize,
    /// Sorted distinct levels
    pub levels_used: Vec<u8>,
    pub hierarchy_score: f64,
    pub has_gaps: bool,
    pub max_gap: u8,
    pub gaps: Vec<HeadingGap>,
    /// Heading count per level, keyed `h1`..`h6`
    pub distribution: BTreeMap<String, usize>,
}

/// Paragraph counts per word-count bucket (buckets are disjoint)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthDistribution {
    pub short: usize,
    pub medium: usize,
    pub long: usize,
    pub very_long: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphAnalysis {
    pub total_paragraphs: usize,
    pub avg_length: f64,
    pub length_distribution: LengthDistribution,
    /// Paragraphs above the medium bucket (long and very long)
    pub long_paragraphs: usize,
    pub short_paragraphs: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowAnalysis {
    pub transition_word_count: usize,
    pub has_clear_steps: bool,
    pub heading_flow_score: f64,
    pub flow_quality: FlowQuality,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAnalysis {
    pub total_lists: usize,
    pub unordered_lists: usize,
    pub ordered_lists: usize,
    pub avg_items_per_list: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationAnalysis {
    pub total_content_blocks: usize,
    pub has_introduction: bool,
    pub has_conclusion: bool,
    pub list_analysis: ListAnalysis,
    pub organization_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureMetrics {
    pub headings: HeadingAnalysis,
    pub paragraphs: ParagraphAnalysis,
    pub flow: FlowAnalysis,
    pub organization: OrganizationAnalysis,
    pub paragraph_score: f64,
}

pub struct StructureAnalyzer {
    thresholds: StructureThresholds,
    bands: Bands,
    transition_words: Vec<String>,
    step_markers: Vec<String>,
    introduction_terms: Vec<String>,
    conclusion_terms: Vec<String>,
}

impl StructureAnalyzer {
    pub fn new(thresholds: StructureThresholds, bands: Bands, vocabulary: &Vocabulary) -> Self {
        Self {
            thresholds,
            bands,
            transition_words: vocabulary.transition_words.clone(),
            step_markers: vocabulary.step_markers.clone(),
            introduction_terms: vocabulary.introduction_terms.clone(),
            conclusion_terms: vocabulary.conclusion_terms.clone(),
        }
    }

    pub fn analyze_headings(&self, headings: &[Heading]) -> HeadingAnalysis {
        if headings.is_empty() {
            return HeadingAnalysis::default();
        }

        let levels: BTreeSet<u8> = headings.iter().map(|h| h.level).collect();
        let levels_used: Vec<u8> = levels.into_iter().collect();

        let gaps: Vec<HeadingGap> = levels_used
            .windows(2)
            .filter(|pair| pair[1] - pair[0] > 1)
            .map(|pair| HeadingGap {
                from: pair[0],
                to: pair[1],
            })
            .collect();
        let max_gap = gaps.iter().map(HeadingGap::size).max().unwrap_or(0);

        let mut distribution = BTreeMap::new();
        for heading in headings {
            *distribution.entry(format!("h{}", heading.level)).or_insert(0) += 1;
        }

        HeadingAnalysis {
            total_headings: headings.len(),
            hierarchy_score: self.hierarchy_score(&levels_used, gaps.len()),
            has_gaps: !gaps.is_empty(),
            max_gap,
            gaps,
            levels_used,
            distribution,
        }
    }

    fn hierarchy_score(&self, levels_used: &[u8], gap_count: usize) -> f64 {
        let t = &self.thresholds;
        let Some(&lowest) = levels_used.first() else {
            return 0.0;
        };

        let mut score = t.hierarchy_base;
        if lowest == 1 {
            score += t.h1_bonus;
        }
        score -= gap_count as f64 * t.gap_penalty;

        let distinct = levels_used.len();
        if (t.min_good_levels..=t.max_good_levels).contains(&distinct) {
            score += t.level_spread_bonus;
        } else if distinct > t.max_good_levels {
            score -= t.too_many_levels_penalty;
        }

        text::clamp_round(score, 0.0, 10.0, 1)
    }

    pub fn analyze_paragraphs(&self, word_counts: &[usize]) -> ParagraphAnalysis {
        if word_counts.is_empty() {
            return ParagraphAnalysis::default();
        }
        let t = &self.thresholds;

        let mut distribution = LengthDistribution::default();
        for &count in word_counts {
            if count < t.short_paragraph_below {
                distribution.short += 1;
            } else if count <= t.medium_paragraph_max {
                distribution.medium += 1;
            } else if count <= t.long_paragraph_max {
                distribution.long += 1;
            } else {
                distribution.very_long += 1;
            }
        }

        let total: usize = word_counts.iter().sum();
        ParagraphAnalysis {
            total_paragraphs: word_counts.len(),
            avg_length: text::round_to(total as f64 / word_counts.len() as f64, 1),
            long_paragraphs: distribution.long + distribution.very_long,
            short_paragraphs: distribution.short,
            length_distribution: distribution,
        }
    }

    pub fn analyze_flow(&self, content: &str, headings: &[Heading]) -> FlowAnalysis {
        let t = &self.thresholds;
        let lower = content.to_lowercase();
        let transition_word_count = text::count_terms(&lower, &self.transition_words);
        let has_clear_steps = self
            .step_markers
            .iter()
            .any(|marker| lower.contains(&marker.to_lowercase()));
        let heading_flow_score = self.heading_flow_score(headings);

        let mut flow = heading_flow_score;
        if transition_word_count > t.transition_bonus_above {
            flow += 1.0;
        }
        if has_clear_steps {
            flow += 1.0;
        }
        let flow_quality = match t.flow_bands.classify(flow.clamp(0.0, 10.0)) {
            Band::Excellent => FlowQuality::Excellent,
            Band::Good => FlowQuality::Good,
            Band::Fair => FlowQuality::Fair,
            Band::Poor => FlowQuality::Poor,
        };

        FlowAnalysis {
            transition_word_count,
            has_clear_steps,
            heading_flow_score,
            flow_quality,
        }
    }

    fn heading_flow_score(&self, headings: &[Heading]) -> f64 {
        let t = &self.thresholds;
        if headings.len() < 2 {
            return t.flow_neutral;
        }

        let mut score = t.flow_base;
        let distinct: BTreeSet<u8> = headings.iter().map(|h| h.level).collect();
        if distinct.len() > t.flow_max_levels {
            score -= t.flow_levels_penalty;
        }
        for pair in headings.windows(2) {
            if pair[0].level.abs_diff(pair[1].level) > t.flow_max_jump {
                score -= t.flow_jump_penalty;
            }
        }
        score.clamp(0.0, 10.0)
    }

    pub fn analyze_organization(
        &self,
        headings: &[Heading],
        lists: &[ListBlock],
        paragraph_count: usize,
    ) -> OrganizationAnalysis {
        let t = &self.thresholds;
        let has_introduction = mentions_any(
            headings.iter().take(t.intro_window),
            &self.introduction_terms,
        );
        let has_conclusion = mentions_any(
            headings
                .iter()
                .skip(headings.len().saturating_sub(t.conclusion_window)),
            &self.conclusion_terms,
        );

        let total_items: usize = lists.iter().map(|l| l.item_count).sum();
        let list_analysis = ListAnalysis {
            total_lists: lists.len(),
            unordered_lists: lists
                .iter()
                .filter(|l| l.kind == ListKind::Unordered)
                .count(),
            ordered_lists: lists.iter().filter(|l| l.kind == ListKind::Ordered).count(),
            avg_items_per_list: text::round_to(
                text::ratio(total_items as f64, lists.len() as f64),
                1,
            ),
        };

        let mut score = t.organization_base;
        if has_introduction {
            score += t.intro_bonus;
        }
        if has_conclusion {
            score += t.conclusion_bonus;
        }
        if !lists.is_empty() {
            score += t.list_bonus;
        }
        if headings.len() >= t.some_headings {
            score += t.some_headings_bonus;
        }
        if headings.len() >= t.many_headings {
            score += t.many_headings_bonus;
        }

        OrganizationAnalysis {
            total_content_blocks: headings.len() + lists.len() + paragraph_count,
            has_introduction,
            has_conclusion,
            list_analysis,
            organization_score: text::clamp_round(score, 0.0, 10.0, 1),
        }
    }

    fn paragraph_score(&self, avg_length: f64) -> f64 {
        let t = &self.thresholds;
        if avg_length > t.very_long_average {
            t.paragraph_base - t.very_long_average_penalty
        } else if avg_length > t.long_average {
            t.paragraph_base - t.long_average_penalty
        } else {
            t.paragraph_base
        }
    }
}

fn mentions_any<'a>(headings: impl Iterator<Item = &'a Heading>, terms: &[String]) -> bool {
    headings
        .map(|h| h.text.to_lowercase())
        .any(|heading| terms.iter().any(|term| heading.contains(&term.to_lowercase())))
}

/// Paragraph word counts, falling back to blank-line blocks of the body
fn paragraph_word_counts(features: &DocumentFeatures) -> Vec<usize> {
    if features.paragraphs.is_empty() {
        text::blocks(&features.content)
            .into_iter()
            .map(text::word_count)
            .collect()
    } else {
        features.paragraphs.iter().map(|p| p.words()).collect()
    }
}

impl DimensionAnalyzer for StructureAnalyzer {
    type Metrics = StructureMetrics;

    fn dimension(&self) -> Dimension {
        Dimension::Structure
    }

    fn measure(&self, features: &DocumentFeatures) -> Result<StructureMetrics, AnalyzerError> {
        if let Some(bad) = features.headings.iter().find(|h| !(1..=6).contains(&h.level)) {
            return Err(AnalyzerError::InvalidFeatures(format!(
                "heading level {} outside 1..=6 ('{}')",
                bad.level, bad.text
            )));
        }

        let word_counts = paragraph_word_counts(features);
        let headings = self.analyze_headings(&features.headings);
        let paragraphs = self.analyze_paragraphs(&word_counts);
        let flow = self.analyze_flow(&features.content, &features.headings);
        let organization = self.analyze_organization(
            &features.headings,
            &features.lists,
            paragraphs.total_paragraphs,
        );
        let paragraph_score = self.paragraph_score(paragraphs.avg_length);

        Ok(StructureMetrics {
            headings,
            paragraphs,
            flow,
            organization,
            paragraph_score,
        })
    }

    fn score(&self, metrics: &StructureMetrics) -> f64 {
        let t = &self.thresholds;
        let total = metrics.headings.hierarchy_score * t.hierarchy_weight
            + metrics.organization.organization_score * t.organization_weight
            + metrics.paragraph_score * t.paragraph_weight;
        text::clamp_round(total, 0.0, 10.0, 1)
    }

    fn suggestions(&self, metrics: &StructureMetrics) -> Vec<String> {
        let t = &self.thresholds;
        let mut suggestions = Vec::new();

        if metrics.headings.total_headings < t.min_headings {
            suggestions.push(
                "Add more headings to break up content and improve scannability.".to_string(),
            );
        }
        if metrics.headings.has_gaps {
            suggestions.push(
                "Fix heading hierarchy gaps (e.g., don't skip from H1 to H3 without H2)."
                    .to_string(),
            );
        }
        if metrics.headings.max_gap > t.max_gap {
            suggestions.push(
                "Maintain consistent heading hierarchy - avoid skipping multiple heading levels."
                    .to_string(),
            );
        }

        let avg_length = metrics.paragraphs.avg_length;
        if avg_length > t.max_average_paragraph {
            suggestions.push(format!(
                "Average paragraph length is {:.1} words. Break into shorter paragraphs (aim for 50-100 words).",
                avg_length
            ));
        }
        let long_ratio = text::ratio(
            metrics.paragraphs.long_paragraphs as f64,
            metrics.paragraphs.total_paragraphs as f64,
        );
        if long_ratio > t.max_long_paragraph_ratio {
            suggestions.push(
                "Many paragraphs are too long. Break them into focused, shorter paragraphs."
                    .to_string(),
            );
        }

        if !metrics.organization.has_introduction {
            suggestions.push("Add a clear introduction section to orient readers.".to_string());
        }
        if !metrics.organization.has_conclusion {
            suggestions.push("Consider adding a summary or conclusion section.".to_string());
        }
        if metrics.organization.list_analysis.total_lists == 0 {
            suggestions.push(
                "Use bullet points or numbered lists to break up text and improve readability."
                    .to_string(),
            );
        }

        suggestions
    }

    fn summary(&self, score: f64) -> String {
        banded(
            &self.bands,
            score,
            [
                "Excellent document structure (score: {}). Well-organized and easy to navigate.",
                "Good structure (score: {}) with some areas for improvement.",
                "Adequate structure (score: {}) but needs significant improvements.",
                "Poor structure (score: {}). Major reorganization needed.",
            ],
        )
        .replace("{}", &format!("{:.1}", score))
    }

    fn critique_prompt(&self, features: &DocumentFeatures) -> String {
        prompts::structure(&features.content, &features.headings)
    }

    fn critique_fallback(&self) -> &'static str {
        "Unable to perform LLM-based structure analysis due to API error"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Paragraph;

    fn analyzer() -> StructureAnalyzer {
        StructureAnalyzer::new(
            StructureThresholds::default(),
            Bands::default(),
            &Vocabulary::default(),
        )
    }

    fn headings(levels: &[(u8, &str)]) -> Vec<Heading> {
        levels.iter().map(|&(l, t)| Heading::new(l, t)).collect()
    }

    #[test]
    fn test_gaps_1_3_5() {
        let a = analyzer();
        let analysis = a.analyze_headings(&headings(&[(1, "A"), (3, "B"), (5, "C")]));
        assert_eq!(analysis.gaps.len(), 2);
        assert_eq!(analysis.gaps[0], HeadingGap { from: 1, to: 3 });
        assert_eq!(analysis.max_gap, 2);
        assert!(analysis.has_gaps);
        // 5 + 2 (h1) - 3 (two gaps) + 2 (three levels)
        assert_eq!(analysis.hierarchy_score, 6.0);
    }

    #[test]
    fn test_no_headings() {
        let a = analyzer();
        let analysis = a.analyze_headings(&[]);
        assert_eq!(analysis.total_headings, 0);
        assert_eq!(analysis.hierarchy_score, 0.0);
        assert!(!analysis.has_gaps);
        assert_eq!(analysis.max_gap, 0);
    }

    #[test]
    fn test_distribution() {
        let a = analyzer();
        let analysis = a.analyze_headings(&headings(&[(1, "A"), (2, "B"), (2, "C")]));
        assert_eq!(analysis.distribution.get("h1"), Some(&1));
        assert_eq!(analysis.distribution.get("h2"), Some(&2));
        assert_eq!(analysis.levels_used, vec![1, 2]);
    }

    #[test]
    fn test_introduction_bonus() {
        let a = analyzer();
        let hs = headings(&[(1, "Overview"), (2, "Setup"), (2, "Usage")]);
        let org = a.analyze_organization(&hs, &[], 0);
        assert!(org.has_introduction);
        assert!(!org.has_conclusion);
        // 5 + 1.5 (intro) + 1 (three headings)
        assert_eq!(org.organization_score, 7.5);
    }

    #[test]
    fn test_conclusion_only_in_last_three() {
        let a = analyzer();
        let hs = headings(&[
            (1, "Summary of features"),
            (2, "One"),
            (2, "Two"),
            (2, "Three"),
        ]);
        let org = a.analyze_organization(&hs, &[], 0);
        assert!(!org.has_conclusion);

        let hs = headings(&[(1, "Guide"), (2, "One"), (2, "What's next")]);
        assert!(a.analyze_organization(&hs, &[], 0).has_conclusion);
    }

    #[test]
    fn test_list_analysis() {
        let a = analyzer();
        let lists = vec![
            ListBlock::new(ListKind::Ordered, 4),
            ListBlock::new(ListKind::Unordered, 3),
        ];
        let org = a.analyze_organization(&[], &lists, 2);
        assert_eq!(org.list_analysis.ordered_lists, 1);
        assert_eq!(org.list_analysis.unordered_lists, 1);
        assert_eq!(org.list_analysis.avg_items_per_list, 3.5);
        assert_eq!(org.total_content_blocks, 4);
        assert_eq!(org.organization_score, 6.0);
    }

    #[test]
    fn test_paragraph_buckets_are_disjoint() {
        let a = analyzer();
        let analysis = a.analyze_paragraphs(&[10, 20, 100, 101, 200, 201]);
        assert_eq!(
            analysis.length_distribution,
            LengthDistribution {
                short: 1,
                medium: 2,
                long: 2,
                very_long: 1
            }
        );
        assert_eq!(analysis.long_paragraphs, 3);
    }

    #[test]
    fn test_paragraph_fallback_to_blocks() {
        let a = analyzer();
        let features = DocumentFeatures::from_content("one two three\n\nfour five");
        let metrics = a.measure(&features).unwrap();
        assert_eq!(metrics.paragraphs.total_paragraphs, 2);
        assert_eq!(metrics.paragraphs.avg_length, 2.5);
    }

    #[test]
    fn test_reported_word_counts_preferred() {
        let a = analyzer();
        let features = DocumentFeatures {
            paragraphs: vec![Paragraph {
                text: "short".to_string(),
                word_count: Some(150),
            }],
            ..DocumentFeatures::default()
        };
        let metrics = a.measure(&features).unwrap();
        assert_eq!(metrics.paragraphs.avg_length, 150.0);
        assert_eq!(metrics.paragraph_score, 6.0);
    }

    #[test]
    fn test_heading_flow() {
        let a = analyzer();
        assert_eq!(a.heading_flow_score(&headings(&[(1, "A")])), 5.0);
        assert_eq!(
            a.heading_flow_score(&headings(&[(1, "A"), (4, "B"), (1, "C")])),
            6.0
        );
        let flow = a.analyze_flow(
            "First install it. Then, configure it. Next, run it. Finally check. However fine. Therefore done. Step 1 is easy.",
            &headings(&[(1, "A"), (2, "B")]),
        );
        assert!(flow.transition_word_count > 5);
        assert!(flow.has_clear_steps);
        assert_eq!(flow.flow_quality, FlowQuality::Excellent);
    }

    #[test]
    fn test_empty_document() {
        let a = analyzer();
        let metrics = a.measure(&DocumentFeatures::default()).unwrap();
        assert_eq!(metrics.headings.total_headings, 0);
        // 0.3 * 0 + 0.3 * 5 + 0.4 * 7
        assert_eq!(a.score(&metrics), 4.3);
        let suggestions = a.suggestions(&metrics);
        assert_eq!(suggestions.len(), 4);
        assert!(suggestions[0].starts_with("Add more headings"));
        assert!(suggestions[3].starts_with("Use bullet points"));
    }

    #[test]
    fn test_invalid_heading_level() {
        let a = analyzer();
        let features = DocumentFeatures {
            headings: headings(&[(1, "Fine"), (9, "Broken")]),
            ..DocumentFeatures::default()
        };
        let err = a.measure(&features).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidFeatures(_)));
    }

    #[test]
    fn test_well_structured_page() {
        let a = analyzer();
        let features = DocumentFeatures {
            headings: headings(&[
                (1, "Introduction"),
                (2, "Install"),
                (2, "Configure"),
                (3, "Options"),
                (2, "Next steps"),
            ]),
            paragraphs: (0..5).map(|_| Paragraph::new("word ".repeat(60))).collect(),
            lists: vec![ListBlock::new(ListKind::Ordered, 5)],
            ..DocumentFeatures::default()
        };
        let metrics = a.measure(&features).unwrap();
        // hierarchy 9, organization 10, paragraphs 7
        assert_eq!(metrics.headings.hierarchy_score, 9.0);
        assert_eq!(metrics.organization.organization_score, 10.0);
        assert_eq!(a.score(&metrics), 8.5);
        assert!(a.suggestions(&metrics).is_empty());
        assert!(a.summary(8.5).starts_with("Excellent document structure"));
    }
}
