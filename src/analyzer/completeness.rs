//! Examples, instructions, depth of explanation and supporting materials

use super::{banded, compile_patterns, count_matches, patterns, DimensionAnalyzer};
use crate::config::thresholds::{Bands, CompletenessThresholds};
use crate::critique::prompts;
use crate::error::AnalyzerError;
use crate::text;
use crate::vocabulary::Vocabulary;
use crate::{CodeBlock, CodeKind, Dimension, DocumentFeatures, Image, Link, ListKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeExamples {
    pub total_code_blocks: usize,
    pub inline_code: usize,
    pub block_code: usize,
    pub has_code_examples: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualExamples {
    pub total_images: usize,
    pub images_with_alt: usize,
    pub has_visual_examples: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleAnalysis {
    pub example_mentions: usize,
    pub code_examples: CodeExamples,
    pub visual_examples: VisualExamples,
    pub example_quality: f64,
    pub has_practical_examples: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionAnalysis {
    pub instruction_word_count: usize,
    pub step_indicators: usize,
    pub has_clear_steps: bool,
    /// Ordered lists
    pub procedural_lists: usize,
    /// Instruction keywords per word
    pub instruction_density: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthAnalysis {
    pub depth_indicators: usize,
    pub explanations: usize,
    pub has_prerequisites: bool,
    pub has_troubleshooting: bool,
    pub information_richness: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSupport {
    pub has_code_examples: bool,
    /// Distinct languages (a block without one counts as "unknown")
    pub code_variety: usize,
    pub well_commented_code: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualSupport {
    pub has_images: bool,
    pub images_per_1000_words: f64,
    pub descriptive_images: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceSupport {
    pub total_links: usize,
    pub external_links: usize,
    pub internal_links: usize,
    pub has_references: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportAnalysis {
    pub code_support: CodeSupport,
    pub visual_support: VisualSupport,
    pub reference_support: ReferenceSupport,
    pub overall_support_quality: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessMetrics {
    pub examples: ExampleAnalysis,
    pub instructions: InstructionAnalysis,
    pub depth: DepthAnalysis,
    pub support: SupportAnalysis,
    pub instruction_score: f64,
}

pub struct CompletenessAnalyzer {
    thresholds: CompletenessThresholds,
    bands: Bands,
    example_phrases: Vec<String>,
    instruction_keywords: Vec<String>,
    depth_keywords: Vec<String>,
    prerequisite_keywords: Vec<String>,
    troubleshooting_keywords: Vec<String>,
    step_patterns: Result<Vec<Regex>, AnalyzerError>,
    explanation_patterns: Result<Vec<Regex>, AnalyzerError>,
    comment_patterns: Result<Vec<Regex>, AnalyzerError>,
}

impl CompletenessAnalyzer {
    pub fn new(thresholds: CompletenessThresholds, bands: Bands, vocabulary: &Vocabulary) -> Self {
        Self {
            thresholds,
            bands,
            example_phrases: vocabulary.example_phrases.clone(),
            instruction_keywords: vocabulary.instruction_keywords.clone(),
            depth_keywords: vocabulary.depth_keywords.clone(),
            prerequisite_keywords: vocabulary.prerequisite_keywords.clone(),
            troubleshooting_keywords: vocabulary.troubleshooting_keywords.clone(),
            step_patterns: compile_patterns(&vocabulary.step_patterns),
            explanation_patterns: compile_patterns(&vocabulary.explanation_patterns),
            comment_patterns: compile_patterns(&vocabulary.comment_patterns),
        }
    }

    fn analyze_examples(
        &self,
        lower: &str,
        code_blocks: &[CodeBlock],
        images: &[Image],
    ) -> ExampleAnalysis {
        let example_mentions = text::count_terms(lower, &self.example_phrases);
        let code_examples = CodeExamples {
            total_code_blocks: code_blocks.len(),
            inline_code: code_blocks
                .iter()
                .filter(|cb| cb.kind == CodeKind::Inline)
                .count(),
            block_code: code_blocks
                .iter()
                .filter(|cb| cb.kind == CodeKind::Block)
                .count(),
            has_code_examples: !code_blocks.is_empty(),
        };
        let visual_examples = VisualExamples {
            total_images: images.len(),
            images_with_alt: images.iter().filter(|img| !img.alt_text.is_empty()).count(),
            has_visual_examples: !images.is_empty(),
        };

        ExampleAnalysis {
            example_mentions,
            example_quality: self.example_quality(example_mentions, code_blocks.len(), images.len()),
            has_practical_examples: example_mentions > 0 || !code_blocks.is_empty(),
            code_examples,
            visual_examples,
        }
    }

    /// Points for text, code and visual examples plus a variety bonus, capped at 10
    pub fn example_quality(&self, mentions: usize, code_blocks: usize, images: usize) -> f64 {
        let t = &self.thresholds;
        let mut score = 0.0;
        if mentions > 0 {
            score += t.mention_points;
        }
        if mentions > t.many_mentions_above {
            score += t.many_mentions_bonus;
        }
        if code_blocks > 0 {
            score += t.code_points;
        }
        if code_blocks > t.many_code_above {
            score += t.many_code_bonus;
        }
        if images > 0 {
            score += t.image_points;
        }

        let variety = [mentions > 0, code_blocks > 0, images > 0]
            .iter()
            .filter(|&&present| present)
            .count();
        if variety >= 2 {
            score += t.variety_bonus;
        }
        if variety == 3 {
            score += t.full_variety_bonus;
        }
        f64::min(score, 10.0)
    }

    fn analyze_instructions(
        &self,
        lower: &str,
        words: usize,
        features: &DocumentFeatures,
        step_patterns: &[Regex],
    ) -> InstructionAnalysis {
        let instruction_word_count = text::count_terms(lower, &self.instruction_keywords);
        let step_indicators = count_matches(step_patterns, lower);

        InstructionAnalysis {
            instruction_word_count,
            step_indicators,
            has_clear_steps: step_indicators > self.thresholds.clear_steps_above,
            procedural_lists: features
                .lists
                .iter()
                .filter(|l| l.kind == ListKind::Ordered)
                .count(),
            instruction_density: text::ratio(instruction_word_count as f64, words as f64),
        }
    }

    fn analyze_depth(&self, lower: &str, words: usize, explanation_patterns: &[Regex]) -> DepthAnalysis {
        let t = &self.thresholds;
        let depth_indicators = text::count_terms(lower, &self.depth_keywords);
        let explanations = count_matches(explanation_patterns, lower);
        let prerequisites = text::count_terms(lower, &self.prerequisite_keywords);
        let troubleshooting = text::count_terms(lower, &self.troubleshooting_keywords);

        let information_richness = if words == 0 {
            0.0
        } else {
            let per_thousand = |count: usize| count as f64 / words as f64 * 1000.0;
            let mut score = per_thousand(depth_indicators).min(t.depth_cap)
                + per_thousand(explanations).min(t.explanation_cap);
            if prerequisites > 0 {
                score += t.prerequisite_points;
            }
            if troubleshooting > 0 {
                score += t.troubleshooting_points;
            }
            if words > t.long_content_words {
                score += t.long_content_points;
            }
            score.min(10.0)
        };

        DepthAnalysis {
            depth_indicators,
            explanations,
            has_prerequisites: prerequisites > 0,
            has_troubleshooting: troubleshooting > 0,
            information_richness,
        }
    }

    fn analyze_support(
        &self,
        words: usize,
        code_blocks: &[CodeBlock],
        images: &[Image],
        links: &[Link],
        comment_patterns: &[Regex],
    ) -> SupportAnalysis {
        let t = &self.thresholds;
        let languages: BTreeSet<&str> = code_blocks
            .iter()
            .map(|cb| cb.language.as_deref().unwrap_or("unknown"))
            .collect();
        let code_support = CodeSupport {
            has_code_examples: !code_blocks.is_empty(),
            code_variety: languages.len(),
            well_commented_code: code_blocks
                .iter()
                .any(|cb| comment_patterns.iter().any(|re| re.is_match(&cb.text))),
        };

        let visual_support = VisualSupport {
            has_images: !images.is_empty(),
            images_per_1000_words: text::round_to(
                text::ratio(images.len() as f64, words as f64) * 1000.0,
                2,
            ),
            descriptive_images: images
                .iter()
                .filter(|img| img.alt_text.chars().count() > t.descriptive_alt_chars)
                .count(),
        };

        let external_links = links.iter().filter(|l| l.is_external).count();
        let reference_support = ReferenceSupport {
            total_links: links.len(),
            external_links,
            internal_links: links.len() - external_links,
            has_references: !links.is_empty(),
        };

        let mut quality = t.support_base;
        if code_support.has_code_examples {
            quality += t.code_support;
        }
        if code_support.well_commented_code {
            quality += t.commented_code_support;
        }
        if visual_support.has_images {
            quality += t.image_support;
        }
        if visual_support.descriptive_images > 0 {
            quality += t.descriptive_image_support;
        }
        if reference_support.has_references {
            quality += t.link_support;
        }
        if reference_support.external_links > 0 {
            quality += t.external_link_support;
        }

        SupportAnalysis {
            code_support,
            visual_support,
            reference_support,
            overall_support_quality: quality.min(10.0),
        }
    }

    fn instruction_score(&self, instructions: &InstructionAnalysis) -> f64 {
        let t = &self.thresholds;
        let mut score = t.instruction_base;
        if !instructions.has_clear_steps {
            score -= t.no_steps_penalty;
        }
        if instructions.instruction_density < t.min_instruction_density {
            score -= t.low_density_penalty;
        }
        score
    }

    /// Whether the page reads as technical instructions
    pub fn seems_technical(&self, instructions: &InstructionAnalysis) -> bool {
        instructions.instruction_density > self.thresholds.technical_density_above
    }
}

impl DimensionAnalyzer for CompletenessAnalyzer {
    type Metrics = CompletenessMetrics;

    fn dimension(&self) -> Dimension {
        Dimension::Completeness
    }

    fn measure(&self, features: &DocumentFeatures) -> Result<CompletenessMetrics, AnalyzerError> {
        let step_patterns = patterns(&self.step_patterns)?;
        let explanation_patterns = patterns(&self.explanation_patterns)?;
        let comment_patterns = patterns(&self.comment_patterns)?;

        let lower = features.content.to_lowercase();
        let words = features.word_count();

        let examples = self.analyze_examples(&lower, &features.code_blocks, &features.images);
        let instructions = self.analyze_instructions(&lower, words, features, step_patterns);
        let depth = self.analyze_depth(&lower, words, explanation_patterns);
        let support = self.analyze_support(
            words,
            &features.code_blocks,
            &features.images,
            &features.links,
            comment_patterns,
        );
        let instruction_score = self.instruction_score(&instructions);

        Ok(CompletenessMetrics {
            examples,
            instructions,
            depth,
            support,
            instruction_score,
        })
    }

    fn score(&self, metrics: &CompletenessMetrics) -> f64 {
        let weight = self.thresholds.component_weight;
        let total = metrics.examples.example_quality * weight
            + metrics.instruction_score * weight
            + metrics.depth.information_richness * weight
            + metrics.support.overall_support_quality * weight;
        text::clamp_round(total, 0.0, 10.0, 1)
    }

    fn suggestions(&self, metrics: &CompletenessMetrics) -> Vec<String> {
        let t = &self.thresholds;
        let mut suggestions = Vec::new();

        if !metrics.examples.has_practical_examples {
            suggestions.push("Add practical examples to illustrate concepts and usage.".to_string());
        } else if metrics.examples.example_mentions < t.few_examples_below {
            suggestions
                .push("Include more diverse examples to cover different use cases.".to_string());
        }

        if !metrics.examples.code_examples.has_code_examples
            && self.seems_technical(&metrics.instructions)
        {
            suggestions.push("Add code examples to support technical instructions.".to_string());
        }

        if !metrics.instructions.has_clear_steps {
            suggestions
                .push("Provide clear step-by-step instructions for better guidance.".to_string());
        }
        if metrics.instructions.instruction_density < t.min_instruction_density {
            suggestions.push("Add more actionable instructions and clear next steps.".to_string());
        }

        if !metrics.depth.has_prerequisites {
            suggestions
                .push("Clearly state prerequisites and requirements before starting.".to_string());
        }
        if !metrics.depth.has_troubleshooting {
            suggestions
                .push("Add troubleshooting section for common issues and problems.".to_string());
        }
        if metrics.depth.information_richness < t.min_richness {
            suggestions.push(
                "Provide more detailed explanations and context for better understanding."
                    .to_string(),
            );
        }

        if metrics.examples.visual_examples.total_images < t.min_images {
            suggestions.push("Add screenshots or diagrams to support explanations.".to_string());
        }
        if !metrics.support.reference_support.has_references {
            suggestions.push("Include links to related documentation and resources.".to_string());
        }

        suggestions
    }

    fn summary(&self, score: f64) -> String {
        banded(
            &self.bands,
            score,
            [
                "Comprehensive documentation (score: {}). Contains sufficient detail and examples.",
                "Good completeness (score: {}) with some gaps to address.",
                "Moderate completeness (score: {}). Significant improvements needed.",
                "Incomplete documentation (score: {}). Major additions required.",
            ],
        )
        .replace("{}", &format!("{:.1}", score))
    }

    fn critique_prompt(&self, features: &DocumentFeatures) -> String {
        prompts::completeness(&features.content)
    }

    fn critique_fallback(&self) -> &'static str {
        "Unable to perform LLM-based completeness analysis due to API error"
    }
}
