//! Scoring constants, one table per analyzer.
//!
//! Every table deserializes with `#[serde(default)]`, so a config file only
//! needs to name the values it changes.

use serde::{Deserialize, Serialize};

/// Points from descending "at most" cuts: the first cut `value` fits under
/// earns `cuts.len() - index` points.
pub fn points_at_most(value: f64, cuts: &[f64]) -> f64 {
    cuts.iter()
        .position(|&cut| value <= cut)
        .map_or(0.0, |i| (cuts.len() - i) as f64)
}

/// Points from descending "at least" cuts: the first cut `value` reaches
/// earns `cuts.len() - index` points.
pub fn points_at_least(value: f64, cuts: &[f64]) -> f64 {
    cuts.iter()
        .position(|&cut| value >= cut)
        .map_or(0.0, |i| (cuts.len() - i) as f64)
}

/// Three-way quality bands (inclusive lower bounds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bands {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

impl Default for Bands {
    fn default() -> Self {
        Self {
            excellent: 8.0,
            good: 6.0,
            fair: 4.0,
        }
    }
}

/// Band a score falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Bands {
    pub fn classify(&self, score: f64) -> Band {
        if score >= self.excellent {
            Band::Excellent
        } else if score >= self.good {
            Band::Good
        } else if score >= self.fair {
            Band::Fair
        } else {
            Band::Poor
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadabilityThresholds {
    /// SMOG needs at least this many sentences
    pub smog_min_sentences: usize,

    // Score
    pub flesch_divisor: f64,
    pub target_grade: f64,
    pub grade_penalty: f64,
    pub density_penalty: f64,

    // Complexity level (density is a percentage)
    pub very_high_density: f64,
    pub very_high_jargon: usize,
    pub high_density: f64,
    pub high_jargon: usize,
    pub moderate_density: f64,
    pub moderate_jargon: usize,

    // Suggestions
    pub long_sentence_words: f64,
    pub wordy_sentence_words: f64,
    pub very_difficult_flesch: f64,
    pub difficult_flesch: f64,
    pub standard_flesch: f64,
    pub college_grade: f64,
    pub high_grade: f64,
    pub high_density_percent: f64,
    pub moderate_density_percent: f64,
    pub max_jargon: usize,
    pub max_syllables_per_word: f64,
}

impl Default for ReadabilityThresholds {
    fn default() -> Self {
        Self {
            smog_min_sentences: 3,
            flesch_divisor: 10.0,
            target_grade: 8.0,
            grade_penalty: 0.5,
            density_penalty: 0.3,
            very_high_density: 5.0,
            very_high_jargon: 20,
            high_density: 3.0,
            high_jargon: 10,
            moderate_density: 1.0,
            moderate_jargon: 5,
            long_sentence_words: 25.0,
            wordy_sentence_words: 20.0,
            very_difficult_flesch: 30.0,
            difficult_flesch: 50.0,
            standard_flesch: 60.0,
            college_grade: 12.0,
            high_grade: 10.0,
            high_density_percent: 5.0,
            moderate_density_percent: 3.0,
            max_jargon: 10,
            max_syllables_per_word: 1.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructureThresholds {
    // Heading hierarchy
    pub hierarchy_base: f64,
    pub h1_bonus: f64,
    pub gap_penalty: f64,
    pub min_good_levels: usize,
    pub max_good_levels: usize,
    pub level_spread_bonus: f64,
    pub too_many_levels_penalty: f64,

    // Paragraph buckets (word counts)
    pub short_paragraph_below: usize,
    pub medium_paragraph_max: usize,
    pub long_paragraph_max: usize,

    // Flow
    pub flow_base: f64,
    pub flow_neutral: f64,
    pub flow_max_levels: usize,
    pub flow_levels_penalty: f64,
    pub flow_max_jump: u8,
    pub flow_jump_penalty: f64,
    pub transition_bonus_above: usize,
    pub flow_bands: Bands,

    // Organization
    pub intro_window: usize,
    pub conclusion_window: usize,
    pub organization_base: f64,
    pub intro_bonus: f64,
    pub conclusion_bonus: f64,
    pub list_bonus: f64,
    pub some_headings: usize,
    pub some_headings_bonus: f64,
    pub many_headings: usize,
    pub many_headings_bonus: f64,

    // Paragraph score
    pub paragraph_base: f64,
    pub very_long_average: f64,
    pub very_long_average_penalty: f64,
    pub long_average: f64,
    pub long_average_penalty: f64,

    // Weights
    pub hierarchy_weight: f64,
    pub organization_weight: f64,
    pub paragraph_weight: f64,

    // Suggestions
    pub min_headings: usize,
    pub max_gap: u8,
    pub max_average_paragraph: f64,
    pub max_long_paragraph_ratio: f64,
}

impl Default for StructureThresholds {
    fn default() -> Self {
        Self {
            hierarchy_base: 5.0,
            h1_bonus: 2.0,
            gap_penalty: 1.5,
            min_good_levels: 2,
            max_good_levels: 4,
            level_spread_bonus: 2.0,
            too_many_levels_penalty: 1.0,
            short_paragraph_below: 20,
            medium_paragraph_max: 100,
            long_paragraph_max: 200,
            flow_base: 7.0,
            flow_neutral: 5.0,
            flow_max_levels: 4,
            flow_levels_penalty: 1.0,
            flow_max_jump: 2,
            flow_jump_penalty: 0.5,
            transition_bonus_above: 5,
            flow_bands: Bands::default(),
            intro_window: 3,
            conclusion_window: 3,
            organization_base: 5.0,
            intro_bonus: 1.5,
            conclusion_bonus: 1.5,
            list_bonus: 1.0,
            some_headings: 3,
            some_headings_bonus: 1.0,
            many_headings: 5,
            many_headings_bonus: 0.5,
            paragraph_base: 7.0,
            very_long_average: 150.0,
            very_long_average_penalty: 2.0,
            long_average: 100.0,
            long_average_penalty: 1.0,
            hierarchy_weight: 0.3,
            organization_weight: 0.3,
            paragraph_weight: 0.4,
            min_headings: 3,
            max_gap: 2,
            max_average_paragraph: 120.0,
            max_long_paragraph_ratio: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletenessThresholds {
    // Example quality
    pub mention_points: f64,
    pub many_mentions_above: usize,
    pub many_mentions_bonus: f64,
    pub code_points: f64,
    pub many_code_above: usize,
    pub many_code_bonus: f64,
    pub image_points: f64,
    pub variety_bonus: f64,
    pub full_variety_bonus: f64,

    // Instructions
    pub clear_steps_above: usize,
    pub instruction_base: f64,
    pub no_steps_penalty: f64,
    pub min_instruction_density: f64,
    pub low_density_penalty: f64,
    pub technical_density_above: f64,

    // Depth
    pub depth_cap: f64,
    pub explanation_cap: f64,
    pub prerequisite_points: f64,
    pub troubleshooting_points: f64,
    pub long_content_words: usize,
    pub long_content_points: f64,

    // Supporting materials
    pub support_base: f64,
    pub code_support: f64,
    pub commented_code_support: f64,
    pub image_support: f64,
    pub descriptive_image_support: f64,
    pub descriptive_alt_chars: usize,
    pub link_support: f64,
    pub external_link_support: f64,

    pub component_weight: f64,

    // Suggestions
    pub few_examples_below: usize,
    pub min_richness: f64,
    pub min_images: usize,
}

impl Default for CompletenessThresholds {
    fn default() -> Self {
        Self {
            mention_points: 2.0,
            many_mentions_above: 2,
            many_mentions_bonus: 1.0,
            code_points: 3.0,
            many_code_above: 2,
            many_code_bonus: 1.0,
            image_points: 2.0,
            variety_bonus: 1.0,
            full_variety_bonus: 1.0,
            clear_steps_above: 2,
            instruction_base: 7.0,
            no_steps_penalty: 2.0,
            min_instruction_density: 0.02,
            low_density_penalty: 1.0,
            technical_density_above: 0.01,
            depth_cap: 3.0,
            explanation_cap: 2.0,
            prerequisite_points: 2.0,
            troubleshooting_points: 2.0,
            long_content_words: 500,
            long_content_points: 1.0,
            support_base: 5.0,
            code_support: 1.5,
            commented_code_support: 0.5,
            image_support: 1.5,
            descriptive_image_support: 0.5,
            descriptive_alt_chars: 10,
            link_support: 1.0,
            external_link_support: 0.5,
            component_weight: 0.25,
            few_examples_below: 2,
            min_richness: 5.0,
            min_images: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleThresholds {
    /// Sentences of this many characters or fewer are discarded
    pub min_sentence_chars: usize,

    // Voice
    pub excellent_passive_below: f64,
    pub good_passive_below: f64,
    pub fair_passive_below: f64,
    pub excellent_voice: f64,
    pub good_voice: f64,
    pub fair_voice: f64,
    pub poor_voice: f64,

    // Formality
    pub very_formal_above: i64,
    pub formal_above: i64,
    pub neutral_above: i64,

    // Clarity bands
    pub sentence_length_cuts: Vec<f64>,
    pub complex_ratio_cuts: Vec<f64>,
    pub flesch_cuts: Vec<f64>,
    pub complex_sentence_clauses: usize,

    // Action bands
    pub action_density_cuts: Vec<f64>,
    pub imperative_ratio_cuts: Vec<f64>,
    /// Most points either action band can earn, however many cuts it has
    pub action_component_cap: f64,
    pub action_cap: f64,

    // Consistency
    pub consistency_base: f64,
    pub good_capitalization: f64,
    pub poor_capitalization: f64,
    pub capitalization_adjustment: f64,
    pub terminology_penalty: f64,

    // Weights
    pub voice_weight: f64,
    pub clarity_weight: f64,
    pub action_weight: f64,
    pub consistency_weight: f64,

    // Suggestions
    pub max_passive_ratio: f64,
    pub max_sentence_words: f64,
    pub max_complex_ratio: f64,
    pub max_filler_density: f64,
    pub min_imperative_ratio: f64,
    pub min_user_focus: f64,
}

impl Default for StyleThresholds {
    fn default() -> Self {
        Self {
            min_sentence_chars: 5,
            excellent_passive_below: 0.1,
            good_passive_below: 0.2,
            fair_passive_below: 0.3,
            excellent_voice: 10.0,
            good_voice: 8.0,
            fair_voice: 6.0,
            poor_voice: 4.0,
            very_formal_above: 5,
            formal_above: 0,
            neutral_above: -5,
            sentence_length_cuts: vec![20.0, 25.0, 30.0],
            complex_ratio_cuts: vec![0.1, 0.15, 0.2],
            flesch_cuts: vec![70.0, 60.0, 50.0, 40.0],
            complex_sentence_clauses: 2,
            action_density_cuts: vec![0.02, 0.015, 0.01, 0.005],
            imperative_ratio_cuts: vec![0.2, 0.15, 0.1, 0.05],
            action_component_cap: 4.0,
            action_cap: 10.0,
            consistency_base: 7.0,
            good_capitalization: 0.9,
            poor_capitalization: 0.7,
            capitalization_adjustment: 1.0,
            terminology_penalty: 0.5,
            voice_weight: 0.25,
            clarity_weight: 0.30,
            action_weight: 0.25,
            consistency_weight: 0.20,
            max_passive_ratio: 0.2,
            max_sentence_words: 25.0,
            max_complex_ratio: 0.15,
            max_filler_density: 0.03,
            min_imperative_ratio: 0.1,
            min_user_focus: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AggregateThresholds {
    /// Dimension scores at or above this are strengths
    pub strength_at: f64,
    /// Dimension scores below this are weaknesses
    pub weakness_below: f64,
    pub excellent_at: f64,
    pub good_at: f64,
    pub adequate_at: f64,
}

impl Default for AggregateThresholds {
    fn default() -> Self {
        Self {
            strength_at: 7.0,
            weakness_below: 6.0,
            excellent_at: 8.0,
            good_at: 7.0,
            adequate_at: 6.0,
        }
    }
}

/// All scoring constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Thresholds {
    pub readability: ReadabilityThresholds,
    pub structure: StructureThresholds,
    pub completeness: CompletenessThresholds,
    pub style: StyleThresholds,
    pub aggregate: AggregateThresholds,
    /// Bands for the one-sentence dimension summaries
    pub summary: Bands,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_at_most() {
        let cuts = [20.0, 25.0, 30.0];
        assert_eq!(points_at_most(0.0, &cuts), 3.0);
        assert_eq!(points_at_most(20.0, &cuts), 3.0);
        assert_eq!(points_at_most(22.0, &cuts), 2.0);
        assert_eq!(points_at_most(30.0, &cuts), 1.0);
        assert_eq!(points_at_most(31.0, &cuts), 0.0);
    }

    #[test]
    fn test_points_at_least() {
        let cuts = [70.0, 60.0, 50.0, 40.0];
        assert_eq!(points_at_least(85.0, &cuts), 4.0);
        assert_eq!(points_at_least(55.0, &cuts), 2.0);
        assert_eq!(points_at_least(40.0, &cuts), 1.0);
        assert_eq!(points_at_least(0.0, &cuts), 0.0);
    }

    #[test]
    fn test_bands_classify() {
        let bands = Bands::default();
        assert_eq!(bands.classify(8.0), Band::Excellent);
        assert_eq!(bands.classify(7.9), Band::Good);
        assert_eq!(bands.classify(4.0), Band::Fair);
        assert_eq!(bands.classify(3.9), Band::Poor);
    }

    #[test]
    fn test_partial_table_override() {
        let thresholds: Thresholds =
            serde_json::from_str(r#"{ "style": { "minSentenceChars": 10 } }"#).unwrap();
        assert_eq!(thresholds.style.min_sentence_chars, 10);
        assert_eq!(thresholds.style.consistency_base, 7.0);
        assert_eq!(thresholds.readability, ReadabilityThresholds::default());
    }
}
