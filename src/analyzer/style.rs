//! Voice, clarity, action orientation and consistency of the writing

use super::indices::{self, TextStats};
use super::{banded, compile_patterns, patterns, DimensionAnalyzer};
use crate::config::thresholds::{points_at_least, points_at_most, Bands, StyleThresholds};
use crate::critique::prompts;
use crate::error::AnalyzerError;
use crate::text::{self, Sentence};
use crate::vocabulary::{TermVariants, Vocabulary};
use crate::{Dimension, DocumentFeatures};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceTypes {
    pub declarative: usize,
    pub interrogative: usize,
    pub imperative: usize,
    pub exclamatory: usize,
    pub declarative_ratio: f64,
    pub interrogative_ratio: f64,
    pub imperative_ratio: f64,
    pub exclamatory_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneIndicators {
    pub positive_indicators: usize,
    pub negative_indicators: usize,
    pub confident_indicators: usize,
    /// Positive minus negative indicators
    pub tone_balance: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormalityLevel {
    #[serde(rename = "Very Formal")]
    VeryFormal,
    Formal,
    Neutral,
    Informal,
}

impl std::fmt::Display for FormalityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormalityLevel::VeryFormal => write!(f, "Very Formal"),
            FormalityLevel::Formal => write!(f, "Formal"),
            FormalityLevel::Neutral => write!(f, "Neutral"),
            FormalityLevel::Informal => write!(f, "Informal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formality {
    pub formal_words: usize,
    pub informal_words: usize,
    pub contractions: usize,
    /// Formal words minus informal words and contractions
    pub formality_score: i64,
    pub formality_level: FormalityLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceQuality {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl std::fmt::Display for VoiceQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoiceQuality::Excellent => write!(f, "Excellent"),
            VoiceQuality::Good => write!(f, "Good"),
            VoiceQuality::Fair => write!(f, "Fair"),
            VoiceQuality::NeedsImprovement => write!(f, "Needs Improvement"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceAnalysis {
    pub total_sentences: usize,
    pub passive_voice_count: usize,
    pub passive_voice_ratio: f64,
    pub sentence_types: SentenceTypes,
    pub tone_indicators: ToneIndicators,
    pub formality: Formality,
    pub voice_quality: VoiceQuality,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillerWords {
    pub total_fillers: usize,
    pub filler_density: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceComplexity {
    pub avg_clauses: f64,
    pub complex_sentences: usize,
    pub complexity_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClarityAnalysis {
    /// Words per sentence
    pub avg_sentence_length: f64,
    /// Characters per word
    pub avg_word_length: f64,
    pub complex_words: usize,
    pub complex_word_ratio: f64,
    pub filler_words: FillerWords,
    pub sentence_complexity: SentenceComplexity,
    /// Flesch reading ease, 0 for empty content
    pub readability_score: f64,
    pub clarity_grade: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFocus {
    pub user_pronouns: usize,
    pub system_pronouns: usize,
    pub user_focus_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionAnalysis {
    pub action_verb_count: usize,
    pub imperative_sentences: usize,
    pub imperative_ratio: f64,
    pub user_focus: UserFocus,
    pub action_orientation: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capitalization {
    pub proper_sentence_caps: usize,
    pub total_sentences: usize,
    pub capitalization_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Punctuation {
    pub periods: usize,
    pub commas: usize,
    pub semicolons: usize,
    pub colons: usize,
    /// How many of the four marks appear at all
    pub punctuation_variety: usize,
}

/// A concept spelled more than one way
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminologyIssue {
    pub concept: String,
    pub variations_found: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Terminology {
    pub consistency_issues: Vec<TerminologyIssue>,
    pub issues_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formatting {
    pub single_quotes: usize,
    pub double_quotes: usize,
    pub bold_markers: usize,
    pub italic_markers: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyAnalysis {
    pub capitalization: Capitalization,
    pub punctuation: Punctuation,
    pub terminology: Terminology,
    pub formatting: Formatting,
    pub overall_consistency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleMetrics {
    pub voice: VoiceAnalysis,
    pub clarity: ClarityAnalysis,
    pub action: ActionAnalysis,
    pub consistency: ConsistencyAnalysis,
}

pub struct StyleAnalyzer {
    thresholds: StyleThresholds,
    bands: Bands,
    passive: Result<Vec<Regex>, AnalyzerError>,
    positive_words: Vec<String>,
    negative_words: Vec<String>,
    confident_words: Vec<String>,
    formal_words: Vec<String>,
    informal_words: Vec<String>,
    contractions: Vec<String>,
    filler_words: Vec<String>,
    clause_indicators: Vec<String>,
    action_verbs: Vec<String>,
    imperative_starters: Vec<String>,
    user_pronouns: Vec<String>,
    system_pronouns: Vec<String>,
    terminology_variants: Vec<TermVariants>,
}

impl StyleAnalyzer {
    pub fn new(thresholds: StyleThresholds, bands: Bands, vocabulary: &Vocabulary) -> Self {
        let lowered = |words: &[String]| -> Vec<String> {
            words.iter().map(|w| w.to_lowercase()).collect()
        };
        Self {
            thresholds,
            bands,
            passive: compile_patterns(&vocabulary.passive_patterns),
            positive_words: vocabulary.positive_words.clone(),
            negative_words: vocabulary.negative_words.clone(),
            confident_words: vocabulary.confident_words.clone(),
            formal_words: vocabulary.formal_words.clone(),
            informal_words: vocabulary.informal_words.clone(),
            contractions: vocabulary.contractions.clone(),
            filler_words: vocabulary.filler_words.clone(),
            clause_indicators: lowered(&vocabulary.clause_indicators),
            action_verbs: vocabulary.action_verbs.clone(),
            imperative_starters: lowered(&vocabulary.imperative_starters),
            user_pronouns: vocabulary.user_pronouns.clone(),
            system_pronouns: vocabulary.system_pronouns.clone(),
            terminology_variants: vocabulary.terminology_variants.clone(),
        }
    }

    /// Whether the sentence opens with a command verb
    pub fn is_imperative(&self, sentence: &str) -> bool {
        sentence
            .split_whitespace()
            .next()
            .map(str::to_lowercase)
            .is_some_and(|first| self.imperative_starters.contains(&first))
    }

    fn analyze_voice(&self, lower: &str, sentences: &[Sentence<'_>], passive: &[Regex]) -> VoiceAnalysis {
        let passive_voice_count = sentences
            .iter()
            .filter(|s| {
                let sentence = s.text.to_lowercase();
                passive.iter().any(|re| re.is_match(&sentence))
            })
            .count();
        let passive_ratio = text::ratio(passive_voice_count as f64, sentences.len() as f64);
        let tone_indicators = self.tone_indicators(lower);

        VoiceAnalysis {
            total_sentences: sentences.len(),
            passive_voice_count,
            passive_voice_ratio: text::round_to(passive_ratio, 3),
            sentence_types: self.sentence_types(sentences),
            formality: self.formality(lower),
            voice_quality: self.voice_quality(passive_ratio, tone_indicators.tone_balance),
            tone_indicators,
        }
    }

    fn sentence_types(&self, sentences: &[Sentence<'_>]) -> SentenceTypes {
        let mut types = SentenceTypes::default();
        for sentence in sentences {
            match sentence.terminator {
                Some('?') => types.interrogative += 1,
                Some('!') => types.exclamatory += 1,
                _ if self.is_imperative(sentence.text) => types.imperative += 1,
                _ => types.declarative += 1,
            }
        }

        let total = sentences.len() as f64;
        types.declarative_ratio = text::ratio(types.declarative as f64, total);
        types.interrogative_ratio = text::ratio(types.interrogative as f64, total);
        types.imperative_ratio = text::ratio(types.imperative as f64, total);
        types.exclamatory_ratio = text::ratio(types.exclamatory as f64, total);
        types
    }

    fn tone_indicators(&self, lower: &str) -> ToneIndicators {
        let positive = text::count_terms(lower, &self.positive_words);
        let negative = text::count_terms(lower, &self.negative_words);
        ToneIndicators {
            positive_indicators: positive,
            negative_indicators: negative,
            confident_indicators: text::count_terms(lower, &self.confident_words),
            tone_balance: positive as i64 - negative as i64,
        }
    }

    fn formality(&self, lower: &str) -> Formality {
        let t = &self.thresholds;
        let formal_words = text::count_terms(lower, &self.formal_words);
        let informal_words = text::count_terms(lower, &self.informal_words);
        let contractions = text::count_terms(lower, &self.contractions);
        let formality_score = formal_words as i64 - informal_words as i64 - contractions as i64;

        let formality_level = if formality_score > t.very_formal_above {
            FormalityLevel::VeryFormal
        } else if formality_score > t.formal_above {
            FormalityLevel::Formal
        } else if formality_score > t.neutral_above {
            FormalityLevel::Neutral
        } else {
            FormalityLevel::Informal
        };

        Formality {
            formal_words,
            informal_words,
            contractions,
            formality_score,
            formality_level,
        }
    }

    pub fn voice_quality(&self, passive_ratio: f64, tone_balance: i64) -> VoiceQuality {
        let t = &self.thresholds;
        if passive_ratio < t.excellent_passive_below && tone_balance > 0 {
            VoiceQuality::Excellent
        } else if passive_ratio < t.good_passive_below && tone_balance >= 0 {
            VoiceQuality::Good
        } else if passive_ratio < t.fair_passive_below {
            VoiceQuality::Fair
        } else {
            VoiceQuality::NeedsImprovement
        }
    }

    fn voice_points(&self, quality: VoiceQuality) -> f64 {
        let t = &self.thresholds;
        match quality {
            VoiceQuality::Excellent => t.excellent_voice,
            VoiceQuality::Good => t.good_voice,
            VoiceQuality::Fair => t.fair_voice,
            VoiceQuality::NeedsImprovement => t.poor_voice,
        }
    }

    fn analyze_clarity(&self, content: &str, lower: &str, sentences: &[Sentence<'_>]) -> ClarityAnalysis {
        let words = text::words(content);
        let word_total = words.len() as f64;

        let avg_sentence_length = text::ratio(word_total, sentences.len() as f64);
        let letters: usize = words.iter().map(|w| w.chars().count()).sum();
        let avg_word_length = text::ratio(letters as f64, word_total);
        let complex_words = text::polysyllable_count(words.iter().copied());
        let complex_word_ratio = text::ratio(complex_words as f64, word_total);

        let total_fillers = text::count_terms(lower, &self.filler_words);
        let filler_words = FillerWords {
            total_fillers,
            filler_density: text::ratio(total_fillers as f64, word_total),
        };

        let readability_score = indices::or_zero(
            "flesch_reading_ease",
            indices::flesch_reading_ease(&TextStats::from_text(content)),
        );

        ClarityAnalysis {
            avg_sentence_length: text::round_to(avg_sentence_length, 1),
            avg_word_length: text::round_to(avg_word_length, 1),
            complex_words,
            complex_word_ratio: text::round_to(complex_word_ratio, 3),
            filler_words,
            sentence_complexity: self.sentence_complexity(sentences),
            readability_score,
            clarity_grade: self.clarity_grade(avg_sentence_length, complex_word_ratio, readability_score),
        }
    }

    fn sentence_complexity(&self, sentences: &[Sentence<'_>]) -> SentenceComplexity {
        if sentences.is_empty() {
            return SentenceComplexity::default();
        }

        let clause_counts: Vec<usize> = sentences
            .iter()
            .map(|s| 1 + text::count_whole_words(&s.text.to_lowercase(), &self.clause_indicators))
            .collect();
        let total_clauses: usize = clause_counts.iter().sum();
        let complex_sentences = clause_counts
            .iter()
            .filter(|&&clauses| clauses > self.thresholds.complex_sentence_clauses)
            .count();
        let total = sentences.len() as f64;

        SentenceComplexity {
            avg_clauses: text::round_to(total_clauses as f64 / total, 1),
            complex_sentences,
            complexity_ratio: complex_sentences as f64 / total,
        }
    }

    /// Additive grade over sentence length, complex-word ratio and reading ease, capped at 10
    pub fn clarity_grade(&self, avg_sentence_length: f64, complex_word_ratio: f64, flesch: f64) -> f64 {
        let t = &self.thresholds;
        let grade = points_at_most(avg_sentence_length, &t.sentence_length_cuts)
            + points_at_most(complex_word_ratio, &t.complex_ratio_cuts)
            + points_at_least(flesch, &t.flesch_cuts);
        grade.min(10.0)
    }

    fn analyze_action(&self, content: &str, lower: &str, sentences: &[Sentence<'_>]) -> ActionAnalysis {
        let action_verb_count = text::count_terms(lower, &self.action_verbs);
        let imperative_sentences = sentences
            .iter()
            .filter(|s| self.is_imperative(s.text))
            .count();
        let imperative_ratio = text::ratio(imperative_sentences as f64, sentences.len() as f64);

        let user_pronouns = text::count_terms(lower, &self.user_pronouns);
        let system_pronouns = text::count_terms(lower, &self.system_pronouns);
        let user_focus = UserFocus {
            user_pronouns,
            system_pronouns,
            user_focus_ratio: text::ratio(
                user_pronouns as f64,
                (user_pronouns + system_pronouns) as f64,
            ),
        };

        ActionAnalysis {
            action_verb_count,
            imperative_sentences,
            imperative_ratio: text::round_to(imperative_ratio, 3),
            user_focus,
            action_orientation: self.action_orientation(
                action_verb_count,
                imperative_ratio,
                text::word_count(content),
            ),
        }
    }

    /// Grade over action-verb density and imperative ratio; 0 for an empty page
    pub fn action_orientation(&self, action_verbs: usize, imperative_ratio: f64, words: usize) -> f64 {
        if words == 0 {
            return 0.0;
        }
        let t = &self.thresholds;
        let density = action_verbs as f64 / words as f64;
        let grade = points_at_least(density, &t.action_density_cuts).min(t.action_component_cap)
            + points_at_least(imperative_ratio, &t.imperative_ratio_cuts)
                .min(t.action_component_cap);
        grade.min(t.action_cap)
    }

    fn analyze_consistency(&self, content: &str, lower: &str, sentences: &[Sentence<'_>]) -> ConsistencyAnalysis {
        let proper_sentence_caps = sentences
            .iter()
            .filter(|s| s.text.chars().next().is_some_and(char::is_uppercase))
            .count();
        let capitalization = Capitalization {
            proper_sentence_caps,
            total_sentences: sentences.len(),
            capitalization_rate: text::ratio(proper_sentence_caps as f64, sentences.len() as f64),
        };

        let count_char = |mark: char| content.chars().filter(|&c| c == mark).count();
        let marks = [count_char('.'), count_char(','), count_char(';'), count_char(':')];
        let punctuation = Punctuation {
            periods: marks[0],
            commas: marks[1],
            semicolons: marks[2],
            colons: marks[3],
            punctuation_variety: marks.iter().filter(|&&n| n > 0).count(),
        };

        let consistency_issues: Vec<TerminologyIssue> = self
            .terminology_variants
            .iter()
            .filter_map(|term| {
                let found: Vec<String> = term
                    .variants
                    .iter()
                    .filter(|v| lower.contains(v.to_lowercase().as_str()))
                    .cloned()
                    .collect();
                (found.len() > 1).then(|| TerminologyIssue {
                    concept: term.concept.clone(),
                    variations_found: found,
                })
            })
            .collect();
        let terminology = Terminology {
            issues_count: consistency_issues.len(),
            consistency_issues,
        };

        let formatting = Formatting {
            single_quotes: count_char('\''),
            double_quotes: count_char('"'),
            bold_markers: text::count_occurrences(content, "**"),
            italic_markers: count_char('*'),
        };

        let overall_consistency = self.consistency_score(&capitalization, &terminology);
        ConsistencyAnalysis {
            capitalization,
            punctuation,
            terminology,
            formatting,
            overall_consistency,
        }
    }

    fn consistency_score(&self, capitalization: &Capitalization, terminology: &Terminology) -> f64 {
        let t = &self.thresholds;
        let mut score = t.consistency_base;
        if capitalization.capitalization_rate >= t.good_capitalization {
            score += t.capitalization_adjustment;
        } else if capitalization.capitalization_rate < t.poor_capitalization {
            score -= t.capitalization_adjustment;
        }
        score -= terminology.issues_count as f64 * t.terminology_penalty;
        score.clamp(0.0, 10.0)
    }
}

impl DimensionAnalyzer for StyleAnalyzer {
    type Metrics = StyleMetrics;

    fn dimension(&self) -> Dimension {
        Dimension::Style
    }

    fn measure(&self, features: &DocumentFeatures) -> Result<StyleMetrics, AnalyzerError> {
        let passive = patterns(&self.passive)?;
        let content = features.content.as_str();
        let lower = content.to_lowercase();
        let sentences = text::split_sentences(content, self.thresholds.min_sentence_chars);

        Ok(StyleMetrics {
            voice: self.analyze_voice(&lower, &sentences, passive),
            clarity: self.analyze_clarity(content, &lower, &sentences),
            action: self.analyze_action(content, &lower, &sentences),
            consistency: self.analyze_consistency(content, &lower, &sentences),
        })
    }

    fn score(&self, metrics: &StyleMetrics) -> f64 {
        let t = &self.thresholds;
        let total = self.voice_points(metrics.voice.voice_quality) * t.voice_weight
            + metrics.clarity.clarity_grade * t.clarity_weight
            + metrics.action.action_orientation * t.action_weight
            + metrics.consistency.overall_consistency * t.consistency_weight;
        text::clamp_round(total, 0.0, 10.0, 1)
    }

    fn suggestions(&self, metrics: &StyleMetrics) -> Vec<String> {
        let t = &self.thresholds;
        let mut suggestions = Vec::new();

        let passive_ratio = metrics.voice.passive_voice_ratio;
        if passive_ratio > t.max_passive_ratio {
            suggestions.push(format!(
                "Reduce passive voice usage ({:.1}%). Use active voice for clearer instructions.",
                passive_ratio * 100.0
            ));
        }
        if metrics.voice.tone_indicators.tone_balance < 0 {
            suggestions.push(
                "Use more positive language to create a helpful, encouraging tone.".to_string(),
            );
        }

        let clarity = &metrics.clarity;
        if clarity.avg_sentence_length > t.max_sentence_words {
            suggestions.push(format!(
                "Shorten sentences (current average: {:.1} words). Aim for 15-20 words per sentence.",
                clarity.avg_sentence_length
            ));
        }
        if clarity.complex_word_ratio > t.max_complex_ratio {
            suggestions.push(
                "Simplify complex words to improve readability for broader audience.".to_string(),
            );
        }
        if clarity.filler_words.filler_density > t.max_filler_density {
            suggestions
                .push("Remove unnecessary filler words to make writing more concise.".to_string());
        }

        let action = &metrics.action;
        if action.imperative_ratio < t.min_imperative_ratio {
            suggestions.push(
                "Add more action-oriented language with clear imperatives (e.g., 'Click here', 'Enter your data')."
                    .to_string(),
            );
        }
        if action.user_focus.user_focus_ratio < t.min_user_focus {
            suggestions.push(
                "Use more user-focused language ('you', 'your') instead of system-focused language."
                    .to_string(),
            );
        }

        if metrics.consistency.terminology.issues_count > 0 {
            suggestions.push("Maintain consistent terminology throughout the document.".to_string());
        }

        suggestions
    }

    fn summary(&self, score: f64) -> String {
        banded(
            &self.bands,
            score,
            [
                "Excellent writing style (score: {}). Professional and clear communication.",
                "Good writing style (score: {}) with room for improvement.",
                "Adequate style (score: {}) but needs significant improvements.",
                "Poor writing style (score: {}). Major revisions needed.",
            ],
        )
        .replace("{}", &format!("{:.1}", score))
    }

    fn critique_prompt(&self, features: &DocumentFeatures) -> String {
        prompts::style(&features.content)
    }

    fn critique_fallback(&self) -> &'static str {
        "Unable to perform LLM-based style analysis due to API error"
    }
}
