//! Classic readability formulas.
//!
//! Each index is computed independently from a shared [`TextStats`] so a
//! failure in one never affects the others.

use crate::error::MetricError;
use crate::text;

/// Counts every formula draws from
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextStats {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
    pub polysyllables: usize,
    pub letters: usize,
    /// Non-whitespace characters
    pub characters: usize,
}

impl TextStats {
    pub fn from_text(content: &str) -> Self {
        let lexicon = text::lexicon(content);
        Self {
            words: lexicon.len(),
            sentences: text::sentence_count(content),
            syllables: lexicon.iter().map(|w| text::count_syllables(w)).sum(),
            polysyllables: text::polysyllable_count(lexicon.iter().copied()),
            letters: text::letter_count(content),
            characters: content.chars().filter(|c| !c.is_whitespace()).count(),
        }
    }

    fn require_words(&self) -> Result<(), MetricError> {
        if self.words == 0 {
            Err(MetricError::EmptyText)
        } else {
            Ok(())
        }
    }

    /// Words per sentence; a text with words but no terminator is one sentence
    fn words_per_sentence(&self) -> f64 {
        self.words as f64 / self.sentences.max(1) as f64
    }

    fn syllables_per_word(&self) -> f64 {
        self.syllables as f64 / self.words as f64
    }
}

fn finite(metric: &'static str, value: f64) -> Result<f64, MetricError> {
    if value.is_finite() {
        Ok(text::round_to(value, 1))
    } else {
        Err(MetricError::NonFinite { metric })
    }
}

pub fn flesch_reading_ease(stats: &TextStats) -> Result<f64, MetricError> {
    stats.require_words()?;
    finite(
        "flesch_reading_ease",
        206.835 - 1.015 * stats.words_per_sentence() - 84.6 * stats.syllables_per_word(),
    )
}

pub fn flesch_kincaid_grade(stats: &TextStats) -> Result<f64, MetricError> {
    stats.require_words()?;
    finite(
        "flesch_kincaid_grade",
        0.39 * stats.words_per_sentence() + 11.8 * stats.syllables_per_word() - 15.59,
    )
}

pub fn gunning_fog(stats: &TextStats) -> Result<f64, MetricError> {
    stats.require_words()?;
    let complex_percent = 100.0 * stats.polysyllables as f64 / stats.words as f64;
    finite(
        "gunning_fog",
        0.4 * (stats.words_per_sentence() + complex_percent),
    )
}

pub fn coleman_liau(stats: &TextStats) -> Result<f64, MetricError> {
    stats.require_words()?;
    let letters_per_100 = 100.0 * stats.letters as f64 / stats.words as f64;
    let sentences_per_100 = 100.0 * stats.sentences.max(1) as f64 / stats.words as f64;
    finite(
        "coleman_liau",
        0.0588 * letters_per_100 - 0.296 * sentences_per_100 - 15.8,
    )
}

pub fn automated_readability(stats: &TextStats) -> Result<f64, MetricError> {
    stats.require_words()?;
    finite(
        "automated_readability",
        4.71 * stats.characters as f64 / stats.words as f64
            + 0.5 * stats.words_per_sentence()
            - 21.43,
    )
}

/// SMOG grade; undefined below `min_sentences` sentences
pub fn smog_index(stats: &TextStats, min_sentences: usize) -> Result<f64, MetricError> {
    stats.require_words()?;
    if stats.sentences < min_sentences {
        return Err(MetricError::InsufficientSentences {
            required: min_sentences,
            found: stats.sentences,
        });
    }
    let scaled = stats.polysyllables as f64 * 30.0 / stats.sentences as f64;
    finite("smog_index", 1.043 * scaled.sqrt() + 3.1291)
}

/// Value of a metric, or 0 with a warning when it cannot be computed
pub fn or_zero(metric: &str, result: Result<f64, MetricError>) -> f64 {
    match result {
        Ok(value) => value,
        Err(MetricError::EmptyText) => {
            tracing::debug!("{} skipped: text contains no words", metric);
            0.0
        }
        Err(e) => {
            tracing::warn!("Error calculating {}: {}", metric, e);
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = "The cat sat on the mat. The dog ran to the park. We had fun all day.";

    #[test]
    fn test_stats_simple_text() {
        let stats = TextStats::from_text(SIMPLE);
        assert_eq!(stats.words, 17);
        assert_eq!(stats.sentences, 3);
        assert_eq!(stats.syllables, 17);
        assert_eq!(stats.polysyllables, 0);
    }

    #[test]
    fn test_flesch_simple_text_is_easy() {
        let stats = TextStats::from_text(SIMPLE);
        let fre = flesch_reading_ease(&stats).unwrap();
        // 206.835 - 1.015 * (17/3) - 84.6 * 1.0
        assert!((fre - 116.5).abs() < 0.05, "got {}", fre);
        let grade = flesch_kincaid_grade(&stats).unwrap();
        assert!(grade < 0.0);
    }

    #[test]
    fn test_empty_text_errors() {
        let stats = TextStats::from_text("");
        assert_eq!(flesch_reading_ease(&stats), Err(MetricError::EmptyText));
        assert_eq!(gunning_fog(&stats), Err(MetricError::EmptyText));
        assert_eq!(or_zero("gunning_fog", gunning_fog(&stats)), 0.0);
    }

    #[test]
    fn test_smog_needs_three_sentences() {
        let stats = TextStats::from_text("One sentence only. And another one.");
        assert_eq!(
            smog_index(&stats, 3),
            Err(MetricError::InsufficientSentences {
                required: 3,
                found: 2
            })
        );
        let stats = TextStats::from_text(SIMPLE);
        let smog = smog_index(&stats, 3).unwrap();
        assert!((smog - 3.1).abs() < 0.05);
    }

    #[test]
    fn test_unterminated_text_counts_as_one_sentence() {
        let stats = TextStats::from_text("click the button");
        assert_eq!(stats.sentences, 1);
        assert!(flesch_reading_ease(&stats).is_ok());
        assert!(coleman_liau(&stats).is_ok());
        assert!(automated_readability(&stats).is_ok());
    }

    #[test]
    fn test_polysyllables_raise_fog() {
        let plain = TextStats::from_text("We go to the shop. We buy the milk.");
        let dense = TextStats::from_text(
            "Organizations standardize configuration. Administrators authenticate integrations.",
        );
        assert!(gunning_fog(&dense).unwrap() > gunning_fog(&plain).unwrap());
    }
}
