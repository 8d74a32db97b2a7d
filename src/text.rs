//! Text primitives shared by the analyzers

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];
const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];
const WORD_TRIM: &[char] = &['.', ',', '!', '?', ';', ':', '"', '(', ')', '[', ']', '{', '}'];

/// Whitespace-delimited tokens
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Tokens containing at least one letter or digit (punctuation-only tokens are not words)
pub fn lexicon(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .collect()
}

/// A sentence and the punctuation mark that closed it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub text: &'a str,
    pub terminator: Option<char>,
}

/// Split on runs of `.`, `!`, `?`, keeping only trimmed sentences longer than `min_chars`.
///
/// The terminator is the first mark of the closing run; the final fragment
/// of unterminated text has none.
pub fn split_sentences(text: &str, min_chars: usize) -> Vec<Sentence<'_>> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !SENTENCE_TERMINATORS.contains(&c) {
            continue;
        }
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if SENTENCE_TERMINATORS.contains(&next) {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        keep_sentence(&mut sentences, &text[start..i], Some(c), min_chars);
        start = end;
    }
    keep_sentence(&mut sentences, &text[start..], None, min_chars);
    sentences
}

fn keep_sentence<'a>(
    out: &mut Vec<Sentence<'a>>,
    segment: &'a str,
    terminator: Option<char>,
    min_chars: usize,
) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() && trimmed.chars().count() > min_chars {
        out.push(Sentence {
            text: trimmed,
            terminator,
        });
    }
}

/// Number of sentences containing at least one word
pub fn sentence_count(text: &str) -> usize {
    split_sentences(text, 0)
        .iter()
        .filter(|s| s.text.chars().any(char::is_alphanumeric))
        .count()
}

/// Vowel-group syllable estimate with silent-e correction; every word has at least one
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let word = word.trim_matches(WORD_TRIM);
    if word.is_empty() {
        return 0;
    }

    let mut syllables = 0;
    let mut previous_was_vowel = false;
    for ch in word.chars() {
        let is_vowel = VOWELS.contains(&ch);
        if is_vowel && !previous_was_vowel {
            syllables += 1;
        }
        previous_was_vowel = is_vowel;
    }

    if word.ends_with('e') && syllables > 1 {
        syllables -= 1;
    }

    syllables.max(1)
}

/// Total syllables across the lexicon words of `text`
pub fn syllable_count(text: &str) -> usize {
    lexicon(text).iter().map(|w| count_syllables(w)).sum()
}

/// Words of three or more syllables
pub fn polysyllable_count<'a>(words: impl IntoIterator<Item = &'a str>) -> usize {
    words
        .into_iter()
        .filter(|w| count_syllables(w) >= 3)
        .count()
}

pub fn letter_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphabetic()).count()
}

/// Non-overlapping substring occurrences. Callers lowercase both sides.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Sum of substring occurrences of every term in an already-lowercased haystack
pub fn count_terms(haystack: &str, terms: &[String]) -> usize {
    terms
        .iter()
        .map(|term| count_occurrences(haystack, &term.to_lowercase()))
        .sum()
}

/// Whole-word hits of any term (terms must be single lowercase words)
pub fn count_whole_words(haystack: &str, terms: &[String]) -> usize {
    haystack
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|token| !token.is_empty() && terms.iter().any(|t| t == token))
        .count()
}

/// `numerator / denominator`, or 0 when the denominator is zero
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Clamp to [min, max] then round
pub fn clamp_round(value: f64, min: f64, max: f64, decimals: i32) -> f64 {
    round_to(value, decimals).clamp(min, max)
}

/// Prefix of at most `max_chars` characters, cut on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Blank-line separated blocks of `text`
pub fn blocks(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .collect()
}
