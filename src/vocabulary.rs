//! Word lists and pattern tables used by the analyzers.
//!
//! Each concern has one named table. [`Vocabulary`] bundles owned copies so a
//! config file can replace any single list without touching the others.

use serde::{Deserialize, Serialize};

pub const TECHNICAL_TERMS: &[&str] = &[
    "api", "sdk", "json", "xml", "html", "css", "javascript", "integration", "endpoint",
    "authentication", "authorization", "webhook", "callback", "parameter", "payload", "request",
    "response", "configuration", "implementation", "deployment", "initialization",
    "instantiation",
];

/// Acronyms, `obj.method()` calls, `path/like` tokens, `{placeholder}` braces
pub const JARGON_PATTERNS: &[&str] = &[
    r"\b[A-Z]{2,}\b",
    r"\b\w+\.\w+\(\)",
    r"\b\w+/\w+",
    r"\{[^}]+\}",
];

pub const TRANSITION_WORDS: &[&str] = &[
    "first", "second", "third", "next", "then", "finally", "lastly", "however", "therefore",
    "furthermore", "moreover", "additionally", "in contrast", "on the other hand", "as a result",
    "consequently",
];

pub const STEP_MARKERS: &[&str] = &[
    "step 1", "step 2", "1.", "2.", "3.", "first step", "next step",
];

pub const INTRODUCTION_TERMS: &[&str] = &["introduction", "overview", "getting started", "about"];

pub const CONCLUSION_TERMS: &[&str] = &["conclusion", "summary", "next steps", "what's next"];

pub const EXAMPLE_PHRASES: &[&str] = &[
    "example", "for example", "for instance", "such as", "like this", "sample", "demonstration",
    "illustration", "case study",
];

pub const INSTRUCTION_KEYWORDS: &[&str] = &[
    "step", "click", "select", "choose", "enter", "type", "navigate", "open", "close", "save",
    "create", "delete", "configure", "set up",
];

pub const STEP_PATTERNS: &[&str] = &[
    r"step \d+",
    r"\d+\.",
    r"first[,\s]",
    r"second[,\s]",
    r"third[,\s]",
    r"then[,\s]",
    r"next[,\s]",
    r"finally[,\s]",
    r"lastly[,\s]",
];

pub const DEPTH_KEYWORDS: &[&str] = &[
    "why", "how", "what", "when", "where", "because", "reason", "purpose", "benefit",
    "advantage", "important", "note", "warning", "tip", "remember", "consider", "alternatively",
    "option",
];

pub const EXPLANATION_PATTERNS: &[&str] = &[
    r"this is because",
    r"the reason",
    r"in order to",
    r"so that",
    r"this means",
    r"in other words",
    r"specifically",
    r"particularly",
];

pub const PREREQUISITE_KEYWORDS: &[&str] = &[
    "prerequisite", "requirement", "before", "first", "ensure", "make sure",
];

pub const TROUBLESHOOTING_KEYWORDS: &[&str] = &[
    "troubleshoot", "problem", "issue", "error", "fail", "not working", "common issues",
    "frequently asked", "faq",
];

/// Line comments, block comments, shell comments, HTML comments
pub const COMMENT_PATTERNS: &[&str] = &[r"//.*", r"/\*.*\*/", r"#.*", r"<!--.*-->"];

pub const PASSIVE_PATTERNS: &[&str] = &[
    r"\b(is|are|was|were|been|being)\s+\w*ed\b",
    r"\b(is|are|was|were|been|being)\s+\w*en\b",
    r"\b(get|gets|got|getting)\s+\w*ed\b",
];

pub const POSITIVE_WORDS: &[&str] = &[
    "easy", "simple", "quick", "efficient", "helpful", "useful", "convenient", "smooth",
    "seamless", "intuitive", "powerful",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "difficult", "complex", "complicated", "hard", "challenging", "confusing", "problem", "issue",
    "error", "fail", "wrong",
];

pub const CONFIDENT_WORDS: &[&str] = &[
    "will", "must", "should", "ensure", "guarantee", "definitely", "certainly", "always", "never",
    "exactly",
];

pub const FORMAL_WORDS: &[&str] = &[
    "utilize", "commence", "terminate", "subsequently", "furthermore", "nevertheless",
    "therefore", "consequently", "accordingly",
];

pub const INFORMAL_WORDS: &[&str] = &[
    "use", "start", "end", "then", "also", "but", "so", "okay", "ok", "yeah", "yep", "nope",
    "gonna", "wanna",
];

pub const CONTRACTIONS: &[&str] = &[
    "don't", "can't", "won't", "isn't", "aren't", "wasn't", "weren't", "haven't", "hasn't",
    "hadn't", "couldn't", "wouldn't", "shouldn't",
];

pub const FILLER_WORDS: &[&str] = &[
    "very", "really", "quite", "rather", "somewhat", "fairly", "pretty", "just", "only",
    "simply", "actually", "basically", "literally", "obviously", "clearly", "certainly",
    "definitely",
];

pub const CLAUSE_INDICATORS: &[&str] = &[
    "and", "but", "or", "because", "since", "when", "where", "while", "although", "though", "if",
    "unless", "that", "which", "who",
];

pub const ACTION_VERBS: &[&str] = &[
    "click", "select", "choose", "enter", "type", "navigate", "go", "open", "close", "save",
    "create", "add", "remove", "delete", "configure", "set", "enable", "disable", "start", "stop",
    "install", "download", "upload", "copy", "paste", "edit",
];

pub const IMPERATIVE_STARTERS: &[&str] = &[
    "click", "select", "choose", "enter", "type", "navigate", "go", "open", "close", "save",
    "create", "add", "remove", "delete", "configure", "set", "enable", "disable", "make",
    "ensure", "check", "verify", "confirm", "install", "download",
];

pub const USER_PRONOUNS: &[&str] = &["you", "your", "yours"];

pub const SYSTEM_PRONOUNS: &[&str] = &["we", "our", "us", "the system", "the application"];

/// (concept, spellings) pairs; two spellings of one concept in a page is an inconsistency
pub const TERMINOLOGY_VARIANTS: &[(&str, &[&str])] = &[
    ("email", &["email", "e-mail"]),
    ("website", &["website", "web site"]),
    ("login", &["login", "log in", "log-in"]),
    ("setup", &["setup", "set up", "set-up"]),
];

/// Spellings that refer to the same concept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermVariants {
    pub concept: String,
    pub variants: Vec<String>,
}

/// All word lists, owned so individual lists can be overridden from config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vocabulary {
    pub technical_terms: Vec<String>,
    pub jargon_patterns: Vec<String>,
    pub transition_words: Vec<String>,
    pub step_markers: Vec<String>,
    pub introduction_terms: Vec<String>,
    pub conclusion_terms: Vec<String>,
    pub example_phrases: Vec<String>,
    pub instruction_keywords: Vec<String>,
    pub step_patterns: Vec<String>,
    pub depth_keywords: Vec<String>,
    pub explanation_patterns: Vec<String>,
    pub prerequisite_keywords: Vec<String>,
    pub troubleshooting_keywords: Vec<String>,
    pub comment_patterns: Vec<String>,
    pub passive_patterns: Vec<String>,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    pub confident_words: Vec<String>,
    pub formal_words: Vec<String>,
    pub informal_words: Vec<String>,
    pub contractions: Vec<String>,
    pub filler_words: Vec<String>,
    pub clause_indicators: Vec<String>,
    pub action_verbs: Vec<String>,
    pub imperative_starters: Vec<String>,
    pub user_pronouns: Vec<String>,
    pub system_pronouns: Vec<String>,
    pub terminology_variants: Vec<TermVariants>,
}

fn owned(table: &[&str]) -> Vec<String> {
    table.iter().map(|s| s.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            technical_terms: owned(TECHNICAL_TERMS),
            jargon_patterns: owned(JARGON_PATTERNS),
            transition_words: owned(TRANSITION_WORDS),
            step_markers: owned(STEP_MARKERS),
            introduction_terms: owned(INTRODUCTION_TERMS),
            conclusion_terms: owned(CONCLUSION_TERMS),
            example_phrases: owned(EXAMPLE_PHRASES),
            instruction_keywords: owned(INSTRUCTION_KEYWORDS),
            step_patterns: owned(STEP_PATTERNS),
            depth_keywords: owned(DEPTH_KEYWORDS),
            explanation_patterns: owned(EXPLANATION_PATTERNS),
            prerequisite_keywords: owned(PREREQUISITE_KEYWORDS),
            troubleshooting_keywords: owned(TROUBLESHOOTING_KEYWORDS),
            comment_patterns: owned(COMMENT_PATTERNS),
            passive_patterns: owned(PASSIVE_PATTERNS),
            positive_words: owned(POSITIVE_WORDS),
            negative_words: owned(NEGATIVE_WORDS),
            confident_words: owned(CONFIDENT_WORDS),
            formal_words: owned(FORMAL_WORDS),
            informal_words: owned(INFORMAL_WORDS),
            contractions: owned(CONTRACTIONS),
            filler_words: owned(FILLER_WORDS),
            clause_indicators: owned(CLAUSE_INDICATORS),
            action_verbs: owned(ACTION_VERBS),
            imperative_starters: owned(IMPERATIVE_STARTERS),
            user_pronouns: owned(USER_PRONOUNS),
            system_pronouns: owned(SYSTEM_PRONOUNS),
            terminology_variants: TERMINOLOGY_VARIANTS
                .iter()
                .map(|(concept, variants)| TermVariants {
                    concept: concept.to_string(),
                    variants: owned(variants),
                })
                .collect(),
        }
    }
}
