//! Prompt builders, one per dimension

use crate::text::truncate_chars;
use crate::Heading;

/// Characters of page content included in a prompt
pub const CONTENT_PREVIEW_CHARS: usize = 2000;
/// Shorter preview for the structure prompt, which also carries the outline
pub const STRUCTURE_PREVIEW_CHARS: usize = 1500;
/// Headings included in the structure outline
pub const OUTLINE_HEADINGS: usize = 10;

pub fn readability(content: &str) -> String {
    format!(
        "Review this documentation from the point of view of a marketer with no technical background.

Content: {}...

Assess:
1. How much of it can a non-technical reader follow?
2. Are technical concepts explained in business terms?
3. Which jargon would confuse a marketer?
4. Are business benefits and use cases made clear?
5. Does the tone suit a marketing audience?

Give concrete examples and improvements. Keep the answer short and actionable.",
        truncate_chars(content, CONTENT_PREVIEW_CHARS)
    )
}

/// Indented `H<level>: text` lines for the first headings
pub fn outline(headings: &[Heading]) -> String {
    headings
        .iter()
        .take(OUTLINE_HEADINGS)
        .map(|h| {
            let indent = "  ".repeat(usize::from(h.level.saturating_sub(1)));
            format!("{}H{}: {}\n", indent, h.level, h.text)
        })
        .collect()
}

pub fn structure(content: &str, headings: &[Heading]) -> String {
    format!(
        "Review the structure and flow of this documentation.

Heading outline:
{}
Content preview: {}...

Assess:
1. Is the page organized into clear sections?
2. Does it move from general to specific?
3. Do the headings describe their sections and help navigation?
4. Can a reader scan it and find what they need?
5. Are the transitions between sections clear?

Suggest specific structural changes. Keep the answer short and actionable.",
        outline(headings),
        truncate_chars(content, STRUCTURE_PREVIEW_CHARS)
    )
}

pub fn completeness(content: &str) -> String {
    format!(
        "Review this documentation for completeness.

Content: {}...

Assess:
1. Is there enough detail for a user to succeed with the feature?
2. Do the examples cover different use cases?
3. Are edge cases and likely problems addressed?
4. Is it clear what to do next?
5. Are prerequisites and dependencies stated?
6. What important information is missing?

Name the gaps and what content would close them. Keep the answer short and actionable.",
        truncate_chars(content, CONTENT_PREVIEW_CHARS)
    )
}

pub fn style(content: &str) -> String {
    format!(
        "Review the writing style of this documentation against the Microsoft Style Guide.

Content: {}...

Assess:
1. Voice and tone: customer-focused, clear, professional?
2. Clarity: are sentences concise and easy to follow?
3. Action orientation: do instructions guide the user?
4. Consistency: is tone and terminology steady throughout?
5. Inclusivity: is the language inclusive and accessible?

Point out passages to rewrite and how. Keep the answer short and actionable.",
        truncate_chars(content, CONTENT_PREVIEW_CHARS)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_is_truncated() {
        let content = "a".repeat(5000);
        let prompt = readability(&content);
        assert!(prompt.contains(&"a".repeat(2000)));
        assert!(!prompt.contains(&"a".repeat(2001)));
    }

    #[test]
    fn test_outline_indents_and_limits() {
        let mut headings = vec![Heading::new(1, "Intro"), Heading::new(3, "Deep")];
        headings.extend((0..20).map(|i| Heading::new(2, format!("Section {}", i))));
        let outline = outline(&headings);
        assert!(outline.starts_with("H1: Intro\n    H3: Deep\n"));
        assert_eq!(outline.lines().count(), OUTLINE_HEADINGS);
    }

    #[test]
    fn test_structure_prompt_uses_shorter_preview() {
        let content = "b".repeat(3000);
        let prompt = structure(&content, &[]);
        assert!(prompt.contains(&"b".repeat(1500)));
        assert!(!prompt.contains(&"b".repeat(1501)));
    }
}
