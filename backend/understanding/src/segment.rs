//! Splitting extracted page text into individual questions.
//!
//! Used by the `extract --segment` command to preview how a page breaks
//! down before it is pasted into a paper template.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// A line that opens a new numbered question: `1.`, `(2).`, `Q3:`, `Q 4)`.
static QUESTION_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\(?\d+\)?\.|\bQ\s?\d+[:.)])").unwrap());

/// Sub-question markers: `(a)`, `iv)`, `3.`.
static SUB_QUESTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\(\w\)|[ivx]+\)|\d+\.)").unwrap());

/// Insert a line break before every sub-question marker.
pub fn break_sub_questions(text: &str) -> String {
    SUB_QUESTION_MARKER.replace_all(text, "\n$1").into_owned()
}

/// Group the non-empty lines of `text` into question blocks.
///
/// Returns the original text as a single block when nothing can be grouped.
pub fn segment_questions(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if QUESTION_START.is_match(line) && !current.is_empty() {
            blocks.push(current.join("\n"));
            current.clear();
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    if blocks.is_empty() {
        vec![text.to_string()]
    } else {
        blocks
    }
}

/// Coarse category of an English-paper question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Composition,
    LetterWriting,
    FunctionalWriting,
    Comprehension,
    Grammar,
    Unknown,
}

impl QuestionKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Composition => "Composition",
            Self::LetterWriting => "Letter Writing",
            Self::FunctionalWriting => "Functional Writing",
            Self::Comprehension => "Comprehension",
            Self::Grammar => "Grammar",
            Self::Unknown => "Unknown",
        }
    }
}

/// Keyword classification, first match wins.
pub fn classify_question(text: &str) -> QuestionKind {
    let t = text.to_lowercase();
    if t.contains("composition") || t.contains("story") {
        QuestionKind::Composition
    } else if t.contains("letter") {
        QuestionKind::LetterWriting
    } else if t.contains("notice") || t.contains("email") {
        QuestionKind::FunctionalWriting
    } else if t.contains("read the passage") || t.contains("comprehension") {
        QuestionKind::Comprehension
    } else if t.contains("fill in") || t.contains("grammar") {
        QuestionKind::Grammar
    } else {
        QuestionKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_numbered_questions() {
        let text = "Instructions here\n1. Write a story. [20]\nabout a trip\n\n2. Write a letter. [10]";
        let blocks = segment_questions(text);
        assert_eq!(
            blocks,
            vec![
                "Instructions here".to_string(),
                "1. Write a story. [20]\nabout a trip".to_string(),
                "2. Write a letter. [10]".to_string(),
            ]
        );
    }

    #[test]
    fn recognises_q_prefixes() {
        let blocks = segment_questions("Q1: first\nQ 2) second\n(3). third");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1], "Q 2) second");
    }

    #[test]
    fn blank_text_is_a_single_block() {
        assert_eq!(segment_questions("  \n "), vec!["  \n ".to_string()]);
    }

    #[test]
    fn sub_question_markers_start_new_lines() {
        assert_eq!(break_sub_questions("Answer (a) this ii) that"), "Answer \n(a) this \nii) that");
    }

    #[test]
    fn classifies_by_keywords() {
        assert_eq!(classify_question("Write a short story"), QuestionKind::Composition);
        assert_eq!(classify_question("Write a LETTER to your friend"), QuestionKind::LetterWriting);
        assert_eq!(classify_question("Draft an email"), QuestionKind::FunctionalWriting);
        assert_eq!(classify_question("Read the passage below"), QuestionKind::Comprehension);
        assert_eq!(classify_question("Fill in the blanks"), QuestionKind::Grammar);
        assert_eq!(classify_question("Solve for x"), QuestionKind::Unknown);
        assert_eq!(QuestionKind::LetterWriting.label(), "Letter Writing");
    }
}
