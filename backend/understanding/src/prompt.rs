//! Extraction prompt sent alongside every exam page.

const PROMPT_HEADER: &str = "You are an expert data entry professional digitizing an exam paper.
Task: Extract ALL the text from this image exactly as it appears. DO NOT filter or skip any parts of the image content.";

const PROMPT_RULES: &str = "Strict Rules:
1. Return ONLY the extracted text. No markdown code blocks (```), no intro, no outro.
2. Fix obvious OCR errors (e.g., '1l' -> 'll', 'rn' -> 'm').
3. Maintain structure: distinct questions and sub-questions (a, b, i, ii) must start on new lines.
4. Join lines that belong to the same paragraph or sentence. DO NOT include line breaks just because the text wraps in the original image. ONLY use line breaks for new distinct questions, sub-questions, or actual new paragraphs.
5. If marks are present like [5] or (10), keep them at the very end of the line.
6. Ignore header noise like \"Page 1\" or scanned artifacts.";

/// Build the instruction prompt for one page.
///
/// A blank `section` is treated the same as `None`.
pub fn build_prompt(section: Option<&str>) -> String {
    let section = section.map(str::trim).filter(|s| !s.is_empty());

    let mut prompt = String::with_capacity(PROMPT_HEADER.len() + PROMPT_RULES.len() + 96);
    prompt.push_str(PROMPT_HEADER);
    prompt.push('\n');
    if let Some(section) = section {
        prompt.push_str(&format!(
            "This page belongs to the \"{section}\" section of the paper.\n"
        ));
    }
    prompt.push('\n');
    prompt.push_str(PROMPT_RULES);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_every_rule() {
        let prompt = build_prompt(None);
        assert!(prompt.contains("Return ONLY the extracted text"));
        assert!(prompt.contains("'rn' -> 'm'"));
        assert!(prompt.contains("[5] or (10)"));
        assert!(prompt.contains("\"Page 1\""));
        assert!(!prompt.contains("section of the paper"));
    }

    #[test]
    fn section_is_named_when_present() {
        let prompt = build_prompt(Some("Q3"));
        assert!(prompt.contains("\"Q3\" section"));
    }

    #[test]
    fn blank_section_is_ignored() {
        assert_eq!(build_prompt(Some("   ")), build_prompt(None));
    }
}
