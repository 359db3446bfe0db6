//! CLI Extract Command
//!
//! Runs one local image through the configured provider, the same way the
//! relay does, and prints the text.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use paperforge_config::PaperForgeConfig;
use paperforge_core::{CompletionRequest, DEFAULT_TEMPERATURE};
use paperforge_understanding::{
    break_sub_questions, build_prompt, build_provider, classify_question, clean_completion,
    resolve_image_mime, segment_questions, QuestionKind,
};

use crate::config::provider_settings;
use crate::terminal_output::{note_info, render_table, Column};

pub struct ExtractArgs {
    pub file: PathBuf,
    pub section: Option<String>,
    pub segment: bool,
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct SegmentedQuestion {
    pub index: usize,
    pub kind: QuestionKind,
    pub text: String,
}

#[derive(Debug, Serialize)]
struct ExtractOutput {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    questions: Option<Vec<SegmentedQuestion>>,
}

/// Split extracted text into numbered, classified questions.
pub fn segment(text: &str) -> Vec<SegmentedQuestion> {
    segment_questions(&break_sub_questions(text))
        .into_iter()
        .enumerate()
        .map(|(i, block)| SegmentedQuestion {
            index: i + 1,
            kind: classify_question(&block),
            text: block,
        })
        .collect()
}

pub async fn run(config: &PaperForgeConfig, args: ExtractArgs) -> Result<()> {
    let settings = provider_settings(config);
    let provider = build_provider(&settings)?.with_context(|| {
        format!(
            "no API key configured for provider {}; set {} or PAPERFORGE_API_KEY",
            settings.kind,
            settings.kind.api_key_env().unwrap_or("an API key")
        )
    })?;

    let image = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read image {}", args.file.display()))?;
    let filename = args.file.file_name().and_then(|n| n.to_str());
    let mime_type = resolve_image_mime(None, filename, &image);

    let include_section = config.prompt.include_section.unwrap_or(true);
    let prompt = build_prompt(args.section.as_deref().filter(|_| include_section));
    let request = CompletionRequest::new(prompt, Bytes::from(image), mime_type)
        .with_temperature(config.provider.temperature.unwrap_or(DEFAULT_TEMPERATURE))
        .with_max_tokens(config.provider.max_tokens);

    let response = provider.extract_text(&request).await?;
    info!(
        provider = %response.provider,
        model = %response.model,
        latency_ms = response.latency_ms,
        tokens = response.tokens_used,
        "Page extracted"
    );

    let text = clean_completion(&response.text);
    let questions = args.segment.then(|| segment(&text));

    if args.json {
        let output = ExtractOutput { text, questions };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match questions {
        Some(questions) => {
            let rows: Vec<Vec<String>> = questions
                .iter()
                .map(|q| vec![q.index.to_string(), q.kind.label().to_string(), q.text.clone()])
                .collect();
            let columns = [
                Column::right("#"),
                Column::left("Kind"),
                Column::left("Question").max_width(72),
            ];
            print!("{}", render_table(&columns, &rows));
            note_info(&format!("{} question block(s)", questions.len()));
        }
        None => println!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_and_classifies_questions() {
        let text = "1. Write a letter to the principal. [10] 2. Read the passage and answer.";
        let questions = segment(text);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].index, 1);
        assert_eq!(questions[0].kind, QuestionKind::LetterWriting);
        assert!(questions[1].text.starts_with("2. Read the passage"));
        assert_eq!(questions[1].kind, QuestionKind::Comprehension);
    }

    #[test]
    fn json_output_omits_questions_unless_segmented() {
        let output = ExtractOutput {
            text: "Q1: hello".into(),
            questions: None,
        };
        let v = serde_json::to_value(&output).unwrap();
        assert_eq!(v, serde_json::json!({ "text": "Q1: hello" }));
    }
}
