//! Post-processing of raw model output before it is returned to callers.

use once_cell::sync::Lazy;
use regex::Regex;

/// A reply that is entirely wrapped in one markdown fence, with an optional
/// language tag on the opening line.
static WRAPPING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A```[A-Za-z0-9_-]*[ \t]*\r?\n(.*?)\r?\n?```\z").unwrap());

/// A one-line reply fenced inline: ```` ```text``` ````.
static INLINE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A```([^`\n]*)```\z").unwrap());

/// Trim the completion and drop a single wrapping code fence.
///
/// Fences in the middle of the text are left alone.
pub fn clean_completion(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(caps) = WRAPPING_FENCE.captures(trimmed) {
        if !caps[1].contains("```") {
            return caps[1].trim().to_string();
        }
    }
    match INLINE_FENCE.captures(trimmed) {
        Some(caps) => caps[1].trim().to_string(),
        None => trimmed.to_string(),
    }
}
