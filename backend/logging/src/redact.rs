//! Log Redaction Layer
//!
//! Scrubs provider API keys and bearer tokens from strings prior to logging.
//! Upstream error bodies sometimes echo the key back.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(gsk_[A-Za-z0-9]{16,})|(AIza[0-9A-Za-z_\-]{30,})|(sk-[A-Za-z0-9_\-]{20,})|(Bearer\s+[A-Za-z0-9\-\._~+/]+=*)").unwrap()
});
static KEY_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?&]key=)[^&\s]+").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]");
    KEY_PARAM_RE
        .replace_all(&redacted, "${1}[REDACTED_TOKEN]")
        .into_owned()
}
