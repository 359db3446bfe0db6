use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::UnknownProviderError;

/// Default sampling temperature for extraction. Low so the model transcribes
/// rather than paraphrases.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Default request body limit: 20 MiB, enough for a phone photo of a page.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Which upstream service extracts text from uploaded pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ProviderKind {
    #[default]
    Groq,
    Gemini,
    /// Canned responses, no network.
    Mock,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::Gemini => "gemini",
            Self::Mock => "mock",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::Groq => Some("GROQ_API_KEY"),
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::Mock => None,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Groq => "meta-llama/llama-4-maverick-17b-128e-instruct",
            Self::Gemini => "gemini-2.0-flash",
            Self::Mock => "mock",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Groq => "https://api.groq.com/openai/v1",
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Self::Mock => "",
        }
    }

    pub fn requires_api_key(&self) -> bool {
        self.api_key_env().is_some()
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = UnknownProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(Self::Groq),
            "gemini" | "google" => Ok(Self::Gemini),
            "mock" => Ok(Self::Mock),
            other => Err(UnknownProviderError(other.to_string())),
        }
    }
}

impl TryFrom<String> for ProviderKind {
    type Error = UnknownProviderError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One uploaded exam page as received from the client.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub image: Bytes,
    pub content_type: String,
    pub section: String,
}

/// Request to an image-to-text provider.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub image: Bytes,
    pub mime_type: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, image: Bytes, mime_type: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image,
            mime_type: mime_type.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Response from an image-to-text provider.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
    pub tokens_used: u64,
    pub latency_ms: u64,
}

/// Body returned by `POST /process-image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessImageResponse {
    pub text: String,
}
