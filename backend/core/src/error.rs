use thiserror::Error;

/// Failure reported by an image-to-text provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API key configured for provider {provider}")]
    MissingCredential { provider: String },

    #[error("{provider} request failed: {message}")]
    Transport { provider: String, message: String },

    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("malformed {provider} response: {message}")]
    MalformedResponse { provider: String, message: String },
}

impl ProviderError {
    pub fn transport(provider: impl Into<String>, message: impl ToString) -> Self {
        Self::Transport {
            provider: provider.into(),
            message: message.to_string(),
        }
    }

    pub fn malformed(provider: impl Into<String>, message: impl ToString) -> Self {
        Self::MalformedResponse {
            provider: provider.into(),
            message: message.to_string(),
        }
    }

    /// Name of the provider that produced the error.
    pub fn provider(&self) -> &str {
        match self {
            Self::MissingCredential { provider }
            | Self::Transport { provider, .. }
            | Self::Status { provider, .. }
            | Self::MalformedResponse { provider, .. } => provider,
        }
    }
}

/// Returned when a provider name in config or on the command line is not recognised.
#[derive(Debug, Error)]
#[error("unknown provider \"{0}\" (expected groq, gemini or mock)")]
pub struct UnknownProviderError(pub String);
