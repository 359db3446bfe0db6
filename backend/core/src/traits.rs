use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{CompletionRequest, CompletionResponse};

/// A multimodal completion backend that turns an image plus a prompt into text.
///
/// Implementations are built once at startup and shared read-only across
/// requests, so they must be `Send + Sync`.
#[async_trait]
pub trait ImageTextProvider: Send + Sync {
    /// Provider name (e.g., "groq", "gemini").
    fn name(&self) -> &str;

    /// Model identifier sent upstream.
    fn model(&self) -> &str;

    /// Send the image and prompt upstream and return the raw completion text.
    async fn extract_text(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError>;
}
