use crate::{
    error::LlmError,
    types::{CompletionRequest, CompletionResponse},
};
use async_trait::async_trait;

/// Core trait for completion clients
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Complete a prompt (non-streaming, blocks until the full completion returns)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Get provider name (e.g., "together")
    fn provider_name(&self) -> &str;

    /// Get the default model name used when a request does not override it
    fn model_name(&self) -> &str;
}
