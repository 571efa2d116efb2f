use std::time::Duration;

use async_trait::async_trait;

use webgist_common::ModelError;

use crate::prompt::Prompt;

/// Text generated by the backend, with the model that produced it and the
/// observed request latency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResponse {
    pub text: String,
    pub model: String,
    pub latency: Duration,
}

/// Narrow request/response contract against the local inference backend.
///
/// Implementations apply their own generation timeout (inference is slower
/// than a page fetch) and never retry internally.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Run one generation for `prompt` against `model`.
    async fn generate(&self, prompt: &Prompt, model: &str) -> Result<ModelResponse, ModelError>;

    /// Whether the backend service is currently reachable.
    async fn health_check(&self) -> bool;
}
