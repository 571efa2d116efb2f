//! Single-URL summarization pipeline.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use webgist_common::{ConfigError, FailureKind, Stage, WebgistConfig};
use webgist_llm::{compose, ModelClient, OllamaClient};
use webgist_web::{clean, Fetcher};

/// Terminal value for one summarized URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub url: String,
    pub status: SummaryStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SummaryStatus {
    Success { text: String },
    Failure { kind: FailureKind, message: String },
}

impl SummaryResult {
    fn success(url: &str, text: String) -> Self {
        Self {
            url: url.to_string(),
            status: SummaryStatus::Success { text },
        }
    }

    fn failure(url: &str, stage: Stage, kind: FailureKind) -> Self {
        let message = format!("{stage} failed for {url}: {kind}");
        tracing::warn!(%url, %stage, %kind, "pipeline.failed");
        Self {
            url: url.to_string(),
            status: SummaryStatus::Failure { kind, message },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, SummaryStatus::Success { .. })
    }

    /// The generated summary, if this result succeeded.
    pub fn summary_text(&self) -> Option<&str> {
        match &self.status {
            SummaryStatus::Success { text } => Some(text),
            SummaryStatus::Failure { .. } => None,
        }
    }

    /// The failure kind, if this result failed.
    pub fn failure_kind(&self) -> Option<&FailureKind> {
        match &self.status {
            SummaryStatus::Success { .. } => None,
            SummaryStatus::Failure { kind, .. } => Some(kind),
        }
    }
}

/// Orchestrates fetch -> clean -> compose -> generate for one URL.
///
/// Each call makes exactly one attempt through each stage; the first failure
/// short-circuits into a structured [`SummaryResult`] naming the stage and
/// URL. Configuration is read at call start and frozen for the call's
/// duration — the setters take `&mut self`, so they can only run between
/// calls, never alter one in flight.
pub struct Summarizer {
    pub(crate) fetcher: Fetcher,
    pub(crate) model: Arc<dyn ModelClient>,
    pub(crate) config: WebgistConfig,
}

impl Summarizer {
    /// Build a summarizer talking to the Ollama backend named in `config`.
    pub fn new(config: WebgistConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let client = OllamaClient::new(
            &config.backend_url,
            Duration::from_secs(config.generate_timeout_secs),
        )?;
        Self::with_client(config, Arc::new(client))
    }

    /// Build a summarizer over an arbitrary [`ModelClient`] implementation.
    pub fn with_client(
        config: WebgistConfig,
        model: Arc<dyn ModelClient>,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        let fetcher = Fetcher::new(Duration::from_secs(config.fetch_timeout_secs))?;
        Ok(Self {
            fetcher,
            model,
            config,
        })
    }

    pub fn config(&self) -> &WebgistConfig {
        &self.config
    }

    /// Replace the system instruction used by subsequent calls.
    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        self.config.system_prompt = prompt.into();
        tracing::info!("system prompt updated");
    }

    /// Select the model used by subsequent calls.
    pub fn set_model(&mut self, model: impl Into<String>) -> Result<(), ConfigError> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".into()));
        }
        tracing::info!(%model, "model updated");
        self.config.model = model;
        Ok(())
    }

    /// Whether the inference backend is currently reachable.
    pub async fn check_backend(&self) -> bool {
        self.model.health_check().await
    }

    /// Summarize a single URL, returning one summary or one structured error.
    pub async fn summarize(&self, url: &str) -> SummaryResult {
        // Snapshot the knobs this call depends on.
        let model = self.config.model.clone();
        let system_prompt = self.config.system_prompt.clone();
        let max_chars = self.config.max_content_chars;

        tracing::debug!(%url, %model, "pipeline.start");

        let doc = match self.fetcher.fetch(url).await {
            Ok(doc) => doc,
            Err(e) => return SummaryResult::failure(url, Stage::Fetching, e.into()),
        };

        let content = match clean(&doc, max_chars) {
            Ok(content) => content,
            Err(e) => return SummaryResult::failure(url, Stage::Cleaning, e.into()),
        };

        // Composing is pure and cannot fail.
        let prompt = compose(&system_prompt, &content);

        let response = match self.model.generate(&prompt, &model).await {
            Ok(response) => response,
            Err(e) => return SummaryResult::failure(url, Stage::Generating, e.into()),
        };

        tracing::info!(
            %url,
            model = %response.model,
            latency_ms = response.latency.as_millis() as u64,
            stage = %Stage::Done,
            "pipeline.done"
        );
        SummaryResult::success(url, response.text)
    }
}
