//! Common types shared across the webgist workspace.
//!
//! This crate defines the runtime configuration, the closed error taxonomy for
//! the summarization pipeline, and observability helpers used by every other
//! crate. It is intentionally lightweight so that all crates can depend on it
//! without heavy transitive costs.
//!
//! # Overview
//!
//! - [`WebgistConfig`]: Top-level runtime configuration with validated updates
//! - [`FetchError`], [`ParseError`], [`ModelError`]: per-stage failure kinds
//! - [`FailureKind`]: the union surfaced on a failed summary
//! - [`Stage`]: the pipeline stage vocabulary used in failure messages
//! - [`observability`]: centralised tracing/logging initialisation
use serde::{Deserialize, Serialize};

pub mod observability;

/// Baseline model identifier, matching the smallest model that produces
/// usable summaries on commodity hardware.
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Default address of the local Ollama backend.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:11434";

/// Default system instruction for generic page summarization.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an assistant that analyzes the contents of a website \
and provides a short summary, ignoring text that might be navigation related. \
Respond in markdown.";

/// Runtime configuration for the summarization pipeline.
///
/// All knobs are plain named fields with explicit defaults; callers mutate a
/// config before constructing a summarizer (or through the summarizer's
/// explicit setters) and validation happens at update time via
/// [`WebgistConfig::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebgistConfig {
    /// Base URL of the local inference backend.
    pub backend_url: String,
    /// Name of the model used for generation.
    pub model: String,
    /// System instruction sent with every prompt.
    pub system_prompt: String,
    /// Timeout for fetching a page, in seconds.
    pub fetch_timeout_secs: u64,
    /// Timeout for a single generation request, in seconds. Inference is
    /// typically much slower than a page fetch, so this is a separate knob.
    pub generate_timeout_secs: u64,
    /// Maximum number of characters of cleaned page text kept for the model.
    /// Protects the backend's context window.
    pub max_content_chars: usize,
    /// Maximum number of URLs summarized concurrently in a batch. Bounds the
    /// load placed on the shared local backend.
    pub max_concurrency: usize,
}

impl Default for WebgistConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            fetch_timeout_secs: 10,
            generate_timeout_secs: 120,
            max_content_chars: 20_000,
            max_concurrency: 4,
        }
    }
}

impl WebgistConfig {
    /// Check the configuration for values that would make the pipeline
    /// inoperable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend_url.trim().is_empty() {
            return Err(ConfigError::Invalid("backend_url must not be empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".into()));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid("fetch_timeout_secs must be at least 1".into()));
        }
        if self.generate_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "generate_timeout_secs must be at least 1".into(),
            ));
        }
        if self.max_content_chars == 0 {
            return Err(ConfigError::Invalid("max_content_chars must be at least 1".into()));
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::Invalid("max_concurrency must be at least 1".into()));
        }
        Ok(())
    }
}

/// Configuration was incomplete or invalid.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Failures while retrieving a page over the network.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchError {
    /// The request exceeded the fetch timeout.
    #[error("request timed out")]
    Timeout,
    /// The connection could not be established.
    #[error("connection refused")]
    ConnectionRefused,
    /// The server answered with a non-success status.
    #[error("server responded with HTTP {0}")]
    HttpStatus(u16),
    /// The URL could not be parsed or uses an unsupported scheme.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// The document could not be treated as markup at all.
///
/// Note that a page with no extractable text is *not* a parse error; the
/// cleaner reports that as valid empty content.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseError {
    #[error("unparsable markup: {0}")]
    Unparsable(String),
}

/// Failures while talking to the local inference backend.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelError {
    /// The backend service is not reachable. Remediation: start the backend.
    #[error("inference backend unavailable")]
    BackendUnavailable,
    /// The backend is up but does not host the requested model.
    /// Remediation: pull the model.
    #[error("model '{0}' not found on backend")]
    ModelNotFound(String),
    /// Generation exceeded the generation timeout.
    #[error("generation timed out")]
    Timeout,
    /// The backend answered but produced no text.
    #[error("backend returned an empty response")]
    EmptyResponse,
}

/// Union of the per-stage failure kinds carried on a failed summary.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    #[error(transparent)]
    Network(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Pipeline stage a single-URL summarization moves through.
///
/// A call advances strictly `Fetching -> Cleaning -> Composing -> Generating
/// -> Done`; the first failing stage is recorded on the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Fetching,
    Cleaning,
    Composing,
    Generating,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Fetching => "Fetching",
            Stage::Cleaning => "Cleaning",
            Stage::Composing => "Composing",
            Stage::Generating => "Generating",
            Stage::Done => "Done",
        };
        f.write_str(name)
    }
}
