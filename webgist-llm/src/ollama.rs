//! Ollama client for local model inference.

use std::time::{Duration, Instant};

use anyhow::Context;
use serde_json::{json, Value as JsonValue};

use async_trait::async_trait;
use webgist_common::ModelError;

use crate::prompt::Prompt;
use crate::traits::{ModelClient, ModelResponse};

const CONNECTION_HINT: &str =
    "no running Ollama server detected; start it with `ollama serve` (https://github.com/ollama/ollama)";

/// Client for a locally hosted Ollama server.
///
/// Speaks `POST /api/generate` and `GET /api/tags`; no authentication. The
/// generation timeout is applied per request and is distinct from any page
/// fetch timeout.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Names of the models currently pulled on the backend.
    pub async fn list_models(&self) -> Result<Vec<String>, ModelError> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|_| ModelError::BackendUnavailable)?;

        if !resp.status().is_success() {
            return Err(ModelError::BackendUnavailable);
        }

        let val: JsonValue = resp
            .json()
            .await
            .map_err(|_| ModelError::BackendUnavailable)?;

        let models = val
            .get("models")
            .and_then(|m| m.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.get("name").and_then(|n| n.as_str()))
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default();

        Ok(models)
    }
}

#[async_trait]
impl ModelClient for OllamaClient {
    async fn generate(&self, prompt: &Prompt, model: &str) -> Result<ModelResponse, ModelError> {
        let url = format!("{}/api/generate", self.base_url);
        let payload = json!({
            "model": model,
            "prompt": prompt.content,
            "system": prompt.system_instruction,
            "stream": false,
        });

        let started = Instant::now();
        let resp = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout
                } else {
                    tracing::warn!(error = %e, "{CONNECTION_HINT}");
                    ModelError::BackendUnavailable
                }
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            // Ollama answers 404 when the model has not been pulled. Distinct
            // from the server being down: remediation is `ollama pull`.
            return Err(ModelError::ModelNotFound(model.to_string()));
        }
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "generate request rejected");
            return Err(ModelError::BackendUnavailable);
        }

        let val: JsonValue = resp
            .json()
            .await
            .map_err(|_| ModelError::BackendUnavailable)?;
        let latency = started.elapsed();

        let text = val
            .get("response")
            .and_then(|r| r.as_str())
            .unwrap_or("")
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(ModelError::EmptyResponse);
        }

        tracing::debug!(
            model,
            latency_ms = latency.as_millis() as u64,
            chars = text.len(),
            "generate.done"
        );

        Ok(ModelResponse {
            text,
            model: model.to_string(),
            latency,
        })
    }

    async fn health_check(&self) -> bool {
        self.list_models().await.is_ok()
    }
}
