//! Prompt composition and local model inference.
//!
//! This crate exposes the [`traits::ModelClient`] interface, the pure prompt
//! composer ([`prompt::compose`]), and the concrete [`ollama::OllamaClient`]
//! backend implementation.

pub mod ollama;
pub mod prompt;
pub mod traits;

pub use ollama::OllamaClient;
pub use prompt::{compose, Prompt};
pub use traits::{ModelClient, ModelResponse};
