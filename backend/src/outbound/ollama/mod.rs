//! Ollama outbound adapter.
//!
//! Implements the `FeedbackGenerator` port against the Ollama
//! `/api/generate` endpoint with streaming disabled.

mod dto;
mod http_generator;

pub use http_generator::{OllamaClientError, OllamaFeedbackGenerator, OllamaSettings};
