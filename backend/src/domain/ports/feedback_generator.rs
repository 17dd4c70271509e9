//! Driven port for the large-language-model text-generation service.

use async_trait::async_trait;

use crate::domain::FeedbackPrompt;

use super::define_port_error;

define_port_error! {
    /// Errors raised by text-generation adapters.
    pub enum FeedbackGeneratorError {
        /// The service could not be reached.
        Transport { message: String } =>
            "generation service transport failed: {message}",
        /// The service did not answer in time.
        Timeout { message: String } =>
            "generation service timed out: {message}",
        /// The service answered with a non-success status.
        Status { status: u16, message: String } =>
            "generation service returned status {status}: {message}",
        /// The response envelope could not be decoded.
        Decode { message: String } =>
            "generation service response was malformed: {message}",
    }
}

/// Port that turns a prompt into raw model output.
///
/// Implementations return the generated text as-is; cleaning and parsing
/// happen in the domain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackGenerator: Send + Sync {
    async fn generate(&self, prompt: &FeedbackPrompt) -> Result<String, FeedbackGeneratorError>;
}

/// Generator returning a fixed reply, for wiring that does not need a model.
#[derive(Debug, Clone)]
pub struct FixtureFeedbackGenerator {
    reply: String,
}

impl FixtureFeedbackGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl FeedbackGenerator for FixtureFeedbackGenerator {
    async fn generate(&self, _prompt: &FeedbackPrompt) -> Result<String, FeedbackGeneratorError> {
        Ok(self.reply.clone())
    }
}
