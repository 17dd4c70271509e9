//! Reqwest-backed Ollama generator.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and unwrapping the `response` field of the
//! envelope. Cleaning the generated text is a domain concern.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{GenerateOptionsDto, GenerateRequestDto, GenerateResponseDto};
use crate::domain::FeedbackPrompt;
use crate::domain::ports::{FeedbackGenerator, FeedbackGeneratorError};

const GENERATE_PATH: &str = "api/generate";
pub const DEFAULT_MODEL: &str = "mistral";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection and sampling settings for the Ollama adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaSettings {
    /// Base URL of the Ollama server, for example `http://localhost:11434`.
    pub endpoint: Url,
    pub model: String,
    pub temperature: f32,
    /// Upper bound on generated tokens, sent as `num_predict`.
    pub max_tokens: u32,
    pub request_timeout: Duration,
}

impl OllamaSettings {
    /// Settings for `endpoint` with the stock model and sampling values.
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            model: DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Errors raised while constructing the adapter.
#[derive(Debug, thiserror::Error)]
pub enum OllamaClientError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("invalid Ollama endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Feedback generator that POSTs prompts to a single Ollama server.
pub struct OllamaFeedbackGenerator {
    client: Client,
    generate_url: Url,
    model: String,
    options: GenerateOptionsDto,
}

impl OllamaFeedbackGenerator {
    /// Build an adapter with a reqwest client bounded by the request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or the
    /// generate URL cannot be derived from the endpoint.
    pub fn new(settings: OllamaSettings) -> Result<Self, OllamaClientError> {
        let client = Client::builder().timeout(settings.request_timeout).build()?;
        let generate_url = generate_url(&settings.endpoint)?;
        Ok(Self {
            client,
            generate_url,
            model: settings.model,
            options: GenerateOptionsDto {
                temperature: settings.temperature,
                num_predict: settings.max_tokens,
            },
        })
    }

    pub fn generate_url(&self) -> &Url {
        &self.generate_url
    }
}

#[async_trait]
impl FeedbackGenerator for OllamaFeedbackGenerator {
    async fn generate(&self, prompt: &FeedbackPrompt) -> Result<String, FeedbackGeneratorError> {
        let request = GenerateRequestDto {
            model: self.model.as_str(),
            prompt: prompt.as_str(),
            stream: false,
            options: self.options,
        };
        let response = self
            .client
            .post(self.generate_url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        debug!(bytes = body.len(), model = %self.model, "ollama reply received");
        parse_generated_text(body.as_ref())
    }
}

/// Join the generate path onto the endpoint, keeping any base path.
fn generate_url(endpoint: &Url) -> Result<Url, url::ParseError> {
    if endpoint.path().ends_with('/') {
        endpoint.join(GENERATE_PATH)
    } else {
        let mut base = endpoint.clone();
        base.set_path(&format!("{}/", endpoint.path()));
        base.join(GENERATE_PATH)
    }
}

fn parse_generated_text(body: &[u8]) -> Result<String, FeedbackGeneratorError> {
    let decoded: GenerateResponseDto = serde_json::from_slice(body).map_err(|error| {
        FeedbackGeneratorError::decode(format!("invalid Ollama JSON payload: {error}"))
    })?;
    decoded.response.ok_or_else(|| {
        FeedbackGeneratorError::decode("envelope has no `response` text")
    })
}

fn map_transport_error(error: reqwest::Error) -> FeedbackGeneratorError {
    if error.is_timeout() {
        FeedbackGeneratorError::timeout(error.to_string())
    } else {
        FeedbackGeneratorError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> FeedbackGeneratorError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            FeedbackGeneratorError::timeout(format!("status {}", status.as_u16()))
        }
        _ => FeedbackGeneratorError::status(status.as_u16(), body_preview(body)),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
        format!("{preview}...")
    } else {
        compact
    }
}
