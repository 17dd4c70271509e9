//! Wire shapes for the Ollama generate endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct GenerateRequestDto<'a> {
    pub(super) model: &'a str,
    pub(super) prompt: &'a str,
    pub(super) stream: bool,
    pub(super) options: GenerateOptionsDto,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub(super) struct GenerateOptionsDto {
    pub(super) temperature: f32,
    pub(super) num_predict: u32,
}

/// Only the generated text matters; timing and context fields are ignored.
#[derive(Debug, Deserialize)]
pub(super) struct GenerateResponseDto {
    pub(super) response: Option<String>,
}
