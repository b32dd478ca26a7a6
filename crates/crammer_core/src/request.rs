//! Request and response types for generation.

use crate::{Message, Output, ToolSpec};
use crammer_schema::Schema;
use serde::{Deserialize, Serialize};

/// Response modality requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modality {
    Text,
    Audio,
}

/// Model configuration for a generation request.
///
/// # Examples
///
/// ```
/// use crammer_core::{GenerationConfig, Modality};
///
/// let speech = GenerationConfig::speech("Algenib");
/// assert_eq!(speech.response_modalities, vec![Modality::Audio]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerationConfig {
    /// Modalities the backend should respond with
    pub response_modalities: Vec<Modality>,
    /// Prebuilt voice identifier for audio responses
    pub voice: Option<String>,
}

impl GenerationConfig {
    /// Configuration for a speech (audio-modality) request.
    pub fn speech(voice: impl Into<String>) -> Self {
        Self {
            response_modalities: vec![Modality::Audio],
            voice: Some(voice.into()),
        }
    }
}

/// A generation request. Immutable once issued.
///
/// Carries the conversation, the declared output shape, any tool
/// declarations, and optional model/config selection. The declared
/// schema travels with the request so the backend is instructed to
/// produce the shape the validator will enforce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(default)]
pub struct GenerateRequest {
    /// Conversation messages
    pub messages: Vec<Message>,
    /// Model identifier override
    pub model: Option<String>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Declared shape of the structured result
    pub output_schema: Option<Schema>,
    /// Tools the backend may invoke mid-generation
    pub tools: Vec<ToolSpec>,
    /// Modality/voice configuration
    pub config: Option<GenerationConfig>,
}

impl GenerateRequest {
    /// Returns a builder for constructing a GenerateRequest.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// A single-prompt request with a declared output schema.
    pub fn prompt(text: impl Into<String>, output_schema: Schema) -> Self {
        Self {
            messages: vec![Message::user(text)],
            output_schema: Some(output_schema),
            ..Self::default()
        }
    }
}

/// The unified response object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Outputs produced by the backend
    pub outputs: Vec<Output>,
}
