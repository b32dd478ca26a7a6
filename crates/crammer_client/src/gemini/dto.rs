//! Data transfer objects for the Generative Language API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A conversation turn in the Gemini wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiContent {
    /// "user" or "model"; omitted for system instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content parts
    pub parts: Vec<GeminiPart>,
}

/// One part of a turn. Exactly one field is populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPart {
    /// Text content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// A function call issued by the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<GeminiFunctionCall>,
    /// A function result supplied by the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_response: Option<GeminiFunctionResponse>,
    /// Inline binary payload (audio)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<GeminiInlineData>,
}

/// A function call part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiFunctionCall {
    /// Declared function name
    pub name: String,
    /// Arguments chosen by the model
    #[serde(default)]
    pub args: Value,
}

/// A function response part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiFunctionResponse {
    /// Declared function name
    pub name: String,
    /// The tool's validated result
    pub response: Value,
}

/// Inline media payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiInlineData {
    /// MIME type, e.g. "audio/L16;codec=pcm;rate=24000"
    pub mime_type: String,
    /// Base64-encoded bytes (occasionally a full data URI)
    pub data: String,
}

/// A declared tool in the wire format.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiTool {
    /// Function declarations the model may invoke
    pub function_declarations: Vec<GeminiFunctionDeclaration>,
}

/// A single function declaration.
#[derive(Debug, Clone, Serialize)]
pub struct GeminiFunctionDeclaration {
    /// Function name
    pub name: String,
    /// Guidance for the model
    pub description: String,
    /// OpenAPI-style parameter schema
    pub parameters: Value,
}

/// Voice selection for speech output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPrebuiltVoice {
    /// Prebuilt voice identifier
    pub voice_name: String,
}

/// Voice configuration wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiVoiceConfig {
    /// Selected prebuilt voice
    pub prebuilt_voice_config: GeminiPrebuiltVoice,
}

/// Speech configuration wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiSpeechConfig {
    /// Voice configuration
    pub voice_config: GeminiVoiceConfig,
}

/// Generation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Output token ceiling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// "application/json" for structured output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// Declared output shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    /// Requested modalities, e.g. ["AUDIO"]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    /// Speech voice configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<GeminiSpeechConfig>,
}

/// A generateContent request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation turns
    pub contents: Vec<GeminiContent>,
    /// System instruction, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiContent>,
    /// Declared tools, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<GeminiTool>>,
    /// Generation configuration, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

/// A response candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// Generated content
    pub content: Option<GeminiContent>,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// A generateContent response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Response candidates; the first is used
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}
