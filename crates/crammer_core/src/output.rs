//! Output types from generation responses.

use serde::{Deserialize, Serialize};

/// Supported output types from the generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Structured JSON output.
    Structured(serde_json::Value),

    /// Generated audio output (text-to-speech).
    Audio {
        /// MIME type of the audio
        mime: Option<String>,
        /// Raw audio data, already base64-decoded
        data: Vec<u8>,
    },

    /// Tool calls requested by the model.
    ///
    /// Contains one or more tool calls that need to be executed. The
    /// results are sent back in a subsequent request on the same
    /// conversation.
    ToolCalls(Vec<ToolCall>),
}

/// A tool call made by the model.
///
/// Returned in [`Output`] when the model decides to use a tool rather
/// than (or before) generating its final result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Identifier for this tool call, if the backend assigns one
    pub id: Option<String>,
    /// Name of the tool to call
    pub name: String,
    /// Arguments to pass to the tool (as JSON)
    pub arguments: serde_json::Value,
}
