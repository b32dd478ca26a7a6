//! Input types for generation requests.

use crate::ToolCall;
use serde::{Deserialize, Serialize};

/// Content units carried by a conversation message.
///
/// Besides plain text, inputs record the tool-loop transcript: the
/// backend's tool calls and the results fed back to it. Replaying both
/// in subsequent requests keeps the generation context open across tool
/// round-trips.
///
/// # Examples
///
/// ```
/// use crammer_core::Input;
///
/// let text = Input::Text("Explain the Treaty of Versailles".to_string());
///
/// let tool_result = Input::ToolResult {
///     name: "search_videos".to_string(),
///     content: serde_json::json!({ "url": "https://www.youtube.com/watch?v=x" }),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text input.
    Text(String),

    /// A tool call previously issued by the backend, replayed as part
    /// of the conversation.
    ToolCall(ToolCall),

    /// The result of executing a tool, fed back into the open
    /// generation.
    ToolResult {
        /// Name of the tool that produced this result
        name: String,
        /// The validated result payload
        content: serde_json::Value,
    },
}
