//! Conversational revision assistant flow.
//!
//! This is the one place in the library where errors degrade into a
//! fixed, user-safe reply instead of propagating: the assistant sits
//! directly behind a chat box, and a distinguishable error is worth
//! less to that surface than a sentence the student can read. Every
//! other flow surfaces its error to the caller.

use crate::support::decode;
use crammer_client::{CrammerDriver, Generator};
use crammer_core::{GenerateRequest, Message, RetryPolicy};
use crammer_error::{GenerationError, GenerationErrorKind};
use crammer_schema::{Field, Schema};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Fallback reply after the retry budget is exhausted.
const BUSY_FALLBACK: &str = "The AI is currently busy. Please try again in a moment.";

/// Fallback reply for terminal failures.
const SORRY_FALLBACK: &str = "Sorry, I had trouble thinking of a response.";

/// Who said a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The student
    User,
    /// The assistant
    Model,
}

/// One message of the chat history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Speaker
    pub role: ChatRole,
    /// Message text
    pub content: String,
}

/// Input for the chat assistant: the full history, newest last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatInput {
    /// Conversation so far; the last user message is the prompt
    pub history: Vec<ChatMessage>,
}

/// The assistant's reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatOutput {
    /// Reply text
    pub response: String,
}

fn chat_schema() -> Schema {
    Schema::object([
        Field::required("response", Schema::non_empty_string()).describe("The assistant's reply."),
    ])
}

const CHAT_PREAMBLE: &str = "You are a friendly and knowledgeable AI assistant for a GCSE revision website.
Your purpose is to help students understand concepts on their syllabus.
Be encouraging and clear in your explanations.
Keep responses concise and easy to understand for a 15-16 year old student.
Use the provided chat history to maintain context.";

fn chat_request(input: &ChatInput) -> GenerateRequest {
    let mut messages = vec![Message::system(CHAT_PREAMBLE)];
    for entry in &input.history {
        messages.push(match entry.role {
            ChatRole::User => Message::user(&entry.content),
            ChatRole::Model => Message::assistant(&entry.content),
        });
    }
    GenerateRequest {
        messages,
        output_schema: Some(chat_schema()),
        ..GenerateRequest::default()
    }
}

/// Answer the latest message of a revision chat.
///
/// Never fails on backend trouble: exhausted retries produce a "busy"
/// reply and terminal errors an apology. Only cancellation propagates,
/// since a cancelled caller no longer wants any reply.
#[instrument(skip(generator, input), fields(history_len = input.history.len()))]
pub async fn chat<D: CrammerDriver>(
    generator: &Generator<D>,
    input: &ChatInput,
) -> Result<ChatOutput, GenerationError> {
    let request = chat_request(input);
    match generator.generate(&request, &RetryPolicy::default()).await {
        Ok(value) => decode(value),
        Err(error) => match error.kind() {
            GenerationErrorKind::Cancelled => Err(error),
            GenerationErrorKind::ExhaustedRetries { .. } => {
                warn!(%error, "Chat generation exhausted retries; substituting busy fallback");
                Ok(ChatOutput {
                    response: BUSY_FALLBACK.to_string(),
                })
            }
            _ => {
                warn!(%error, "Chat generation failed; substituting apology fallback");
                Ok(ChatOutput {
                    response: SORRY_FALLBACK.to_string(),
                })
            }
        },
    }
}
