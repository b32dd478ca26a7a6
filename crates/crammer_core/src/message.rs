//! Message types for conversation history.

use crate::{Input, Role};
use serde::{Deserialize, Serialize};

/// A message in a conversation.
///
/// # Examples
///
/// ```
/// use crammer_core::{Message, Role};
///
/// let message = Message::user("What caused the Berlin Blockade?");
///
/// assert_eq!(*message.role(), Role::User);
/// assert_eq!(message.content().len(), 1);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
pub struct Message {
    /// The role of the message sender
    role: Role,
    /// The content of the message
    content: Vec<Input>,
}

impl Message {
    /// Creates a new message with the given role and content.
    pub fn new(role: Role, content: Vec<Input>) -> Self {
        Self { role, content }
    }

    /// Returns a builder for constructing a Message.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    /// A system message with text content.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, vec![Input::Text(text.into())])
    }

    /// A user message with text content.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![Input::Text(text.into())])
    }

    /// An assistant message with text content.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, vec![Input::Text(text.into())])
    }
}
