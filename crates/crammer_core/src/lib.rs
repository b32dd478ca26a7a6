//! Core data types for the Crammer generation library.
//!
//! This crate provides the foundation data types used across all
//! Crammer interfaces.

mod input;
mod message;
mod output;
mod request;
mod retry;
mod role;
mod tool;

pub use input::Input;
pub use message::{Message, MessageBuilder};
pub use output::{Output, ToolCall};
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateResponse, GenerationConfig, Modality,
};
pub use retry::RetryPolicy;
pub use role::Role;
pub use tool::ToolSpec;
