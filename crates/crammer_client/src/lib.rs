//! Generation client for the Crammer library.
//!
//! Provides the backend driver seam, the single retrying generation
//! client with schema enforcement, the tool-invocation loop, chained
//! flow orchestration, and the Gemini provider integration.

mod cancel;
mod chain;
mod driver;
pub mod gemini;
mod generator;
mod tools;

pub use cancel::CancelSignal;
pub use chain::{Chain, Stage, StageExt};
pub use driver::CrammerDriver;
pub use gemini::GeminiClient;
pub use generator::{AudioPayload, Generator, MAX_TOOL_ROUNDS};
pub use tools::{ToolDeclaration, ToolHandler, ToolSet};
