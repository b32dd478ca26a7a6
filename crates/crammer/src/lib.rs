//! Crammer: a structured AI generation pipeline for revision products.
//!
//! This facade re-exports the public surface of the workspace crates:
//!
//! - [`crammer_error`]: error taxonomy and retry classification
//! - [`crammer_core`]: request/response data types and retry policies
//! - [`crammer_schema`]: declarative output schemas and validation
//! - [`crammer_audio`]: PCM to WAV framing and audio data URIs
//! - [`crammer_client`]: the retrying generation client, tool loop and
//!   chain orchestration, plus the Gemini driver
//! - [`crammer_flows`]: the education content flows
//!
//! # Examples
//!
//! ```no_run
//! use crammer::prelude::*;
//!
//! # async fn demo() -> CrammerResult<()> {
//! let generator = Generator::new(GeminiClient::from_env()?);
//! let summary = provide_topic_summary(&generator, &TopicSummaryInput {
//!     topic: "The Cold War".to_string(),
//! })
//! .await?;
//! println!("{}", summary.summary);
//! # Ok(())
//! # }
//! ```

pub use crammer_audio;
pub use crammer_client;
pub use crammer_core;
pub use crammer_error;
pub use crammer_flows;
pub use crammer_schema;

/// Everything a typical caller needs.
pub mod prelude {
    pub use crammer_audio::{PcmAudioBuffer, encode_wav, wrap_wav_data_uri};
    pub use crammer_client::{
        CancelSignal, Chain, CrammerDriver, GeminiClient, Generator, Stage, StageExt,
        ToolDeclaration, ToolHandler, ToolSet,
    };
    pub use crammer_core::{
        GenerateRequest, GenerateResponse, GenerationConfig, Input, Message, Modality, Output,
        RetryPolicy, Role, ToolCall, ToolSpec,
    };
    pub use crammer_error::{
        CrammerError, CrammerResult, GenerationError, GenerationErrorKind, RetryableError,
    };
    pub use crammer_flows::*;
    pub use crammer_schema::{Field, Schema, SchemaViolation, ViolationKind};
}
