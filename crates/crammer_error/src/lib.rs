//! Error types for the Crammer generation library.
//!
//! This crate provides the foundation error types used throughout the
//! Crammer ecosystem, along with the [`RetryableError`] classification
//! that drives the generation client's retry loop.

mod audio;
mod config;
mod generation;

pub use audio::{AudioError, AudioErrorKind};
pub use config::ConfigError;
pub use generation::{GenerationError, GenerationErrorKind, RetryableError};

/// Umbrella error type over all Crammer error domains.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum CrammerError {
    /// Generation pipeline error.
    #[display("{_0}")]
    Generation(GenerationError),
    /// Audio encoding error.
    #[display("{_0}")]
    Audio(AudioError),
    /// Configuration error.
    #[display("{_0}")]
    Config(ConfigError),
}

impl std::error::Error for CrammerError {}

impl From<GenerationErrorKind> for CrammerError {
    #[track_caller]
    fn from(kind: GenerationErrorKind) -> Self {
        CrammerError::Generation(GenerationError::new(kind))
    }
}

impl From<AudioErrorKind> for CrammerError {
    #[track_caller]
    fn from(kind: AudioErrorKind) -> Self {
        CrammerError::Audio(AudioError::new(kind))
    }
}

/// Convenience result alias for Crammer operations.
pub type CrammerResult<T> = Result<T, CrammerError>;
