//! Audio encoding error types.

/// Audio-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum AudioErrorKind {
    /// PCM payload was empty or absent. Caller error, never retried.
    #[display("PCM payload is empty")]
    EmptyPcm,
    /// Format parameters do not describe a valid PCM stream.
    #[display("Invalid PCM parameters: {_0}")]
    InvalidParameters(String),
    /// Payload is not a well-formed data URI.
    #[display("Malformed data URI: {_0}")]
    DataUri(String),
    /// Base64 decoding failed.
    #[display("Base64 decode error: {_0}")]
    Base64Decode(String),
}

/// Audio error with source location tracking.
///
/// # Examples
///
/// ```
/// use crammer_error::{AudioError, AudioErrorKind};
///
/// let err = AudioError::new(AudioErrorKind::EmptyPcm);
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioError {
    /// The kind of error that occurred
    kind: AudioErrorKind,
    /// Line number where error was created
    line: u32,
    /// File where error was created
    file: &'static str,
}

impl AudioError {
    /// Create a new AudioError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AudioErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AudioErrorKind {
        &self.kind
    }
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Audio Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for AudioError {}

impl From<AudioErrorKind> for AudioError {
    #[track_caller]
    fn from(kind: AudioErrorKind) -> Self {
        AudioError::new(kind)
    }
}
