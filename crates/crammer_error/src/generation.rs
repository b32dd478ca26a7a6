//! Generation error types and retry classification.

/// Failure conditions for a generation call.
///
/// The kind determines retry behavior: rate limits (429), transient
/// unavailability (503) and empty/non-conformant output are retryable;
/// everything else is terminal and propagates after a single attempt.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Backend reported HTTP 429.
    #[display("Rate limited by backend: {message}")]
    RateLimited {
        /// Error message from the backend
        message: String,
    },

    /// Backend reported HTTP 503.
    #[display("Backend unavailable: {message}")]
    Unavailable {
        /// Error message from the backend
        message: String,
    },

    /// Backend reported any other non-success status.
    #[display("Backend error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the backend
        message: String,
    },

    /// Transport-level failure (connect, timeout, body read).
    #[display("HTTP transport error: {_0}")]
    Http(String),

    /// Backend payload could not be decoded.
    #[display("Invalid backend response: {_0}")]
    InvalidResponse(String),

    /// Backend "succeeded" but returned no usable payload, or the
    /// payload failed schema validation.
    #[display("Empty output: {reason}")]
    EmptyOutput {
        /// Why the output was unusable
        reason: String,
    },

    /// The backend requested a tool that could not be resolved or
    /// executed: unregistered name, argument schema mismatch, handler
    /// failure, or result schema mismatch.
    #[display("Tool resolution failed for '{tool}': {reason}")]
    ToolResolution {
        /// Name the backend asked for
        tool: String,
        /// What went wrong
        reason: String,
    },

    /// The backend kept requesting tools past the per-attempt ceiling.
    #[display("Tool round limit exceeded after {_0} rounds")]
    ToolRounds(usize),

    /// The retry budget was consumed; carries the final attempt's
    /// failure.
    #[display("Exhausted retries after {attempts} attempts; last failure: {cause}")]
    ExhaustedRetries {
        /// Total backend calls made
        attempts: u32,
        /// The last attempt's failure
        cause: Box<GenerationError>,
    },

    /// A chain stage failed; the whole chain is abandoned.
    #[display("Stage '{stage}' failed: {cause}")]
    ChainStage {
        /// Name of the failing stage
        stage: String,
        /// The stage's failure
        cause: Box<GenerationError>,
    },

    /// An external cancel signal fired mid-attempt or mid-wait.
    #[display("Generation cancelled")]
    Cancelled,
}

impl GenerationErrorKind {
    /// Check if this error type should be retried.
    ///
    /// Only rate limits, transient unavailability and empty output are
    /// transient. Everything else is terminal: retrying a bad request,
    /// an unregistered tool or a decode failure cannot succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationErrorKind::RateLimited { .. }
                | GenerationErrorKind::Unavailable { .. }
                | GenerationErrorKind::EmptyOutput { .. }
        )
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use crammer_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::EmptyOutput {
///     reason: "no candidates".to_string(),
/// });
/// assert!(format!("{}", err).contains("no candidates"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationError {
    /// The kind of error that occurred
    kind: GenerationErrorKind,
    /// Line number where error was created
    line: u32,
    /// File where error was created
    file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GenerationErrorKind {
        &self.kind
    }

    /// Consume the error, returning its kind.
    pub fn into_kind(self) -> GenerationErrorKind {
        self.kind
    }
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Generation Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for GenerationError {}

impl From<GenerationErrorKind> for GenerationError {
    #[track_caller]
    fn from(kind: GenerationErrorKind) -> Self {
        GenerationError::new(kind)
    }
}

/// Trait for errors that support retry classification.
///
/// Transient errors like 503 (service unavailable) or 429 (rate limit)
/// return true. Permanent errors like 401 (unauthorized) or 400 (bad
/// request) return false.
///
/// # Examples
///
/// ```
/// use crammer_error::{GenerationError, GenerationErrorKind, RetryableError};
///
/// let err = GenerationError::new(GenerationErrorKind::Unavailable {
///     message: "overloaded".to_string(),
/// });
/// assert!(err.is_retryable());
///
/// let err = GenerationError::new(GenerationErrorKind::Api {
///     status: 400,
///     message: "bad request".to_string(),
/// });
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for GenerationError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_and_unavailable_are_retryable() {
        let rate = GenerationErrorKind::RateLimited {
            message: "quota".to_string(),
        };
        let unavailable = GenerationErrorKind::Unavailable {
            message: "overloaded".to_string(),
        };
        assert!(rate.is_retryable());
        assert!(unavailable.is_retryable());
    }

    #[test]
    fn empty_output_is_retryable() {
        let kind = GenerationErrorKind::EmptyOutput {
            reason: "missing field".to_string(),
        };
        assert!(kind.is_retryable());
    }

    #[test]
    fn terminal_kinds_are_not_retryable() {
        let kinds = [
            GenerationErrorKind::Api {
                status: 400,
                message: "bad".to_string(),
            },
            GenerationErrorKind::Http("connect refused".to_string()),
            GenerationErrorKind::InvalidResponse("truncated".to_string()),
            GenerationErrorKind::ToolResolution {
                tool: "lookup".to_string(),
                reason: "unregistered".to_string(),
            },
            GenerationErrorKind::ToolRounds(8),
            GenerationErrorKind::Cancelled,
        ];
        for kind in kinds {
            assert!(!kind.is_retryable(), "{kind} must be terminal");
        }
    }

    #[test]
    fn exhausted_retries_carries_cause() {
        let cause = GenerationError::new(GenerationErrorKind::RateLimited {
            message: "quota".to_string(),
        });
        let err = GenerationError::new(GenerationErrorKind::ExhaustedRetries {
            attempts: 3,
            cause: Box::new(cause),
        });
        let rendered = format!("{err}");
        assert!(rendered.contains("3 attempts"));
        assert!(rendered.contains("quota"));
        assert!(!err.is_retryable());
    }
}
