//! The backend driver seam.

use async_trait::async_trait;
use crammer_core::{GenerateRequest, GenerateResponse};
use crammer_error::GenerationError;

/// A generation backend.
///
/// The backend is an opaque, non-deterministic external dependency; this
/// trait is the only seam the rest of the library sees. Implementations
/// must be safe for concurrent independent use — the client never
/// shares mutable state across requests.
///
/// Drivers report failures through [`GenerationError`]; the retry loop
/// classifies them, so a driver should map rate limiting and transient
/// unavailability to their dedicated kinds rather than a generic status
/// error.
#[async_trait]
pub trait CrammerDriver: Send + Sync {
    /// Issue one generation call.
    async fn generate(&self, request: &GenerateRequest)
    -> Result<GenerateResponse, GenerationError>;

    /// Human-readable provider name for logging.
    fn provider_name(&self) -> &'static str;

    /// Model identifier this driver targets by default.
    fn model_name(&self) -> &str;
}
