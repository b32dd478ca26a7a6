//! Shared flow plumbing.

use crammer_error::{GenerationError, GenerationErrorKind};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a schema-validated payload into its typed form.
///
/// The value has already passed validation, so a decode failure means
/// the serde type and the declared schema have drifted apart — a
/// programming error, surfaced as terminal.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, GenerationError> {
    serde_json::from_value(value).map_err(|e| {
        GenerationError::new(GenerationErrorKind::InvalidResponse(format!(
            "validated payload did not decode: {e}"
        )))
    })
}
