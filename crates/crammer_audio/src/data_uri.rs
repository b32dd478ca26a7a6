//! Audio data-URI encoding and decoding.
//!
//! The backend delivers raw speech audio as a data URI whose payload
//! segment (everything after the first comma) is base64-encoded PCM.
//! Finished WAV audio travels back to callers the same way, as
//! `data:audio/wav;base64,<payload>`.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use crammer_error::{AudioError, AudioErrorKind};

/// Prefix of every WAV artifact handed back to callers.
pub const WAV_DATA_URI_PREFIX: &str = "data:audio/wav;base64,";

/// Wrap finished WAV bytes as a `data:audio/wav;base64,` URI.
///
/// # Examples
///
/// ```
/// use crammer_audio::wrap_wav_data_uri;
///
/// let uri = wrap_wav_data_uri(b"RIFF");
/// assert!(uri.starts_with("data:audio/wav;base64,"));
/// ```
pub fn wrap_wav_data_uri(wav: &[u8]) -> String {
    format!("{WAV_DATA_URI_PREFIX}{}", STANDARD.encode(wav))
}

/// Decode the payload segment of a data URI.
///
/// Splits at the first comma and base64-decodes the remainder, exactly
/// as the backend's media URIs are laid out. The scheme and media type
/// ahead of the comma are not interpreted.
///
/// # Errors
///
/// Fails if the URI has no comma or the payload is not valid base64.
pub fn decode_data_uri_payload(uri: &str) -> Result<Vec<u8>, AudioError> {
    let (_, payload) = uri.split_once(',').ok_or_else(|| {
        AudioError::new(AudioErrorKind::DataUri(
            "no comma separating the payload segment".to_string(),
        ))
    })?;
    STANDARD
        .decode(payload)
        .map_err(|e| AudioError::new(AudioErrorKind::Base64Decode(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_payload_bytes() {
        let bytes = b"\x00\x01\x02\xff".to_vec();
        let uri = format!("data:audio/pcm;base64,{}", STANDARD.encode(&bytes));
        assert_eq!(decode_data_uri_payload(&uri).unwrap(), bytes);
    }

    #[test]
    fn splits_at_first_comma_only() {
        // A payload containing no commas itself; the split must not
        // consume anything past the first separator.
        let uri = format!("data:audio/pcm;rate=24000;base64,{}", STANDARD.encode(b"pcm"));
        assert_eq!(decode_data_uri_payload(&uri).unwrap(), b"pcm");
    }

    #[test]
    fn missing_comma_is_an_error() {
        let err = decode_data_uri_payload("data:audio/pcm;base64").unwrap_err();
        assert!(matches!(err.kind(), AudioErrorKind::DataUri(_)));
    }

    #[test]
    fn invalid_base64_is_an_error() {
        let err = decode_data_uri_payload("data:audio/pcm;base64,!!!").unwrap_err();
        assert!(matches!(err.kind(), AudioErrorKind::Base64Decode(_)));
    }

    #[test]
    fn wrap_uses_the_wav_prefix() {
        let uri = wrap_wav_data_uri(b"RIFFdata");
        let decoded = decode_data_uri_payload(&uri).unwrap();
        assert_eq!(decoded, b"RIFFdata");
        assert!(uri.starts_with(WAV_DATA_URI_PREFIX));
    }
}
