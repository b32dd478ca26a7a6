//! Text-to-speech flow.

use crammer_audio::{PcmAudioBuffer, encode_wav, wrap_wav_data_uri};
use crammer_client::gemini::DEFAULT_TTS_MODEL;
use crammer_client::{CrammerDriver, Generator};
use crammer_core::{GenerateRequest, GenerationConfig, Message, RetryPolicy};
use crammer_error::{GenerationError, GenerationErrorKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The product's narration voice.
pub const SPEECH_VOICE: &str = "Algenib";

/// Input for speech generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechInput {
    /// The text to be converted to speech
    pub text: String,
}

/// Generated speech audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechAudio {
    /// The WAV audio as a `data:audio/wav;base64,` URI
    pub audio: String,
}

/// Synthesize speech for a piece of text.
///
/// The backend returns raw 24 kHz mono 16-bit PCM; the payload is
/// framed as WAV and handed back as a data URI.
#[instrument(skip(generator, input), fields(chars = input.text.chars().count()))]
pub async fn generate_speech<D: CrammerDriver>(
    generator: &Generator<D>,
    input: &SpeechInput,
) -> Result<SpeechAudio, GenerationError> {
    let request = GenerateRequest {
        messages: vec![Message::user(&input.text)],
        model: Some(DEFAULT_TTS_MODEL.to_string()),
        config: Some(GenerationConfig::speech(SPEECH_VOICE)),
        ..GenerateRequest::default()
    };

    let payload = generator
        .generate_media(&request, &RetryPolicy::default())
        .await?;
    debug!(bytes = payload.data.len(), "Framing PCM payload as WAV");

    let wav = encode_wav(&PcmAudioBuffer::new(payload.data))
        .map_err(|e| GenerationError::new(GenerationErrorKind::InvalidResponse(e.to_string())))?;

    Ok(SpeechAudio {
        audio: wrap_wav_data_uri(&wav),
    })
}
