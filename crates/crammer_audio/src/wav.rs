//! RIFF/WAVE container framing.
//!
//! `encode_wav` is a pure byte transform: no clocks, no randomness, no
//! I/O. Identical inputs produce byte-identical output, which is what
//! makes the container independently testable against fixed offsets.

use crate::PcmAudioBuffer;
use crammer_error::{AudioError, AudioErrorKind};

/// Size of the fixed RIFF/WAVE header emitted ahead of the payload.
pub const WAV_HEADER_LEN: usize = 44;

/// Audio format code for linear PCM in the `fmt ` chunk.
const FORMAT_PCM: u16 = 1;

/// Frame a raw PCM buffer as a WAV byte stream.
///
/// Emits the 44-byte RIFF/WAVE header followed by the payload bytes
/// unmodified. All multi-byte header fields are little-endian. The
/// `data` sub-chunk size equals the exact payload length and the RIFF
/// size field equals `36 + payload length`.
///
/// # Errors
///
/// An empty payload or nonsensical format parameters are caller errors,
/// never retryable: the upstream generation stage must produce audio
/// before this encoder is invoked.
///
/// # Examples
///
/// ```
/// use crammer_audio::{PcmAudioBuffer, encode_wav};
///
/// let wav = encode_wav(&PcmAudioBuffer::new(vec![0u8; 1000])).unwrap();
/// assert_eq!(wav.len(), 1044);
/// assert_eq!(&wav[0..4], b"RIFF");
/// assert_eq!(&wav[8..12], b"WAVE");
/// ```
pub fn encode_wav(pcm: &PcmAudioBuffer) -> Result<Vec<u8>, AudioError> {
    if pcm.data().is_empty() {
        return Err(AudioErrorKind::EmptyPcm.into());
    }
    if *pcm.channels() == 0 {
        return Err(AudioErrorKind::InvalidParameters("channel count is zero".to_string()).into());
    }
    if *pcm.sample_rate() == 0 {
        return Err(AudioErrorKind::InvalidParameters("sample rate is zero".to_string()).into());
    }
    if *pcm.bits_per_sample() == 0 || pcm.bits_per_sample() % 8 != 0 {
        return Err(AudioErrorKind::InvalidParameters(format!(
            "bits per sample {} is not a positive multiple of 8",
            pcm.bits_per_sample()
        ))
        .into());
    }
    let data_len = u32::try_from(pcm.byte_len())
        .ok()
        .filter(|len| *len <= u32::MAX - 36)
        .ok_or_else(|| {
            AudioError::new(AudioErrorKind::InvalidParameters(format!(
                "payload of {} bytes exceeds the RIFF size field",
                pcm.byte_len()
            )))
        })?;

    let channels = *pcm.channels();
    let sample_rate = *pcm.sample_rate();
    let sample_width = pcm.sample_width();
    let byte_rate = sample_rate * u32::from(channels) * u32::from(sample_width);
    let block_align = channels * sample_width;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + pcm.byte_len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&pcm.bits_per_sample().to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(pcm.data());

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le_u32(bytes: &[u8]) -> u32 {
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    fn le_u16(bytes: &[u8]) -> u16 {
        u16::from_le_bytes([bytes[0], bytes[1]])
    }

    #[test]
    fn header_fields_for_default_speech_format() {
        let wav = encode_wav(&PcmAudioBuffer::new(vec![7u8; 480])).unwrap();

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(le_u32(&wav[4..8]), 36 + 480);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(le_u32(&wav[16..20]), 16);
        assert_eq!(le_u16(&wav[20..22]), 1);
        assert_eq!(le_u16(&wav[22..24]), 1);
        assert_eq!(le_u32(&wav[24..28]), 24_000);
        assert_eq!(le_u32(&wav[28..32]), 48_000);
        assert_eq!(le_u16(&wav[32..34]), 2);
        assert_eq!(le_u16(&wav[34..36]), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(le_u32(&wav[40..44]), 480);
        assert_eq!(&wav[44..], vec![7u8; 480]);
    }

    #[test]
    fn stereo_format_adjusts_rates() {
        let pcm = PcmAudioBuffer::with_format(vec![0u8; 64], 2, 44_100, 16);
        let wav = encode_wav(&pcm).unwrap();
        assert_eq!(le_u16(&wav[22..24]), 2);
        assert_eq!(le_u32(&wav[24..28]), 44_100);
        assert_eq!(le_u32(&wav[28..32]), 44_100 * 2 * 2);
        assert_eq!(le_u16(&wav[32..34]), 4);
    }

    #[test]
    fn empty_payload_is_a_caller_error() {
        let err = encode_wav(&PcmAudioBuffer::new(Vec::new())).unwrap_err();
        assert_eq!(*err.kind(), AudioErrorKind::EmptyPcm);
    }

    #[test]
    fn zero_channels_rejected() {
        let pcm = PcmAudioBuffer::with_format(vec![0u8; 4], 0, 24_000, 16);
        let err = encode_wav(&pcm).unwrap_err();
        assert!(matches!(err.kind(), AudioErrorKind::InvalidParameters(_)));
    }

    #[test]
    fn encoding_is_deterministic() {
        let pcm = PcmAudioBuffer::new((0u8..=255).cycle().take(2048).collect());
        assert_eq!(encode_wav(&pcm).unwrap(), encode_wav(&pcm).unwrap());
    }
}
