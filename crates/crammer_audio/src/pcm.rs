//! Raw PCM buffer types.

use serde::{Deserialize, Serialize};

/// Raw interleaved signed little-endian PCM samples plus the three
/// format parameters that, with the byte length, fully determine a
/// valid WAV framing.
///
/// Defaults match the backend's speech output: mono, 24 kHz, 16-bit.
///
/// # Examples
///
/// ```
/// use crammer_audio::PcmAudioBuffer;
///
/// let pcm = PcmAudioBuffer::new(vec![0u8; 1000]);
/// assert_eq!(*pcm.channels(), 1);
/// assert_eq!(*pcm.sample_rate(), 24_000);
/// assert_eq!(pcm.sample_width(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PcmAudioBuffer {
    /// Raw sample bytes
    data: Vec<u8>,
    /// Channel count
    channels: u16,
    /// Samples per second
    sample_rate: u32,
    /// Bits per sample
    bits_per_sample: u16,
}

impl PcmAudioBuffer {
    /// Creates a buffer with the backend's default speech format
    /// (mono, 24 kHz, 16-bit).
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            channels: 1,
            sample_rate: 24_000,
            bits_per_sample: 16,
        }
    }

    /// Creates a buffer with explicit format parameters.
    pub fn with_format(data: Vec<u8>, channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        Self {
            data,
            channels,
            sample_rate,
            bits_per_sample,
        }
    }

    /// Bytes per sample per channel.
    pub fn sample_width(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Byte length of the raw payload.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}
