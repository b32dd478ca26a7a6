//! Audio container encoding for the Crammer generation library.
//!
//! The generation backend's speech path emits raw linear PCM. This
//! crate wraps those samples in a valid RIFF/WAVE container and handles
//! the data-URI transport format used on both sides of the boundary.

mod data_uri;
mod pcm;
mod wav;

pub use data_uri::{WAV_DATA_URI_PREFIX, decode_data_uri_payload, wrap_wav_data_uri};
pub use pcm::PcmAudioBuffer;
pub use wav::{WAV_HEADER_LEN, encode_wav};
