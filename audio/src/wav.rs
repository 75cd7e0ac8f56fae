//! WAV decoding via `hound`.
//!
//! Samples keep their native units: integer PCM becomes its integer value
//! as f32 (16-bit audio spans -32768..32767), float PCM is taken as is.
//! Multi-channel files are downmixed to mono by averaging.

use std::path::Path;

use hound::{SampleFormat, WavReader};
use thiserror::Error;

/// WAV decoding error.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("wav: {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("wav: {path}: unsupported sample format ({bits} bit {format:?})")]
    Unsupported {
        path: String,
        bits: u16,
        format: SampleFormat,
    },

    #[error("wav: {path}: no samples")]
    Empty { path: String },
}

/// A decoded mono signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count of the source file before downmixing.
    pub channels: u16,
    /// Mono samples.
    pub samples: Vec<f32>,
}

/// Decodes a WAV file into mono f32 samples.
pub fn decode(path: impl AsRef<Path>) -> Result<Decoded, DecodeError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let read_err = |source: hound::Error| DecodeError::Read { path: display.clone(), source };

    let reader = WavReader::open(path).map_err(read_err)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Int if (1..=32).contains(&spec.bits_per_sample) => reader
            .into_samples::<i32>()
            .map(|s| s.map(|v| v as f32))
            .collect::<Result<_, _>>()
            .map_err(read_err)?,
        SampleFormat::Float if spec.bits_per_sample == 32 => reader
            .into_samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(read_err)?,
        format => {
            return Err(DecodeError::Unsupported {
                path: display,
                bits: spec.bits_per_sample,
                format,
            });
        }
    };

    let samples = downmix(&interleaved, channels);
    if samples.is_empty() {
        return Err(DecodeError::Empty { path: display });
    }

    Ok(Decoded {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        samples,
    })
}

/// Averages interleaved frames down to one channel. A trailing partial
/// frame is dropped.
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}
