//! Error types for the feature pipeline.

use lipsync_audio::fbank::FbankError;
use lipsync_audio::loudness::LoudnessError;
use lipsync_audio::wav::DecodeError;
use thiserror::Error;

/// Errors returned by [`normalize`](crate::normalize), [`extract`](crate::extract)
/// and [`pipeline`](crate::pipeline).
///
/// Nothing is retried. Each variant keeps the underlying error as its source.
#[derive(Debug, Error)]
pub enum Error {
    /// The loudness normalizer could not run or reported failure. For a
    /// failed tool run the message carries its captured output.
    #[error("normalization failed: {0}")]
    Normalization(#[from] LoudnessError),

    /// The normalized file could not be parsed as a waveform.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// The waveform or the window configuration was rejected by the filterbank.
    #[error("feature extraction failed: {0}")]
    FeatureExtraction(#[from] FbankError),
}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
