//! Acoustic features for viseme animation.
//!
//! Turns a speech recording into a time-indexed sequence of log mel
//! filterbank vectors, one per 10ms step by default.
//!
//! # Architecture
//!
//! Two sequential stages, no state kept between calls:
//!
//! 1. [`Normalizer::normalize`]: audio file -> EBU R128 loudness-normalized
//!    [`AudioWaveform`]. The external normalizer writes a transient sibling
//!    file that is always deleted before returning.
//! 2. [`extract`]: [`AudioWaveform`] + [`WindowConfig`] -> [`FeatureMatrix`]
//!    of `num_channels` log filterbank energies per frame.
//!
//! [`pipeline`] chains both with the defaults (step 0.01 s, FFT 4800,
//! 25ms frames, 26 channels).
//!
//! # Example
//!
//! ```no_run
//! let features = lipsync_features::pipeline("speech.wav")?;
//! for (i, row) in features.rows().iter().enumerate() {
//!     println!("{:.2}s {:?}", features.frame_time(i), &row[..4]);
//! }
//! # Ok::<(), lipsync_features::Error>(())
//! ```

mod config;
mod error;
mod extract;
mod matrix;
mod normalizer;
mod pipeline;
mod waveform;

pub use config::{
    WindowConfig, DEFAULT_FFT_SIZE, DEFAULT_FRAME_LENGTH_SECONDS, DEFAULT_NUM_CHANNELS,
    DEFAULT_STEP_SIZE_SECONDS,
};
pub use error::{Error, Result};
pub use extract::extract;
pub use matrix::FeatureMatrix;
pub use normalizer::{normalize, Normalizer};
pub use pipeline::{pipeline, Pipeline};
pub use waveform::AudioWaveform;

pub use lipsync_audio::loudness::{FfmpegNormalize, LoudnessError, LoudnessNormalizer};
