//! EBU R128 loudness normalization as an external service.
//!
//! The DSP lives outside this crate. [`LoudnessNormalizer`] is the seam: it
//! reads one file and writes a normalized WAV to another. [`FfmpegNormalize`]
//! drives the `ffmpeg-normalize` program; tests and embedders can plug in
//! anything else that honours the same contract.
//!
//! [`TempOutput`] owns the intermediate file and removes it on drop, so the
//! caller never leaves it behind regardless of how decoding goes.

mod ffmpeg;
mod temp;

pub use ffmpeg::*;
pub use temp::*;

use std::io;
use std::path::Path;
use std::process::ExitStatus;

use thiserror::Error;

/// Loudness normalization error.
#[derive(Debug, Error)]
pub enum LoudnessError {
    /// The normalizer could not be started at all.
    #[error("loudness: failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The normalizer ran and reported failure.
    #[error("loudness: {program} exited with {status}: {output}")]
    Failed {
        program: String,
        status: ExitStatus,
        /// Captured stdout followed by stderr.
        output: String,
    },

    /// The input file does not exist or is not a regular file.
    #[error("loudness: input not found: {0}")]
    InputNotFound(String),

    /// The normalizer reported success without producing its output.
    #[error("loudness: {program} did not write {output}")]
    MissingOutput { program: String, output: String },
}

/// Writes a loudness-normalized copy of `input` to `output`.
///
/// Implementations block until the output is complete. `output` may already
/// exist and must then be overwritten.
pub trait LoudnessNormalizer {
    fn normalize(&self, input: &Path, output: &Path) -> Result<(), LoudnessError>;
}

impl<T: LoudnessNormalizer + ?Sized> LoudnessNormalizer for &T {
    fn normalize(&self, input: &Path, output: &Path) -> Result<(), LoudnessError> {
        (**self).normalize(input, output)
    }
}

impl<T: LoudnessNormalizer + ?Sized> LoudnessNormalizer for Box<T> {
    fn normalize(&self, input: &Path, output: &Path) -> Result<(), LoudnessError> {
        (**self).normalize(input, output)
    }
}
