//! File path in, feature matrix out.

use std::path::Path;

use lipsync_audio::loudness::{FfmpegNormalize, LoudnessNormalizer};
use tracing::debug;

use crate::{extract, FeatureMatrix, Normalizer, Result, WindowConfig};

/// Normalizer followed by feature extraction with a fixed window config.
#[derive(Debug, Clone, Default)]
pub struct Pipeline<N = FfmpegNormalize> {
    normalizer: Normalizer<N>,
    window: WindowConfig,
}

impl<N: LoudnessNormalizer> Pipeline<N> {
    pub fn new(service: N, window: WindowConfig) -> Self {
        Self { normalizer: Normalizer::new(service), window }
    }

    pub fn normalizer(&self) -> &Normalizer<N> {
        &self.normalizer
    }

    pub fn window(&self) -> &WindowConfig {
        &self.window
    }

    /// Normalizes the file at `path` and extracts its features.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<FeatureMatrix> {
        let path = path.as_ref();
        debug!("extracting audio features from {}", path.display());
        let waveform = self.normalizer.normalize(path)?;
        extract(&waveform, &self.window)
    }
}

/// Runs the default pipeline: `ffmpeg-normalize`, then the default
/// [`WindowConfig`].
pub fn pipeline(path: impl AsRef<Path>) -> Result<FeatureMatrix> {
    Pipeline::<FfmpegNormalize>::default().run(path)
}
