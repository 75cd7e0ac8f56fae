//! Loudness normalization of an audio file into memory.

use std::path::Path;

use lipsync_audio::loudness::{FfmpegNormalize, LoudnessError, LoudnessNormalizer, TempOutput};
use lipsync_audio::wav;
use tracing::debug;

use crate::{AudioWaveform, Result};

/// Normalizes audio files to the EBU R128 reference level and decodes the
/// result.
///
/// The service writes to a uniquely named sibling of the input, which is
/// removed before `normalize` returns on every path.
#[derive(Debug, Clone, Default)]
pub struct Normalizer<N = FfmpegNormalize> {
    service: N,
}

impl<N: LoudnessNormalizer> Normalizer<N> {
    /// Creates a normalizer backed by `service`.
    pub fn new(service: N) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &N {
        &self.service
    }

    /// Normalizes `path` and returns the decoded waveform.
    ///
    /// # Errors
    ///
    /// - [`Error::Normalization`](crate::Error::Normalization) if `path` is
    ///   not a file or the service fails; nothing is decoded.
    /// - [`Error::Decode`](crate::Error::Decode) if the normalized file can't
    ///   be parsed.
    pub fn normalize(&self, path: impl AsRef<Path>) -> Result<AudioWaveform> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LoudnessError::InputNotFound(path.display().to_string()).into());
        }

        let output = TempOutput::sibling_of(path);
        debug!("normalizing audio signal from file {}", path.display());
        self.service.normalize(path, output.path())?;

        let decoded = wav::decode(output.path());
        drop(output);
        let decoded = decoded?;

        debug!("samples / second = {}", decoded.sample_rate);
        debug!("data points = {}", decoded.samples.len());
        Ok(decoded.into())
    }
}

/// Normalizes `path` with the default `ffmpeg-normalize` service.
pub fn normalize(path: impl AsRef<Path>) -> Result<AudioWaveform> {
    Normalizer::<FfmpegNormalize>::default().normalize(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Records the output path it was handed and copies input to output.
    #[derive(Default)]
    struct Copying {
        outputs: Mutex<Vec<PathBuf>>,
    }

    impl LoudnessNormalizer for Copying {
        fn normalize(&self, input: &Path, output: &Path) -> std::result::Result<(), LoudnessError> {
            self.outputs.lock().unwrap().push(output.to_path_buf());
            std::fs::copy(input, output).unwrap();
            Ok(())
        }
    }

    fn write_wav(path: &Path, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_normalize_decodes_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.wav");
        write_wav(&input, &[0, 8192, -8192, 0]);

        let normalizer = Normalizer::new(Copying::default());
        let wave = normalizer.normalize(&input).unwrap();

        assert_eq!(wave.sample_rate, 16000);
        assert_eq!(wave.samples, vec![0.0, 8192.0, -8192.0, 0.0]);

        let outputs = normalizer.service().outputs.lock().unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].parent(), Some(dir.path()));
        assert!(!outputs[0].exists());
    }

    #[test]
    fn test_missing_input_is_normalization_error() {
        let dir = tempfile::tempdir().unwrap();
        let normalizer = Normalizer::new(Copying::default());

        let err = normalizer.normalize(dir.path().join("nope.wav")).unwrap_err();
        assert!(matches!(err, Error::Normalization(LoudnessError::InputNotFound(_))));
        assert!(normalizer.service().outputs.lock().unwrap().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_directory_input_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = Normalizer::new(Copying::default()).normalize(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Normalization(LoudnessError::InputNotFound(_))));
    }
}
